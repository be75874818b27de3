use std::collections::HashMap;
use std::env;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::observability;
use crate::types::{ChannelId, Timestamp};

const DEFAULT_API_URL: &str = "https://slack.com/api/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const TOKEN_ENV: &str = "SLACKLINE_TOKEN";

/// Client for the platform's REST-style Web API.
///
/// Covers only the outbound operations the engine needs: posting and
/// deleting messages, adding and removing reactions, fetching the team
/// emoji list, and marking a channel read. It surfaces transport and
/// platform errors to the caller and never retries internally.
#[derive(Debug, Clone)]
pub struct SlackClient {
    token: String,
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
}

impl SlackClient {
    /// Create a new client.
    ///
    /// The token can be provided directly or read from the
    /// SLACKLINE_TOKEN environment variable.
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_options(token, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        token: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let token = match token {
            Some(token) => token,
            None => env::var(TOKEN_ENV).map_err(|_| {
                Error::authentication(
                    "token not provided and SLACKLINE_TOKEN environment variable not set",
                )
            })?,
        };

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            token,
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout,
        })
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.token)) {
            headers.insert(header::AUTHORIZATION, value);
        }
        headers
    }

    /// Map an HTTP-level failure to our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        let body = response.text().await.unwrap_or_default();

        match status_code {
            400 => Error::bad_request(body),
            401 | 403 => Error::authentication(body),
            408 => Error::timeout(body, None),
            429 => Error::rate_limit(body, retry_after),
            _ => Error::api(status_code, body),
        }
    }

    /// Call one Web API method and decode its response.
    ///
    /// The platform wraps every response in `{ ok, error?, ... }`;
    /// `ok: false` becomes [`Error::Platform`] with the platform's
    /// error code.
    async fn call<T, R>(&self, method: &'static str, request: &T) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        observability::CLIENT_REQUESTS.click();
        let url = format!("{}{}", self.base_url, method);

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                observability::CLIENT_REQUEST_ERRORS.click();
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            observability::CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            ok: bool,
            #[serde(default)]
            error: Option<String>,
        }

        let body = response.text().await.map_err(|e| {
            Error::http_client(format!("Failed to read response: {}", e), Some(Box::new(e)))
        })?;

        let envelope: Envelope = serde_json::from_str(&body).map_err(|e| {
            Error::serialization(
                format!("Failed to parse response envelope: {}", e),
                Some(Box::new(e)),
            )
        })?;
        if !envelope.ok {
            observability::CLIENT_REQUEST_ERRORS.click();
            return Err(Error::platform(
                envelope.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        serde_json::from_str::<R>(&body).map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Posts a message to a channel, optionally into a thread.
    pub async fn post_message(
        &self,
        channel: &ChannelId,
        text: &str,
        thread_ts: Option<Timestamp>,
    ) -> Result<PostMessageAck> {
        #[derive(Serialize)]
        struct Request<'a> {
            channel: &'a ChannelId,
            text: &'a str,
            as_user: bool,
            link_names: u8,
            #[serde(skip_serializing_if = "Option::is_none")]
            thread_ts: Option<Timestamp>,
        }
        self.call(
            "chat.postMessage",
            &Request {
                channel,
                text,
                as_user: true,
                link_names: 1,
                thread_ts,
            },
        )
        .await
    }

    /// Deletes a message.
    pub async fn delete_message(&self, channel: &ChannelId, ts: Timestamp) -> Result<()> {
        #[derive(Serialize)]
        struct Request<'a> {
            channel: &'a ChannelId,
            ts: Timestamp,
            as_user: bool,
        }
        let _: serde_json::Value = self
            .call(
                "chat.delete",
                &Request {
                    channel,
                    ts,
                    as_user: true,
                },
            )
            .await?;
        Ok(())
    }

    /// Adds a reaction to a message.
    pub async fn add_reaction(
        &self,
        name: &str,
        channel: &ChannelId,
        ts: Timestamp,
    ) -> Result<()> {
        let _: serde_json::Value = self
            .call("reactions.add", &ReactionRequest { name, channel, timestamp: ts })
            .await?;
        Ok(())
    }

    /// Removes a reaction from a message.
    pub async fn remove_reaction(
        &self,
        name: &str,
        channel: &ChannelId,
        ts: Timestamp,
    ) -> Result<()> {
        let _: serde_json::Value = self
            .call(
                "reactions.remove",
                &ReactionRequest { name, channel, timestamp: ts },
            )
            .await?;
        Ok(())
    }

    /// Fetches the team's custom emoji list, name to rendering.
    pub async fn emoji_list(&self) -> Result<HashMap<String, String>> {
        #[derive(Serialize)]
        struct Request {}
        #[derive(Deserialize)]
        struct EmojiListResponse {
            #[serde(default)]
            emoji: Option<HashMap<String, String>>,
        }
        let response: EmojiListResponse = self.call("emoji.list", &Request {}).await?;
        Ok(response.emoji.unwrap_or_default())
    }

    /// Marks a channel read up to the given timestamp.
    pub async fn mark_read(&self, channel: &ChannelId, ts: Timestamp) -> Result<()> {
        #[derive(Serialize)]
        struct Request<'a> {
            channel: &'a ChannelId,
            ts: Timestamp,
        }
        let _: serde_json::Value = self
            .call("conversations.mark", &Request { channel, ts })
            .await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ReactionRequest<'a> {
    name: &'a str,
    channel: &'a ChannelId,
    timestamp: Timestamp,
}

/// The platform's acknowledgement of a posted message.
#[derive(Clone, Debug, Deserialize)]
pub struct PostMessageAck {
    /// Channel the message landed in.
    pub channel: ChannelId,
    /// Timestamp the platform assigned; the message's identity.
    pub ts: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_an_authentication_error() {
        // Force the env-var path with no variable set.
        unsafe { env::remove_var(TOKEN_ENV) };
        let err = SlackClient::new(None).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn explicit_token_wins() {
        let client = SlackClient::new(Some("xoxb-test".to_string())).unwrap();
        assert_eq!(client.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn ack_deserializes() {
        let ack: PostMessageAck =
            serde_json::from_str(r#"{"ok":true,"channel":"C1","ts":"100.000007"}"#).unwrap();
        assert_eq!(ack.channel, ChannelId::new("C1"));
        assert_eq!(ack.ts.to_string(), "100.000007");
    }
}
