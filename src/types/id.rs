use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! make_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw platform identifier.
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }
    };
}

make_id! {
    /// Identifies a channel, group, or DM conversation.
    ///
    /// The platform prefixes these with C, G, or D; the engine treats
    /// them opaquely and never validates the prefix.
    ChannelId
}

make_id! {
    /// Identifies a team/workspace.
    TeamId
}

make_id! {
    /// Identifies a user within a team.
    UserId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_is_transparent() {
        let id = ChannelId::new("C024BE91L");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"C024BE91L\"");

        let back: ChannelId = serde_json::from_str("\"C024BE91L\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_is_raw() {
        assert_eq!(UserId::new("U023BECGF").to_string(), "U023BECGF");
    }
}
