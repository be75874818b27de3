use biometrics::{Collector, Counter};

pub(crate) static EVENTS_RECEIVED: Counter = Counter::new("slackline.log.events_received");
pub(crate) static EVENTS_INSERTED: Counter = Counter::new("slackline.log.events_inserted");
pub(crate) static EVENTS_EDITED: Counter = Counter::new("slackline.log.events_edited");
pub(crate) static EVENTS_DELETED: Counter = Counter::new("slackline.log.events_deleted");
pub(crate) static DUPLICATE_INSERTS: Counter = Counter::new("slackline.log.duplicate_inserts");
pub(crate) static STALE_TARGETS: Counter = Counter::new("slackline.log.stale_targets");
pub(crate) static RESERVED_EVENTS: Counter = Counter::new("slackline.log.reserved_events");
pub(crate) static MALFORMED_DROPPED: Counter = Counter::new("slackline.log.malformed_dropped");
pub(crate) static IGNORED_SUBTYPES: Counter = Counter::new("slackline.log.ignored_subtypes");

pub(crate) static PARSER_PASSES: Counter = Counter::new("slackline.parser.passes");
pub(crate) static UNRESOLVED_REFERENCES: Counter =
    Counter::new("slackline.parser.unresolved_references");

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("slackline.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("slackline.client.request_errors");

pub(crate) static SUBMISSIONS: Counter = Counter::new("slackline.submit.attempts");
pub(crate) static SUBMISSION_FAILURES: Counter = Counter::new("slackline.submit.failures");
pub(crate) static DRAFTS_DISCARDED: Counter = Counter::new("slackline.submit.drafts_discarded");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&EVENTS_RECEIVED);
    collector.register_counter(&EVENTS_INSERTED);
    collector.register_counter(&EVENTS_EDITED);
    collector.register_counter(&EVENTS_DELETED);
    collector.register_counter(&DUPLICATE_INSERTS);
    collector.register_counter(&STALE_TARGETS);
    collector.register_counter(&RESERVED_EVENTS);
    collector.register_counter(&MALFORMED_DROPPED);
    collector.register_counter(&IGNORED_SUBTYPES);

    collector.register_counter(&PARSER_PASSES);
    collector.register_counter(&UNRESOLVED_REFERENCES);

    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);

    collector.register_counter(&SUBMISSIONS);
    collector.register_counter(&SUBMISSION_FAILURES);
    collector.register_counter(&DRAFTS_DISCARDED);
}
