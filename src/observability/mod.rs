//! Observability for planbench
//!
//! - Structured logging (one JSON object per line, on stderr)
//! - Typed lifecycle events
//! - Timed scopes and timers for the bench harness
//!
//! Observability is read-only: it never changes what a plan returns.
//!
//! ```ignore
//! use planbench::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::IndexBuilt, &[("index", "items"), ("entries", "50000")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event_severity(event), event.as_str(), fields);
}

fn event_severity(event: Event) -> Severity {
    if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    }
}
