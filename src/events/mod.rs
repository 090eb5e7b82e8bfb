//! Game event recording.
//!
//! Every committed mutation appends one or more events to the match's
//! `EventLog`. The log is the only externally observable audit trail of a
//! match: append-only, ordered by turn then insertion.
//!
//! ## Key Types
//!
//! - `EventType`: What happened (`normal_summon`, `lp_changed`, ...)
//! - `NewEvent`: An unstamped event built by engine code
//! - `GameEvent`: A stamped, immutable log entry
//! - `EventLog`: The recorder with query and cursor subscription

mod event;
mod log;

pub use event::{EventType, GameEvent, NewEvent};
pub use log::{EventBatch, EventLog, EventStats};
