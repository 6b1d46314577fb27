//! # noteworks-core
//!
//! Foundation crate for the noteworks record keeper.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod model;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{AppConfig, SchedulerConfig};
pub use errors::{NoteworksError, NoteworksResult};
pub use model::{DueReminder, NewNote, Note, NoteUpdate, Reminder};
pub use traits::{Clock, INoteStore, Notifier, SystemClock};
