//! Trait seams between the core and its collaborators.

mod clock;
mod notifier;
mod store;

pub use clock::{Clock, SystemClock};
pub use notifier::Notifier;
pub use store::INoteStore;
