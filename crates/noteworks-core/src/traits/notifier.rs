use crate::errors::DeliveryError;
use crate::model::{Note, Reminder};

/// Presents a due reminder to the user: terminal message, OS toast,
/// screen-reader output; the core does not care how. The contract is
/// a synchronous call-and-acknowledge: `Ok(())` means the reminder was
/// presented and may be marked delivered; an error leaves it pending.
pub trait Notifier: Send + Sync {
    fn deliver(&self, note: &Note, reminder: &Reminder) -> Result<(), DeliveryError>;
}
