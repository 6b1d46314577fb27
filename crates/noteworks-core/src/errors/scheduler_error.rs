/// A notifier's failure to present a reminder. Contained by the
/// scheduler loop: the reminder stays pending and is retried on the
/// next tick. Never fatal to the process.
#[derive(Debug, thiserror::Error)]
#[error("delivery failed: {message}")]
pub struct DeliveryError {
    pub message: String,
}

impl DeliveryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
