use noteworks_core::errors::DeliveryError;
use noteworks_core::model::{Note, Reminder};
use noteworks_core::traits::Notifier;

/// Prints due reminders to stdout. Writing to a closed pipe is the one
/// failure mode; it surfaces as a `DeliveryError` so the reminder stays
/// pending instead of silently vanishing.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn deliver(&self, note: &Note, reminder: &Reminder) -> Result<(), DeliveryError> {
        use std::io::Write;

        let mut out = std::io::stdout().lock();
        writeln!(
            out,
            "[reminder] {} (due {})",
            note.short_title(60),
            reminder.due_at.to_rfc3339()
        )
        .map_err(|e| DeliveryError::new(format!("stdout write failed: {e}")))
    }
}
