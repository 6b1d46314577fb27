//! # noteworks-scheduler
//!
//! The background reminder loop: poll the store for due reminders,
//! hand each to the notifier in due-at order, mark delivered, sleep.
//!
//! Polling (rather than a timer per reminder) keeps the loop tolerant
//! of clock jumps, reminders created or cancelled concurrently, and
//! process suspension — on wake, overdue reminders are caught by the
//! next poll instead of lost to a stale timer queue.
//!
//! Errors never escape the loop: a failed due query skips the tick, a
//! failed delivery leaves the reminder pending for the next tick.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use noteworks_core::config::SchedulerConfig;
use noteworks_core::model::DueReminder;
use noteworks_core::traits::{Clock, INoteStore, Notifier};

/// A long-lived scheduler over one store, one notifier, one clock.
/// All collaborators are explicit handles; nothing global.
pub struct ReminderScheduler {
    store: Arc<dyn INoteStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
}

impl ReminderScheduler {
    pub fn new(
        store: Arc<dyn INoteStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            clock,
            config,
        }
    }

    /// Run until cancelled. Cancellation is honored immediately: the
    /// sleep races the token, and the current tick abandons its
    /// remaining deliveries (they stay pending and are caught on the
    /// next run).
    pub async fn run(&self, cancel: CancellationToken) {
        let interval = self.config.poll_interval();
        tracing::info!(poll_interval_secs = interval.as_secs(), "reminder scheduler started");

        while !cancel.is_cancelled() {
            self.tick(&cancel);

            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(interval) => {}
            }
        }

        tracing::info!("reminder scheduler stopped");
    }

    /// One poll-deliver cycle. Returns the number of reminders marked
    /// delivered. Public so tests can single-step the scheduler with
    /// an injected clock and no wall-clock sleeps.
    pub fn tick(&self, cancel: &CancellationToken) -> usize {
        let now = self.clock.now();
        let due = match self.store.due_reminders(now) {
            Ok(due) => due,
            Err(e) => {
                tracing::warn!(error = %e, "due reminder query failed, skipping tick");
                return 0;
            }
        };

        if !due.is_empty() {
            tracing::debug!(count = due.len(), "due reminders found");
        }

        // Sequential delivery preserves due-at ordering and keeps the
        // notifier surface (a shared terminal, typically) single-writer.
        let mut delivered = 0;
        for item in due {
            if cancel.is_cancelled() {
                tracing::debug!("tick abandoned mid-batch on cancellation");
                break;
            }
            if self.deliver_one(&item) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Deliver a single reminder and mark it. Both failure paths leave
    /// the reminder pending and never abort the batch; retries are
    /// unbounded because a repeated reminder is a lesser harm than a
    /// missed one.
    fn deliver_one(&self, item: &DueReminder) -> bool {
        if let Err(e) = self.notifier.deliver(&item.note, &item.reminder) {
            tracing::warn!(
                reminder_id = %item.reminder.id,
                note_title = %item.note.short_title(60),
                error = %e,
                "delivery failed, will retry next tick"
            );
            return false;
        }

        // Mark in a transaction scoped to this reminder alone, stamped
        // at actual delivery time, not at tick start.
        let at = self.clock.now();
        match self.store.mark_delivered(&item.reminder.id, at) {
            Ok(()) => {
                tracing::debug!(reminder_id = %item.reminder.id, "reminder delivered");
                true
            }
            Err(e) => {
                // Cancelled underneath us, or a store hiccup. Either
                // way the loop carries on.
                tracing::warn!(
                    reminder_id = %item.reminder.id,
                    error = %e,
                    "failed to mark reminder delivered"
                );
                false
            }
        }
    }
}
