//! Recording notifier used by the test suites.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use afap_core::error::AppError;
use afap_core::result::AppResult;
use afap_core::traits::{NotificationKind, Notifier};

/// One captured notification attempt.
#[derive(Debug, Clone)]
pub struct SentMessage {
    /// Recipient address.
    pub to: String,
    /// Template kind.
    pub kind: NotificationKind,
    /// Template payload.
    pub payload: serde_json::Value,
}

/// Captures every send for assertions; can be armed to fail deliveries so
/// tests can exercise the best-effort policy.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentMessage>>,
    fail_remaining: AtomicU32,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every captured attempt, in dispatch order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().expect("notifier lock poisoned").clone()
    }

    /// Make the next `count` sends fail (the attempt is still recorded).
    pub fn fail_next_sends(&self, count: u32) {
        self.fail_remaining.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        to: &str,
        kind: NotificationKind,
        payload: &serde_json::Value,
    ) -> AppResult<()> {
        self.sent
            .lock()
            .expect("notifier lock poisoned")
            .push(SentMessage {
                to: to.to_string(),
                kind,
                payload: payload.clone(),
            });

        let remaining = self.fail_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(AppError::external_service("Simulated delivery failure"));
        }
        Ok(())
    }
}
