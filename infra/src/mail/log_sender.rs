//! Log-only mail sender
//!
//! Writes every message to the tracing output instead of handing it to a
//! mail transport. Used in development and tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use ev_core::MailSender;
use ev_shared::validation::{is_valid_email, mask_email};
use tracing::{debug, info, warn};

use crate::InfrastructureError;

/// Mail sender that logs instead of delivering
///
/// - Validates the recipient address
/// - Counts the messages it accepted
/// - Can simulate delivery failures
#[derive(Debug, Clone)]
pub struct LogMailSender {
    from_address: String,
    message_count: Arc<AtomicU64>,
    simulate_failure: Arc<AtomicBool>,
}

impl LogMailSender {
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    /// Total number of messages accepted
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    fn deliver(&self, to: &str, subject: &str, html_body: &str) -> Result<u64, InfrastructureError> {
        if !is_valid_email(to) {
            return Err(InfrastructureError::Mail(format!(
                "Invalid recipient address: {}",
                mask_email(to)
            )));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                target: "mail_service",
                to = %mask_email(to),
                "Log mail sender simulating failure"
            );
            return Err(InfrastructureError::Mail(
                "Simulated mail delivery failure".to_string(),
            ));
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "mail_service",
            event = "mail_sent",
            provider = "log",
            from = %self.from_address,
            to = %mask_email(to),
            subject = %subject,
            message_number = count,
            "Mail accepted"
        );
        // Bodies carry live codes
        debug!(target: "mail_service", body = %html_body, "Mail body");

        Ok(count)
    }
}

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        self.deliver(to, subject, html_body)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accepted_messages() {
        let sender = LogMailSender::new("no-reply@envision.local");

        tokio_test::block_on(async {
            sender.send("ana@example.com", "Confirm your email", "<p>123456</p>").await.unwrap();
            sender.send("bob@example.com", "Reset your password", "<p>654321</p>").await.unwrap();
        });

        assert_eq!(sender.message_count(), 2);
        assert_eq!(sender.from_address(), "no-reply@envision.local");
    }

    #[test]
    fn test_rejects_invalid_recipient() {
        let sender = LogMailSender::new("no-reply@envision.local");

        let err = tokio_test::block_on(sender.send("not-an-address", "Subject", "body")).unwrap_err();

        assert!(err.contains("Invalid recipient"));
        assert_eq!(sender.message_count(), 0);
    }

    #[test]
    fn test_simulated_failure_is_shared_between_clones() {
        let sender = LogMailSender::new("no-reply@envision.local");
        let clone = sender.clone();
        sender.set_simulate_failure(true);

        let result = tokio_test::block_on(clone.send("ana@example.com", "Subject", "body"));

        assert_eq!(result.unwrap_err(), "Mail error: Simulated mail delivery failure");
        assert_eq!(sender.message_count(), 0);
    }
}
