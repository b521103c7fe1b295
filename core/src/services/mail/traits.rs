//! Trait for mail delivery integration

use async_trait::async_trait;

/// Delivers a rendered message to an address
///
/// Called only after a code was actually issued. A failed send does not
/// roll back the stored token.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String>;
}
