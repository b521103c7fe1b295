//! Outbound mail: the sender collaborator and the code message templates.

mod templates;
mod traits;

pub use templates::{email_confirmation, password_reset, MailMessage};
pub use traits::MailSender;
