//! Messages carrying a verification code.
//!
//! Only the code and its lifetime are interpolated into the body; neither
//! is user-controlled, so no HTML escaping is needed.

use crate::domain::entities::VerificationCode;

use super::traits::MailSender;

/// A rendered mail ready for delivery
#[derive(Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl MailMessage {
    /// Hand the message to a sender
    pub async fn send_with<M: MailSender + ?Sized>(&self, sender: &M) -> Result<(), String> {
        sender.send(&self.to, &self.subject, &self.html_body).await
    }
}

// The body contains a live code.
impl std::fmt::Debug for MailMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailMessage")
            .field("to", &self.to)
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

/// "Confirm your email" message
pub fn email_confirmation(
    app_name: &str,
    to: &str,
    code: &VerificationCode,
    lifetime_minutes: i64,
) -> MailMessage {
    MailMessage {
        to: to.to_string(),
        subject: "Confirm your email".to_string(),
        html_body: render(
            app_name,
            "Use this code to confirm your email address:",
            code,
            lifetime_minutes,
        ),
    }
}

/// "Reset your password" message
pub fn password_reset(
    app_name: &str,
    to: &str,
    code: &VerificationCode,
    lifetime_minutes: i64,
) -> MailMessage {
    MailMessage {
        to: to.to_string(),
        subject: "Reset your password".to_string(),
        html_body: render(
            app_name,
            "Use this code to reset your password:",
            code,
            lifetime_minutes,
        ),
    }
}

fn render(app_name: &str, intro: &str, code: &VerificationCode, lifetime_minutes: i64) -> String {
    format!(
        "<p>{intro}</p>\
         <p style=\"font-size:24px;font-weight:bold;letter-spacing:4px\">{code}</p>\
         <p>The code expires in {lifetime}.</p>\
         <p>If you did not request this, you can ignore this email.</p>\
         <p>{app_name}</p>",
        intro = intro,
        code = code.as_str(),
        lifetime = describe_lifetime(lifetime_minutes),
        app_name = app_name,
    )
}

fn describe_lifetime(minutes: i64) -> String {
    match minutes {
        1 => "1 minute".to_string(),
        60 => "1 hour".to_string(),
        m if m % 60 == 0 => format!("{} hours", m / 60),
        m => format!("{} minutes", m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_confirmation_message() {
        let code = VerificationCode::from("004217");
        let msg = email_confirmation("Envision Analytics", "a@example.com", &code, 1440);

        assert_eq!(msg.to, "a@example.com");
        assert_eq!(msg.subject, "Confirm your email");
        assert!(msg.html_body.contains("004217"));
        assert!(msg.html_body.contains("24 hours"));
        assert!(msg.html_body.contains("Envision Analytics"));
    }

    #[test]
    fn test_password_reset_message() {
        let code = VerificationCode::from("123456");
        let msg = password_reset("Envision Analytics", "a@example.com", &code, 15);

        assert_eq!(msg.subject, "Reset your password");
        assert!(msg.html_body.contains("123456"));
        assert!(msg.html_body.contains("15 minutes"));
    }

    #[test]
    fn test_describe_lifetime() {
        assert_eq!(describe_lifetime(1), "1 minute");
        assert_eq!(describe_lifetime(60), "1 hour");
        assert_eq!(describe_lifetime(120), "2 hours");
        assert_eq!(describe_lifetime(90), "90 minutes");
    }

    #[test]
    fn test_debug_hides_body() {
        let code = VerificationCode::from("654321");
        let msg = password_reset("App", "a@example.com", &code, 15);

        assert!(!format!("{:?}", msg).contains("654321"));
    }
}
