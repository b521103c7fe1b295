//! Outbound mail configuration

use serde::{Deserialize, Serialize};

/// Sender identity used for verification mails
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Address placed in the From header
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Product name shown in subjects and bodies
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_address: default_from_address(),
            app_name: default_app_name(),
        }
    }
}

fn default_from_address() -> String {
    String::from("no-reply@envision.local")
}

fn default_app_name() -> String {
    String::from("Envision Analytics")
}
