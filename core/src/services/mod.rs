//! Business services containing domain logic and use cases.

pub mod account;
pub mod clock;
pub mod mail;
pub mod verification;

// Re-export commonly used types
pub use account::{
    AccountService, AccountServiceConfig, EmailConfirmationState, LoginOutcome, PasswordHasher,
    PasswordPolicy, PasswordResetState, RegistrationOutcome,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use mail::{MailMessage, MailSender};
pub use verification::{
    CodeCheck, CodeCodec, CodeHasher, IssueOutcome, VerificationService,
    VerificationServiceConfig,
};
