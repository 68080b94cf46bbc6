//! Email Adapters - Implementations of the EmailSender port.
//!
//! - `ResendEmailSender` - Resend HTTP API
//! - `MockEmailSender` - In-memory sender for tests

mod mock_sender;
mod resend_sender;

pub use mock_sender::MockEmailSender;
pub use resend_sender::{ResendConfig, ResendEmailSender, DEFAULT_RESEND_URL};
