//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - LLM completion endpoint used for the narrative
//! - `EmailSender` - Transactional email delivery
//! - `ReportRenderer` - Projects the canonical report into one format
//! - `RateLimiter` - Per-client request budgets

mod ai_provider;
mod email_sender;
mod rate_limiter;
mod report_renderer;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason,
    ProviderInfo, RequestMetadata, TokenUsage,
};
pub use email_sender::{DeliveryReceipt, EmailError, EmailMessage, EmailSender};
pub use rate_limiter::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResource, RateLimitResult,
    RateLimitStatus, RateLimiter,
};
pub use report_renderer::{RenderError, RenderFormat, ReportRenderer};
