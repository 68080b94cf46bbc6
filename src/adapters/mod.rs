//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM completion providers (OpenAI, mock)
//! - `email` - Transactional email senders (Resend, mock)
//! - `render` - The four report renderers
//! - `rate_limiter` - Fixed-window rate limiting
//! - `http` - Axum routes, handlers, and middleware

pub mod ai;
pub mod email;
pub mod http;
pub mod rate_limiter;
pub mod render;

pub use rate_limiter::InMemoryRateLimiter;
pub use render::{render_artifact, RenderedArtifact};
