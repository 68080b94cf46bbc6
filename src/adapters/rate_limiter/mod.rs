//! Rate limiter adapters.
//!
//! Implementations of the RateLimiter port.
//!
//! - `InMemoryRateLimiter` - Fixed-window counters held in process memory
//!
//! ## Usage
//!
//! ```ignore
//! use workflow_audit::adapters::rate_limiter::InMemoryRateLimiter;
//! use workflow_audit::config::RateLimitConfig;
//!
//! let limiter = InMemoryRateLimiter::new(RateLimitConfig::default());
//! ```

mod in_memory;

pub use in_memory::InMemoryRateLimiter;
