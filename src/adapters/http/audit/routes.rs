//! Axum router configuration for audit endpoints.
//!
//! Every route draws from the general rate limit budget. The email and AI
//! routes additionally draw from their own stricter budgets; submission
//! draws from both.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers::{
    assess, generate_ai_summary, health, render_report, send_report, submit_audit, AuditAppState,
};
use crate::adapters::http::middleware::{rate_limit_middleware, RateLimitLayerState};
use crate::ports::{RateLimitResource, RateLimiter};

/// Create the audit API router, suitable for mounting at `/api`.
///
/// # Routes
///
/// ## AI budget
/// - `POST /generateAiSummary` - Narrative for a score digest
///
/// ## Email budget
/// - `POST /send-report` - Email a completed report
///
/// ## AI and email budgets
/// - `POST /audit/submit` - Assess, narrate, and deliver
///
/// ## General budget only
/// - `POST /assess` - Score a set of answers
/// - `POST /report/render` - Render a report (`?format=ui|html|pdf|text`)
pub fn audit_routes(limiter: Arc<dyn RateLimiter>) -> Router<AuditAppState> {
    let budget = |resource| RateLimitLayerState::new(limiter.clone(), resource);

    let ai = Router::new()
        .route("/generateAiSummary", post(generate_ai_summary))
        .route_layer(middleware::from_fn_with_state(
            budget(RateLimitResource::Ai),
            rate_limit_middleware,
        ));

    let email = Router::new()
        .route("/send-report", post(send_report))
        .route_layer(middleware::from_fn_with_state(
            budget(RateLimitResource::Email),
            rate_limit_middleware,
        ));

    let submit = Router::new()
        .route("/audit/submit", post(submit_audit))
        .route_layer(middleware::from_fn_with_state(
            budget(RateLimitResource::Email),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            budget(RateLimitResource::Ai),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/assess", post(assess))
        .route("/report/render", post(render_report))
        .merge(ai)
        .merge(email)
        .merge(submit)
        .layer(middleware::from_fn_with_state(
            budget(RateLimitResource::General),
            rate_limit_middleware,
        ))
}

/// Create the complete audit router: `/api/*` plus `/health`.
///
/// `/health` sits outside the rate limit.
pub fn audit_router(limiter: Arc<dyn RateLimiter>) -> Router<AuditAppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", audit_routes(limiter))
}
