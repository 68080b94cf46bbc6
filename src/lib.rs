//! Workflow Audit - Workflow automation self-assessment service
//!
//! This crate scores a business's answers to a fixed questionnaire, builds a
//! canonical report model from the scores, and renders that model as a web
//! view tree, an HTML email, a PDF, or plain text. An LLM writes the
//! executive summary, with a deterministic fallback when it is unavailable.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
