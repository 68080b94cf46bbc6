//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `assessment` - Question bank, answers, scoring engine, recommendation table
//! - `report` - Canonical section model and the builder that produces it
//! - `narrative` - Prompt and fallback text for the executive summary

pub mod assessment;
pub mod narrative;
pub mod report;
