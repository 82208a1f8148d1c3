//! Validation and filtering system
//!
//! Submitted form payloads pass through per-field filters (trimming,
//! coercion) and then per-field validators before they reach the review
//! ledger. Nothing is applied unless every field passes.

pub mod config;
pub mod filters;
pub mod form;
pub mod validators;

pub use config::ValidationConfig;
pub use form::ReviewForm;
