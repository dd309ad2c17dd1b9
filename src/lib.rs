//! Validation rule engine for OpenRTB bid requests.
//!
//! `bidlint` takes a raw bid-request payload, detects its salient
//! characteristics (ad format, platform, privacy signals, pod structure),
//! runs a versioned catalog of structural and business rules against it,
//! and reports every violation with a stable rule id, a dotted field path,
//! and severity:
//!
//! ```text
//! validate(text) → parse → { detect(payload), rules(payload) } → ValidationResult
//! ```
//!
//! The engine is pure and synchronous: no I/O, no shared mutable state, and
//! a parse failure is the only fatal outcome. Every rule-level finding is
//! collected into the report instead of aborting it.
//!
//! # Quick start
//!
//! ```rust
//! let payload = r#"{
//!   "id": "req-1",
//!   "at": 1,
//!   "imp": [{ "id": "1", "banner": { "w": 300, "h": 250 } }],
//!   "site": { "page": "https://news.example.com/", "publisher": { "id": "pub-9" } }
//! }"#;
//!
//! let report = bidlint::validate(payload).expect("well-formed JSON");
//! for issue in &report.issues {
//!     println!("{}", issue);
//! }
//! ```
//!
//! # Rule generations
//!
//! The catalog carries two overlapping generations of checks, the `Core-*`
//! set and the exchange-specific `EQ-*` set, selectable via
//! [`RuleGroups`]. See [`validate_with`].

pub mod detect;
pub mod error;
pub mod parse;
pub mod paths;
pub mod types;
pub mod validate;

pub(crate) mod geo;
pub(crate) mod stores;

pub use error::*;
pub use types::*;

use serde_json::Value;

/// Validate a raw payload with the full rule catalog (both generations).
///
/// # Errors
///
/// Returns [`ParseError`] if the text is not valid JSON; no partial issue
/// list is produced in that case.
pub fn validate(raw: &str) -> Result<ValidationResult, ParseError> {
    validate_with(raw, RuleGroups::ALL)
}

/// Validate a raw payload, selecting which rule generations run.
pub fn validate_with(raw: &str, groups: RuleGroups) -> Result<ValidationResult, ParseError> {
    let payload = parse::parse(raw)?;
    Ok(validate_value(&payload, groups))
}

/// Validate an already-parsed payload. For callers that hold the JSON tree
/// anyway (batch pipelines, editors with their own parser).
pub fn validate_value(payload: &Value, groups: RuleGroups) -> ValidationResult {
    let detected = detect::detect(payload);
    let issues = validate::run(payload, groups);
    ValidationResult::new(detected, issues)
}
