//! Diagnostic and report types returned by the engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Issue severity level. Only [`Severity::Error`] affects the overall
/// pass/fail flag; `Info` is part of the taxonomy but currently unused by
/// any catalog rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A single rule violation.
///
/// `id` is a stable identifier drawn from the catalog namespace
/// (`Core-BR-*`, `EQ-Device-*`, `Video-V-*`, …); external tools may filter
/// by prefix. The same rule firing on the same input always yields the same
/// id, path, and message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub severity: Severity,
    /// Dotted/indexed path into the payload, e.g. `imp[0].video.w`.
    pub field_path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_reference: Option<String>,
}

impl Issue {
    pub fn error(id: &str, field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Issue {
            id: id.to_string(),
            severity: Severity::Error,
            field_path: field_path.into(),
            message: message.into(),
            actual_value: None,
            expected_value: None,
            spec_reference: None,
        }
    }

    pub fn warning(id: &str, field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Issue {
            severity: Severity::Warning,
            ..Issue::error(id, field_path, message)
        }
    }

    pub fn with_actual(mut self, value: &Value) -> Self {
        self.actual_value = Some(value.clone());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected_value = Some(expected.into());
        self
    }

    pub fn with_spec(mut self, reference: impl Into<String>) -> Self {
        self.spec_reference = Some(reference.into());
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.id, self.field_path, self.message)
    }
}

/// Ad-pod structure summary for requests auctioning multiple video slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdPodDetails {
    pub slots: usize,
    pub total_duration: i64,
}

/// A human-readable summary of the request, derived before any rule runs.
///
/// Purely descriptive: detection never emits issues and never mutates the
/// payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedCharacteristics {
    /// Comma-joined format labels in first-seen order, or `"Unknown"`.
    pub primary_type: String,
    /// Union of `video.mimes` across all impressions.
    pub media_formats: Vec<String>,
    /// `"Mobile App"` / `"Website"` when `app` / `site` is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Label keyed by `device.devicetype`, OS appended in parentheses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_info: Option<String>,
    /// Privacy regimes signalled by the request (GDPR, TCF, CCPA, GPP).
    pub privacy_signals: Vec<String>,
    pub is_ad_pod: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_pod_details: Option<AdPodDetails>,
}

/// Selects which generations of the rule catalog run.
///
/// The catalog carries two overlapping generations: the `Core-*` set and the
/// exchange-specific `EQ-*` set. A few underlying defects (request id, app
/// bundle presence, device IP presence) are checked by both; with both groups
/// enabled one defect can surface as two issues. The overlap is preserved;
/// callers migrating between generations select one group instead. All other
/// namespaces (`Video-*`, `Native-*`, `Banner-*`, `CTV-*`, `DOOH-*`,
/// `Advanced-*`) are gated by `core`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroups {
    pub core: bool,
    pub eq: bool,
}

impl RuleGroups {
    pub const ALL: RuleGroups = RuleGroups {
        core: true,
        eq: true,
    };
    pub const CORE_ONLY: RuleGroups = RuleGroups {
        core: true,
        eq: false,
    };
    pub const EQ_ONLY: RuleGroups = RuleGroups {
        core: false,
        eq: true,
    };
}

impl Default for RuleGroups {
    fn default() -> Self {
        RuleGroups::ALL
    }
}

/// Full validation report for one payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub detected_characteristics: DetectedCharacteristics,
    /// Deterministic order: validator-invocation order, then emission order
    /// within each validator.
    pub issues: Vec<Issue>,
    /// True iff no issue has [`Severity::Error`].
    pub is_valid: bool,
}

impl ValidationResult {
    pub fn new(detected_characteristics: DetectedCharacteristics, issues: Vec<Issue>) -> Self {
        let is_valid = !issues.iter().any(|i| i.severity == Severity::Error);
        ValidationResult {
            detected_characteristics,
            issues,
            is_valid,
        }
    }

    /// Issues whose rule id starts with the given namespace prefix.
    pub fn issues_with_prefix(&self, prefix: &str) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.id.starts_with(prefix))
    }
}
