//! The category rule catalog.
//!
//! One submodule per group of related bid-request objects. Every category
//! validator is a pure function `(payload, groups) -> Vec<Issue>`: it
//! receives the full payload (several checks are cross-object), never
//! panics on missing or oddly-shaped fields, and returns all findings
//! rather than stopping at the first. The orchestrator concatenates the
//! per-category sequences in a fixed order, which keeps issue ordering
//! deterministic and the validators independently testable.

mod advanced;
mod device;
mod inventory;
mod media;
mod profiles;
mod request;

use crate::types::{Issue, RuleGroups};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Unresolved macro token: an uppercase placeholder in square or curly
/// brackets (`[CACHEBUSTER]`, `{TIMESTAMP}`, `{{DEVICE_ID}}`) that should
/// have been substituted before the request was sent. Array brackets in
/// serialized JSON never match because their content is quoted.
pub(crate) static MACRO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[A-Z][A-Z0-9_]*\]|\{\{?[A-Z][A-Z0-9_]*\}\}?").unwrap());

/// Well-formed http(s) URL: scheme, host with at least one label, optional
/// port/path/query.
pub(crate) static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)*(:\d+)?(/\S*)?(\?\S*)?$").unwrap()
});

pub(crate) fn contains_macro(text: &str) -> bool {
    MACRO_RE.is_match(text)
}

pub(crate) fn first_macro(text: &str) -> Option<&str> {
    MACRO_RE.find(text).map(|m| m.as_str())
}

/// The impression entries that are JSON objects, with their indices.
/// Non-object entries are reported separately (`EQ-Imp-001`) and skipped by
/// every per-impression check.
pub(crate) fn imp_objects(payload: &Value) -> Vec<(usize, &Value)> {
    crate::paths::get_array(payload, "imp")
        .map(|imps| {
            imps.iter()
                .enumerate()
                .filter(|(_, imp)| imp.is_object())
                .collect()
        })
        .unwrap_or_default()
}

/// Run the full rule catalog against a parsed payload.
///
/// Category order is fixed: Core request, Impression, App, Site, Device,
/// User, Regs, Source, Video, Native, Banner, CTV profile, DOOH profile,
/// Advanced cross-object pass.
pub fn run(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(request::core_request(payload, groups));
    issues.extend(request::impressions(payload, groups));
    issues.extend(inventory::app(payload, groups));
    issues.extend(inventory::site(payload, groups));
    issues.extend(device::device(payload, groups));
    issues.extend(device::user(payload, groups));
    issues.extend(device::regs(payload, groups));
    issues.extend(device::source(payload, groups));
    issues.extend(media::video(payload, groups));
    issues.extend(media::native(payload, groups));
    issues.extend(media::banner(payload, groups));
    issues.extend(profiles::ctv(payload, groups));
    issues.extend(profiles::dooh(payload, groups));
    issues.extend(advanced::cross_object(payload, groups));
    issues
}
