//! Final cross-object pass (`Advanced-*`): whole-payload macro scan,
//! app/site consistency with `device.ext.is_app`, and extended-ID shape.

use super::first_macro;
use crate::paths::{get_i64, get_str, is_set, lookup};
use crate::types::{Issue, RuleGroups};
use serde_json::Value;

pub(super) fn cross_object(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    if !groups.core {
        return issues;
    }

    // "$" marks the payload root; the scan runs over the serialized form,
    // so the offending token has no narrower field path.
    if let Some(token) = first_macro(&payload.to_string()) {
        issues.push(Issue::error(
            "Advanced-001",
            "$",
            format!("payload contains unresolved macro token {}", token),
        ));
    }

    if let Some(is_app) = get_i64(payload, "device.ext.is_app") {
        let has_app = lookup(payload, "app").is_some_and(Value::is_object);
        let has_site = lookup(payload, "site").is_some_and(Value::is_object);
        if is_app == 1 && !has_app {
            issues.push(
                Issue::error(
                    "Advanced-002",
                    "device.ext.is_app",
                    "device.ext.is_app is 1 but the request carries no app object",
                )
                .with_expected("an app object"),
            );
        } else if is_app == 0 && !has_site {
            issues.push(
                Issue::error(
                    "Advanced-002",
                    "device.ext.is_app",
                    "device.ext.is_app is 0 but the request carries no site object",
                )
                .with_expected("a site object"),
            );
        }
    }

    if let Some(eids) = lookup(payload, "user.eids").and_then(Value::as_array) {
        for (i, eid) in eids.iter().enumerate() {
            if get_str(eid, "source").is_none_or(str::is_empty) {
                issues.push(Issue::error(
                    "Advanced-003",
                    format!("user.eids[{}].source", i),
                    "eid entry must carry a source",
                ));
            }
            match lookup(eid, "uids").and_then(Value::as_array) {
                Some(uids) if !uids.is_empty() => {
                    for (ui, uid) in uids.iter().enumerate() {
                        if !is_set(uid, "id") {
                            issues.push(Issue::error(
                                "Advanced-005",
                                format!("user.eids[{}].uids[{}].id", i, ui),
                                "uid entry must carry an id",
                            ));
                        }
                    }
                }
                _ => issues.push(Issue::error(
                    "Advanced-004",
                    format!("user.eids[{}].uids", i),
                    "eid entry must carry a non-empty uids array",
                )),
            }
        }
    }

    issues
}
