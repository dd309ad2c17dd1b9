//! Request-level and impression-level categories
//! (`Core-BR-*` / `EQ-BR-*` / `Core-Imp-*` / `EQ-Imp-*`).

use super::imp_objects;
use crate::paths::{get_array, get_str, is_binary_flag, lookup};
use crate::types::{Issue, RuleGroups};
use serde_json::Value;
use std::collections::HashSet;

pub(super) fn core_request(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();

    if groups.core {
        match lookup(payload, "id") {
            Some(Value::String(id)) if !id.is_empty() => {}
            Some(other) => issues.push(
                Issue::error("Core-BR-001", "id", "request id must be a non-empty string")
                    .with_actual(other)
                    .with_spec("OpenRTB 2.6 §3.2.1"),
            ),
            None => issues.push(
                Issue::error("Core-BR-001", "id", "request id is required")
                    .with_spec("OpenRTB 2.6 §3.2.1"),
            ),
        }

        match lookup(payload, "imp") {
            Some(Value::Array(imps)) if !imps.is_empty() => {}
            Some(Value::Array(_)) => issues.push(Issue::error(
                "Core-BR-002",
                "imp",
                "imp array must contain at least one impression",
            )),
            Some(other) => issues.push(
                Issue::error("Core-BR-002", "imp", "imp must be an array of impressions")
                    .with_actual(other),
            ),
            None => issues.push(Issue::error("Core-BR-002", "imp", "imp array is required")),
        }

        match lookup(payload, "at") {
            Some(at) if at.is_number() => {}
            Some(other) => issues.push(
                Issue::error("Core-BR-003", "at", "auction type must be numeric")
                    .with_actual(other),
            ),
            None => issues.push(Issue::error(
                "Core-BR-003",
                "at",
                "auction type (at) is required",
            )),
        }

        let has_site = lookup(payload, "site").is_some_and(Value::is_object);
        let has_app = lookup(payload, "app").is_some_and(Value::is_object);
        if !has_site && !has_app {
            issues.push(
                Issue::error(
                    "Core-BR-004",
                    "site/app",
                    "exactly one of site or app is required, found neither",
                )
                .with_spec("OpenRTB 2.6 §3.2.1"),
            );
        } else if has_site && has_app {
            issues.push(Issue::error(
                "Core-BR-005",
                "site/app",
                "site and app are mutually exclusive, found both",
            ));
        }

        if let Some(test) = lookup(payload, "test")
            && !is_binary_flag(test)
        {
            issues.push(
                Issue::warning("Core-BR-006", "test", "test flag must be 0 or 1")
                    .with_actual(test)
                    .with_expected("0 or 1"),
            );
        }

        if let Some(tmax) = lookup(payload, "tmax")
            && !tmax.as_f64().is_some_and(|t| t > 0.0)
        {
            issues.push(
                Issue::warning("Core-BR-007", "tmax", "tmax should be a positive number")
                    .with_actual(tmax),
            );
        }

        if let Some(cur) = lookup(payload, "cur") {
            let well_formed = cur
                .as_array()
                .is_some_and(|a| !a.is_empty() && a.iter().all(Value::is_string));
            if !well_formed {
                issues.push(
                    Issue::warning(
                        "Core-BR-008",
                        "cur",
                        "cur should be a non-empty array of currency codes",
                    )
                    .with_actual(cur),
                );
            }
        }

        for (rule, field) in [
            ("Core-BR-009", "device"),
            ("Core-BR-010", "user"),
            ("Core-BR-011", "source"),
        ] {
            if !lookup(payload, field).is_some_and(Value::is_object) {
                issues.push(Issue::error(
                    rule,
                    field,
                    format!("{} object is required", field),
                ));
            }
        }
    }

    if groups.eq {
        if let Some(called) = lookup(payload, "ext.partnerIsCalled")
            && called != &Value::Bool(true)
        {
            issues.push(
                Issue::error(
                    "EQ-BR-001",
                    "ext.partnerIsCalled",
                    "ext.partnerIsCalled must equal true when present",
                )
                .with_actual(called)
                .with_expected("true"),
            );
        }

        // Second-generation presence check, overlaps Core-BR-001 on purpose.
        if get_str(payload, "id").is_none_or(str::is_empty) {
            issues.push(Issue::error(
                "EQ-BR-002",
                "id",
                "request id is required by the exchange",
            ));
        }

        if let Some(at) = lookup(payload, "at").and_then(Value::as_i64)
            && at != 1
            && at != 2
        {
            issues.push(
                Issue::warning("EQ-BR-003", "at", "auction type should be 1 or 2")
                    .with_expected("1 (first price) or 2 (second price)"),
            );
        }
    }

    issues
}

pub(super) fn impressions(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    let Some(imps) = get_array(payload, "imp") else {
        return issues;
    };

    if groups.eq {
        for (i, imp) in imps.iter().enumerate() {
            if !imp.is_object() {
                issues.push(
                    Issue::error(
                        "EQ-Imp-001",
                        format!("imp[{}]", i),
                        "impression entry must be an object",
                    )
                    .with_actual(imp),
                );
            }
        }
    }

    let mut seen_ids: HashSet<&str> = HashSet::new();
    for (i, imp) in imp_objects(payload) {
        if groups.core {
            match get_str(imp, "id") {
                Some(id) if !id.is_empty() => {
                    if !seen_ids.insert(id) {
                        issues.push(
                            Issue::error(
                                "Core-Imp-002",
                                format!("imp[{}].id", i),
                                format!("duplicate impression id '{}'", id),
                            )
                            .with_actual(&imp["id"]),
                        );
                    }
                }
                _ => issues.push(Issue::error(
                    "Core-Imp-001",
                    format!("imp[{}].id", i),
                    "impression id must be a non-empty string",
                )),
            }

            let media_count = ["video", "native", "banner"]
                .iter()
                .filter(|key| imp.get(**key).is_some_and(|v| !v.is_null()))
                .count();
            if media_count == 0 {
                issues.push(Issue::error(
                    "Core-Imp-003",
                    format!("imp[{}]", i),
                    "impression must carry exactly one of video, native, or banner, found none",
                ));
            } else if media_count > 1 {
                issues.push(Issue::error(
                    "Core-Imp-004",
                    format!("imp[{}]", i),
                    format!(
                        "impression must carry exactly one of video, native, or banner, found {}",
                        media_count
                    ),
                ));
            }

            if let Some(bidfloor) = imp.get("bidfloor")
                && !bidfloor.is_null()
            {
                if !bidfloor.as_f64().is_some_and(|f| f >= 0.0) {
                    issues.push(
                        Issue::error(
                            "Core-Imp-005",
                            format!("imp[{}].bidfloor", i),
                            "bidfloor must be a non-negative number",
                        )
                        .with_actual(bidfloor),
                    );
                }
                if get_str(imp, "bidfloorcur").is_none() {
                    issues.push(Issue::error(
                        "Core-Imp-006",
                        format!("imp[{}].bidfloorcur", i),
                        "bidfloorcur must accompany bidfloor",
                    ));
                }
            }
        }

        if groups.eq
            && let Some(cur) = get_str(imp, "bidfloorcur")
        {
            let uppercase_3 = cur.len() == 3 && cur.bytes().all(|b| b.is_ascii_uppercase());
            if !uppercase_3 {
                issues.push(
                    Issue::warning(
                        "EQ-Imp-002",
                        format!("imp[{}].bidfloorcur", i),
                        "bidfloorcur should be a 3-letter ISO-4217 code",
                    )
                    .with_actual(&imp["bidfloorcur"])
                    .with_expected("e.g. USD"),
                );
            }
        }

        if groups.core
            && let Some(secure) = imp.get("secure")
            && !secure.is_null()
            && !is_binary_flag(secure)
        {
            issues.push(
                Issue::warning(
                    "Core-Imp-007",
                    format!("imp[{}].secure", i),
                    "secure flag must be 0 or 1",
                )
                .with_actual(secure)
                .with_expected("0 or 1"),
            );
        }
    }

    issues
}
