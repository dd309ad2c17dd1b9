//! Device-class profiles: Connected TV (`CTV-*` / `EQ-CTV-*`, triggered by
//! devicetype 5) and Digital Out-of-Home (`DOOH-*`, devicetype 6). Profiles
//! layer stricter requirements on top of the core categories.

use super::imp_objects;
use crate::paths::{get_i64, get_str, is_set, lookup};
use crate::types::{Issue, RuleGroups};
use serde_json::Value;

/// Width/height tolerance around the 16:9 CTV target ratio.
const CTV_ASPECT: f64 = 16.0 / 9.0;
const CTV_ASPECT_TOLERANCE: f64 = 0.1;

/// Platform-specific device identifiers accepted in place of `ifa` on CTV.
static CTV_EXT_IDS: &[&str] = &["ext.rida", "ext.idfa", "ext.gaid", "ext.afai"];

pub(super) fn ctv(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    if get_i64(payload, "device.devicetype") != Some(5) {
        return issues;
    }

    let video_imps: Vec<(usize, &Value)> = imp_objects(payload)
        .into_iter()
        .filter(|(_, imp)| imp.get("video").is_some_and(Value::is_object))
        .collect();

    if groups.core {
        if !lookup(payload, "app").is_some_and(Value::is_object) {
            issues.push(Issue::error(
                "CTV-001",
                "app",
                "CTV requests must carry an app object",
            ));
        }

        if video_imps.is_empty() {
            issues.push(Issue::error(
                "CTV-002",
                "imp",
                "CTV requests must carry at least one video impression",
            ));
        }

        let device = lookup(payload, "device").filter(|v| v.is_object());
        if let Some(device) = device {
            let has_ifa = get_str(device, "ifa").is_some_and(|s| !s.is_empty());
            let has_ext_id = CTV_EXT_IDS.iter().any(|path| is_set(device, path));
            if !has_ifa && !has_ext_id {
                issues.push(
                    Issue::error(
                        "CTV-003",
                        "device.ifa",
                        "CTV requests must carry a device identifier",
                    )
                    .with_expected("device.ifa or a platform id in device.ext"),
                );
            }

            for (rule, field) in [("CTV-004", "make"), ("CTV-005", "model")] {
                if get_str(device, field).is_none_or(str::is_empty) {
                    issues.push(Issue::error(
                        rule,
                        format!("device.{}", field),
                        format!("CTV requests must carry device.{}", field),
                    ));
                }
            }
        }

        for (i, imp) in &video_imps {
            let video = &imp["video"];
            let at = |field: &str| format!("imp[{}].video.{}", i, field);

            for (rule, field, required) in [
                ("CTV-006", "placement", 1),
                ("CTV-007", "linearity", 1),
                ("CTV-008", "pos", 7),
            ] {
                let actual = video.get(field);
                if actual.and_then(Value::as_i64) != Some(required) {
                    let mut issue = Issue::error(
                        rule,
                        at(field),
                        format!("CTV video {} must be {}", field, required),
                    )
                    .with_expected(required.to_string());
                    if let Some(actual) = actual {
                        issue = issue.with_actual(actual);
                    }
                    issues.push(issue);
                }
            }

            if let (Some(w), Some(h)) = (
                video.get("w").and_then(Value::as_i64),
                video.get("h").and_then(Value::as_i64),
            ) && w > 0
                && h > 0
            {
                let ratio = w as f64 / h as f64;
                if (ratio - CTV_ASPECT).abs() > CTV_ASPECT_TOLERANCE {
                    issues.push(
                        Issue::error(
                            "CTV-009",
                            at("w"),
                            format!(
                                "aspect ratio {:.2}:1 for {}x{} is outside the 16:9 CTV target",
                                ratio, w, h
                            ),
                        )
                        .with_expected("16:9 (±0.1)"),
                    );
                }
            }
        }
    }

    if groups.eq && !is_set(payload, "device.ext.ifa_type") {
        issues.push(Issue::warning(
            "EQ-CTV-001",
            "device.ext.ifa_type",
            "device.ext.ifa_type is recommended on CTV",
        ));
    }

    issues
}

pub(super) fn dooh(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    if !groups.core || get_i64(payload, "device.devicetype") != Some(6) {
        return issues;
    }

    // dooh metadata may sit at the request level or per impression.
    let mut dooh_objects: Vec<(String, &Value)> = Vec::new();
    if let Some(dooh) = lookup(payload, "dooh").filter(|v| v.is_object()) {
        dooh_objects.push(("dooh".to_string(), dooh));
    }
    for (i, imp) in imp_objects(payload) {
        if let Some(dooh) = imp.get("dooh").filter(|v| v.is_object()) {
            dooh_objects.push((format!("imp[{}].dooh", i), dooh));
        }
    }

    if dooh_objects.is_empty() {
        issues.push(Issue::error(
            "DOOH-001",
            "dooh",
            "DOOH requests must carry a dooh object at the request or impression level",
        ));
        return issues;
    }

    for (path, dooh) in &dooh_objects {
        if !is_set(dooh, "venuetype") {
            issues.push(Issue::error(
                "DOOH-002",
                format!("{}.venuetype", path),
                "dooh.venuetype is required",
            ));
        }
        if !is_set(dooh, "venuetypetax") {
            issues.push(Issue::warning(
                "DOOH-003",
                format!("{}.venuetypetax", path),
                "dooh.venuetypetax is recommended",
            ));
        }
    }

    for (i, imp) in imp_objects(payload) {
        if !is_set(imp, "qty") {
            issues.push(Issue::warning(
                "DOOH-004",
                format!("imp[{}].qty", i),
                "imp.qty is recommended for DOOH multi-screen delivery",
            ));
        }
    }

    issues
}
