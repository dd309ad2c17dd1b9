//! Media-object categories: Video (`Video-V-*` / `EQ-Video-*`), Native
//! (`Native-N-*`), and Banner (`Banner-B-*`).

use super::imp_objects;
use crate::paths::{is_set, lookup};
use crate::types::{Issue, RuleGroups};
use serde_json::Value;

fn is_integer(value: &Value) -> bool {
    value.as_i64().is_some()
}

fn positive_integer(value: Option<&Value>) -> bool {
    value.and_then(Value::as_i64).is_some_and(|n| n > 0)
}

pub(super) fn video(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (i, imp) in imp_objects(payload) {
        let Some(video) = imp.get("video").filter(|v| v.is_object()) else {
            continue;
        };
        let at = |field: &str| format!("imp[{}].video.{}", i, field);

        if groups.core {
            match video.get("mimes").and_then(Value::as_array) {
                Some(mimes) if !mimes.is_empty() && mimes.iter().all(Value::is_string) => {
                    if !mimes.iter().any(|m| m.as_str() == Some("video/mp4")) {
                        issues.push(
                            Issue::warning(
                                "Video-V-002",
                                at("mimes"),
                                "mimes should include video/mp4",
                            )
                            .with_actual(&video["mimes"]),
                        );
                    }
                }
                _ => issues.push(Issue::error(
                    "Video-V-001",
                    at("mimes"),
                    "video.mimes must be a non-empty array of MIME strings",
                )),
            }

            let minduration = video.get("minduration");
            let maxduration = video.get("maxduration");
            if !minduration.is_some_and(is_integer) {
                issues.push(Issue::error(
                    "Video-V-003",
                    at("minduration"),
                    "video.minduration must be an integer",
                ));
            }
            if !maxduration.is_some_and(is_integer) {
                issues.push(Issue::error(
                    "Video-V-004",
                    at("maxduration"),
                    "video.maxduration must be an integer",
                ));
            }
            if let (Some(min), Some(max)) = (
                minduration.and_then(Value::as_i64),
                maxduration.and_then(Value::as_i64),
            ) && max < min
            {
                issues.push(
                    Issue::error(
                        "Video-V-005",
                        at("maxduration"),
                        format!("maxduration {} is less than minduration {}", max, min),
                    )
                    .with_expected(format!(">= {}", min)),
                );
            }

            let protocols_ok = video
                .get("protocols")
                .and_then(Value::as_array)
                .is_some_and(|p| !p.is_empty());
            if !protocols_ok {
                issues.push(Issue::error(
                    "Video-V-006",
                    at("protocols"),
                    "video.protocols must be a non-empty array",
                ));
            }

            if !positive_integer(video.get("w")) {
                issues.push(Issue::error(
                    "Video-V-007",
                    at("w"),
                    "video.w must be a positive integer",
                ));
            }
            if !positive_integer(video.get("h")) {
                issues.push(Issue::error(
                    "Video-V-008",
                    at("h"),
                    "video.h must be a positive integer",
                ));
            }

            for (rule, field) in [
                ("Video-V-009", "linearity"),
                ("Video-V-010", "placement"),
                ("Video-V-011", "startdelay"),
            ] {
                if !video.get(field).is_some_and(is_integer) {
                    issues.push(Issue::error(
                        rule,
                        at(field),
                        format!("video.{} must be an integer", field),
                    ));
                }
            }

            if video.get("placement").and_then(Value::as_i64) == Some(1) {
                let has_auto_play = video
                    .get("playbackmethod")
                    .and_then(Value::as_array)
                    .is_some_and(|p| p.iter().any(|m| m.as_i64() == Some(1)));
                if !has_auto_play {
                    issues.push(
                        Issue::error(
                            "Video-V-012",
                            at("playbackmethod"),
                            "in-stream placement requires playbackmethod to include 1",
                        )
                        .with_expected("an array containing 1"),
                    );
                }
            }
        }

        if groups.eq {
            if !is_set(video, "api") {
                issues.push(Issue::warning(
                    "EQ-Video-001",
                    at("api"),
                    "video.api frameworks are recommended",
                ));
            }
            if is_set(video, "podid") && !is_set(video, "poddur") {
                issues.push(Issue::warning(
                    "EQ-Video-002",
                    at("poddur"),
                    "video.poddur should accompany video.podid",
                ));
            }
        }
    }
    issues
}

pub(super) fn native(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    if !groups.core {
        return issues;
    }
    for (i, imp) in imp_objects(payload) {
        let Some(native) = imp.get("native").filter(|v| v.is_object()) else {
            continue;
        };
        let path = format!("imp[{}].native.request", i);

        let Some(request) = native.get("request").and_then(Value::as_str) else {
            issues.push(Issue::error(
                "Native-N-001",
                path,
                "native.request must be a string",
            ));
            continue;
        };

        // A malformed inner payload is a finding, not a fatal error; only
        // the outermost parse can abort the pipeline.
        let parsed: Value = match serde_json::from_str(request) {
            Ok(v) => v,
            Err(e) => {
                issues.push(Issue::error(
                    "Native-N-002",
                    path,
                    format!("native.request is not valid JSON: {}", e),
                ));
                continue;
            }
        };
        // The native payload is sometimes wrapped in a top-level "native"
        // object; accept both forms.
        let inner = parsed.get("native").filter(|v| v.is_object()).unwrap_or(&parsed);

        if !is_set(inner, "ver") {
            issues.push(Issue::error(
                "Native-N-003",
                format!("{}.ver", path),
                "native request must declare ver",
            ));
        }

        match lookup(inner, "assets").and_then(Value::as_array) {
            Some(assets) if !assets.is_empty() => {
                for (ai, asset) in assets.iter().enumerate() {
                    let asset_path = format!("{}.assets[{}]", path, ai);
                    if !is_set(asset, "id") {
                        issues.push(Issue::error(
                            "Native-N-005",
                            format!("{}.id", asset_path),
                            "native asset must carry an id",
                        ));
                    }
                    let kinds = ["title", "img", "video", "data"]
                        .iter()
                        .filter(|k| asset.get(**k).is_some_and(|v| !v.is_null()))
                        .count();
                    if kinds != 1 {
                        issues.push(Issue::error(
                            "Native-N-006",
                            asset_path,
                            format!(
                                "native asset must carry exactly one of title, img, video, or data, found {}",
                                kinds
                            ),
                        ));
                    }
                }
            }
            _ => issues.push(Issue::error(
                "Native-N-004",
                format!("{}.assets", path),
                "native request must carry a non-empty assets array",
            )),
        }
    }
    issues
}

pub(super) fn banner(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    if !groups.core {
        return issues;
    }
    for (i, imp) in imp_objects(payload) {
        let Some(banner) = imp.get("banner").filter(|v| v.is_object()) else {
            continue;
        };
        let at = |field: &str| format!("imp[{}].banner.{}", i, field);

        let has_wh = banner.get("w").is_some_and(|v| !v.is_null())
            && banner.get("h").is_some_and(|v| !v.is_null());
        let format_entries = banner.get("format").and_then(Value::as_array);
        let has_format = format_entries.is_some_and(|f| !f.is_empty());

        if !has_wh && !has_format {
            issues.push(Issue::error(
                "Banner-B-001",
                format!("imp[{}].banner", i),
                "banner must carry w/h or a non-empty format array",
            ));
        }

        if let Some(formats) = format_entries {
            for (fi, format) in formats.iter().enumerate() {
                if !is_set(format, "w") || !is_set(format, "h") {
                    issues.push(Issue::error(
                        "Banner-B-002",
                        format!("imp[{}].banner.format[{}]", i, fi),
                        "banner format entry must carry both w and h",
                    ));
                }
            }
        }

        for field in ["w", "h"] {
            if let Some(value) = banner.get(field)
                && !value.is_null()
                && !value.as_i64().is_some_and(|n| n > 0)
            {
                issues.push(
                    Issue::error(
                        "Banner-B-003",
                        at(field),
                        format!("banner.{} must be a positive integer", field),
                    )
                    .with_actual(value),
                );
            }
        }
    }
    issues
}
