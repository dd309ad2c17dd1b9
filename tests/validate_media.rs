use bidlint::{Severity, validate};

fn assert_has_issue(input: &str, id: &str) {
    let result = validate(input).expect("payload should parse");
    assert!(
        result.issues.iter().any(|i| i.id == id),
        "expected issue {}, got: {:?}",
        id,
        result.issues.iter().map(|i| &i.id).collect::<Vec<_>>()
    );
}

fn assert_no_issue(input: &str, id: &str) {
    let result = validate(input).expect("payload should parse");
    assert!(
        !result.issues.iter().any(|i| i.id == id),
        "unexpected issue {}",
        id
    );
}

fn video_imp(video_fields: &str) -> String {
    format!(r#"{{"imp": [{{"id": "1", "video": {{{}}}}}]}}"#, video_fields)
}

static COMPLETE_VIDEO: &str = r#""mimes": ["video/mp4"], "minduration": 5, "maxduration": 30,
    "protocols": [2, 3], "w": 1920, "h": 1080, "linearity": 1, "placement": 1,
    "startdelay": 0, "playbackmethod": [1], "api": [2]"#;

// ─── Video ──────────────────────────────────────────────────────────────────

#[test]
fn complete_video_impression_passes() {
    let result = validate(&video_imp(COMPLETE_VIDEO)).expect("parse");
    assert!(
        !result
            .issues
            .iter()
            .any(|i| i.id.starts_with("Video-") && i.severity == Severity::Error),
        "unexpected video errors: {:?}",
        result.issues
    );
}

#[test]
fn empty_video_reports_each_required_field() {
    let result = validate(&video_imp("")).expect("parse");
    for id in [
        "Video-V-001",
        "Video-V-003",
        "Video-V-004",
        "Video-V-006",
        "Video-V-007",
        "Video-V-008",
        "Video-V-009",
        "Video-V-010",
        "Video-V-011",
    ] {
        assert!(
            result.issues.iter().any(|i| i.id == id),
            "expected {} for empty video",
            id
        );
    }
}

#[test]
fn mimes_without_mp4_warns() {
    let input = video_imp(r#""mimes": ["video/webm"]"#);
    let result = validate(&input).expect("parse");
    let issue = result
        .issues
        .iter()
        .find(|i| i.id == "Video-V-002")
        .expect("mp4 warning");
    assert_eq!(issue.severity, Severity::Warning);
}

#[test]
fn duration_ordering_is_enforced() {
    let input = video_imp(r#""minduration": 30, "maxduration": 5"#);
    assert_has_issue(&input, "Video-V-005");
    assert_no_issue(&video_imp(r#""minduration": 5, "maxduration": 5"#), "Video-V-005");
}

#[test]
fn instream_placement_requires_playbackmethod_one() {
    let input = video_imp(r#""placement": 1, "playbackmethod": [2]"#);
    assert_has_issue(&input, "Video-V-012");
    assert_no_issue(&video_imp(r#""placement": 2, "playbackmethod": [2]"#), "Video-V-012");
}

#[test]
fn pod_id_without_duration_warns() {
    assert_has_issue(&video_imp(r#""podid": "pod-1""#), "EQ-Video-002");
    assert_no_issue(&video_imp(r#""podid": "pod-1", "poddur": 90"#), "EQ-Video-002");
}

// ─── Native ─────────────────────────────────────────────────────────────────

fn native_imp(request: &str) -> String {
    let encoded = serde_json::to_string(request).expect("encode");
    format!(r#"{{"imp": [{{"id": "1", "native": {{"request": {}}}}}]}}"#, encoded)
}

#[test]
fn well_formed_native_request_passes() {
    let input = native_imp(
        r#"{"ver": "1.2", "assets": [{"id": 1, "title": {"len": 90}}, {"id": 2, "img": {"w": 300, "h": 250}}]}"#,
    );
    let result = validate(&input).expect("parse");
    assert!(
        !result.issues.iter().any(|i| i.id.starts_with("Native-")),
        "unexpected native issues: {:?}",
        result.issues
    );
}

#[test]
fn native_request_must_be_a_string() {
    let input = r#"{"imp": [{"id": "1", "native": {"request": {"ver": "1.2"}}}]}"#;
    assert_has_issue(input, "Native-N-001");
}

#[test]
fn malformed_inner_json_is_a_finding_not_a_parse_failure() {
    let input = native_imp("{not json");
    let result = validate(&input).expect("outer payload still parses");
    assert!(result.issues.iter().any(|i| i.id == "Native-N-002"));
    assert!(!result.is_valid);
}

#[test]
fn native_assets_are_shape_checked() {
    let input = native_imp(r#"{"ver": "1.2", "assets": [{"title": {}, "img": {}}]}"#);
    let result = validate(&input).expect("parse");
    let ids: Vec<_> = result.issues.iter().map(|i| i.id.as_str()).collect();
    assert!(ids.contains(&"Native-N-005"), "missing asset id: {:?}", ids);
    assert!(ids.contains(&"Native-N-006"), "two asset kinds: {:?}", ids);
}

#[test]
fn native_wrapped_in_native_key_is_accepted() {
    let input = native_imp(
        r#"{"native": {"ver": "1.2", "assets": [{"id": 1, "data": {"type": 2}}]}}"#,
    );
    let result = validate(&input).expect("parse");
    assert!(
        !result.issues.iter().any(|i| i.id.starts_with("Native-")),
        "unexpected: {:?}",
        result.issues
    );
}

// ─── Banner ─────────────────────────────────────────────────────────────────

#[test]
fn banner_needs_dimensions_or_format() {
    assert_has_issue(r#"{"imp": [{"id": "1", "banner": {}}]}"#, "Banner-B-001");
    assert_no_issue(
        r#"{"imp": [{"id": "1", "banner": {"w": 300, "h": 250}}]}"#,
        "Banner-B-001",
    );
    assert_no_issue(
        r#"{"imp": [{"id": "1", "banner": {"format": [{"w": 300, "h": 250}]}}]}"#,
        "Banner-B-001",
    );
}

#[test]
fn banner_format_entries_need_both_dimensions() {
    let input = r#"{"imp": [{"id": "1", "banner": {"format": [{"w": 300}]}}]}"#;
    let result = validate(input).expect("parse");
    let issue = result
        .issues
        .iter()
        .find(|i| i.id == "Banner-B-002")
        .expect("format entry issue");
    assert_eq!(issue.field_path, "imp[0].banner.format[0]");
}

#[test]
fn banner_dimensions_must_be_positive() {
    assert_has_issue(
        r#"{"imp": [{"id": "1", "banner": {"w": 0, "h": 250}}]}"#,
        "Banner-B-003",
    );
}
