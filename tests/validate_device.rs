use bidlint::{RuleGroups, Severity, validate, validate_with};

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

fn device_request(device_fields: &str) -> String {
    format!(r#"{{"device": {{{}}}}}"#, device_fields)
}

// ─── Device ─────────────────────────────────────────────────────────────────

#[test]
fn geo_country_must_be_three_letter_code() {
    assert_has_issue(&device_request(r#""geo": {"country": "US"}"#), "Core-Device-002");
    assert_no_issue(&device_request(r#""geo": {"country": "USA"}"#), "Core-Device-002");
    assert_has_issue(&device_request(r#""geo": {}"#), "Core-Device-001");
}

#[test]
fn datacenter_continent_mismatch_warns() {
    // Datacenter 3 is Dublin (EU); a Japanese user there is suspicious.
    let input = device_request(
        r#""geo": {"country": "JPN"}, "ext": {"auctionDatacenterId": 3}"#,
    );
    let result = validate(&input).expect("parse");
    let issue = result
        .issues
        .iter()
        .find(|i| i.id == "Core-Device-003")
        .expect("continent mismatch");
    assert_eq!(issue.severity, Severity::Warning);
    assert!(issue.message.contains("Dublin"), "message: {}", issue.message);

    let aligned = device_request(
        r#""geo": {"country": "IRL"}, "ext": {"auctionDatacenterId": 3}"#,
    );
    assert_no_issue(&aligned, "Core-Device-003");
}

#[test]
fn ip_literals_are_validated() {
    assert_has_issue(&device_request(r#""ip": "999.1.1.1""#), "Core-Device-009");
    assert_no_issue(&device_request(r#""ip": "203.0.113.7""#), "Core-Device-009");
    assert_has_issue(&device_request(r#""ipv6": "not-v6""#), "Core-Device-010");
    assert_no_issue(
        &device_request(r#""ipv6": "2001:db8:85a3:8d3:1319:8a2e:370:7348""#),
        "Core-Device-010",
    );
    assert_has_issue(&device_request(r#""ua": "x""#), "Core-Device-008");
}

#[test]
fn missing_ip_is_flagged_by_both_generations() {
    let input = device_request(r#""ua": "x""#);
    assert_has_issue(&input, "Core-Device-008");
    assert_has_issue(&input, "EQ-Device-001");
}

#[test]
fn ifa_required_unless_lmt() {
    assert_has_issue(&device_request(r#""ip": "203.0.113.7""#), "Core-Device-011");
    assert_no_issue(
        &device_request(r#""ip": "203.0.113.7", "lmt": 1"#),
        "Core-Device-011",
    );
}

#[test]
fn zero_ifa_requires_truncated_ip_marker() {
    let zero = r#""ifa": "00000000-0000-0000-0000-000000000000", "ip": "203.0.113.7""#;
    assert_has_issue(&device_request(zero), "Core-Device-012");

    let marked = format!(r#"{}, "ext": {{"truncated_ip": 1}}"#, zero);
    assert_no_issue(&device_request(&marked), "Core-Device-012");
}

#[test]
fn truncated_looking_ip_requires_marker() {
    for ip in [r#""ip": "203.0.113.0""#, r#""ip": "203.0.xxx.7""#, r#""ipv6": "2001::""#] {
        let input = device_request(&format!(r#"{}, "ifa": "abc""#, ip));
        assert_has_issue(&input, "Core-Device-012");
    }
}

// ─── User ───────────────────────────────────────────────────────────────────

#[test]
fn user_without_any_id_warns() {
    assert_has_issue(r#"{"user": {}}"#, "Core-User-001");
    assert_no_issue(r#"{"user": {"buyeruid": "b-1"}}"#, "Core-User-001");
}

#[test]
fn user_country_mismatch_warns() {
    let input = r#"{"user": {"id": "u", "geo": {"country": "FRA"}},
                    "device": {"geo": {"country": "USA"}}}"#;
    assert_has_issue(input, "Core-User-002");
}

// ─── Regs ───────────────────────────────────────────────────────────────────

#[test]
fn gdpr_without_consent_is_an_error_on_the_consent_path() {
    let input = r#"{"regs": {"ext": {"gdpr": 1}}, "user": {"id": "u"}}"#;
    let result = validate(input).expect("parse");
    let issue = result
        .issues
        .iter()
        .find(|i| i.id == "Core-Regs-003")
        .expect("missing consent");
    assert_eq!(issue.field_path, "user.ext.consent");
    assert_eq!(issue.severity, Severity::Error);

    let with_consent =
        r#"{"regs": {"ext": {"gdpr": 1}}, "user": {"ext": {"consent": "CPc8aAAPc8a"}}}"#;
    assert_no_issue(with_consent, "Core-Regs-003");
}

#[test]
fn gdpr_flag_at_regs_root_is_accepted_too() {
    assert_has_issue(r#"{"regs": {"gdpr": 1}}"#, "Core-Regs-003");
    assert_has_issue(r#"{"regs": {"gdpr": 2}}"#, "Core-Regs-002");
}

#[test]
fn coppa_must_be_binary() {
    assert_has_issue(r#"{"regs": {"coppa": "yes"}}"#, "Core-Regs-001");
    assert_no_issue(r#"{"regs": {"coppa": 1}}"#, "Core-Regs-001");
}

#[test]
fn gpp_requires_section_ids() {
    assert_has_issue(r#"{"regs": {"gpp": "DBABM~abc"}}"#, "Core-Regs-004");
    assert_no_issue(r#"{"regs": {"gpp": "DBABM~abc", "gpp_sid": [7]}}"#, "Core-Regs-004");
    assert_has_issue(r#"{"regs": {"gpp_sid": "7"}}"#, "Core-Regs-006");
}

#[test]
fn us_privacy_format_warns() {
    assert_has_issue(r#"{"regs": {"ext": {"us_privacy": "1YNN-extra"}}}"#, "Core-Regs-005");
    assert_no_issue(r#"{"regs": {"ext": {"us_privacy": "1YNN"}}}"#, "Core-Regs-005");
}

// ─── Source / supply chain ──────────────────────────────────────────────────

#[test]
fn schain_is_required_and_must_be_complete() {
    assert_has_issue(r#"{"source": {}}"#, "Core-Source-001");
    assert_has_issue(
        r#"{"source": {"schain": {"complete": 0, "nodes": [{"asi": "a", "sid": "s", "hp": 1}]}}}"#,
        "Core-Source-002",
    );
}

#[test]
fn schain_nodes_must_carry_identity_fields() {
    let input = r#"{"source": {"schain": {"complete": 1, "nodes": [{"asi": "exchange.com"}]}}}"#;
    let result = validate(input).expect("parse");
    let ids: Vec<_> = result.issues.iter().map(|i| i.id.as_str()).collect();
    assert!(ids.contains(&"Core-Source-005"), "missing sid: {:?}", ids);
    assert!(ids.contains(&"Core-Source-006"), "missing hp: {:?}", ids);
    assert!(!ids.contains(&"Core-Source-004"), "asi present: {:?}", ids);
}

#[test]
fn empty_schain_nodes_is_rejected() {
    assert_has_issue(
        r#"{"source": {"schain": {"complete": 1, "nodes": []}}}"#,
        "Core-Source-003",
    );
}

#[test]
fn schain_ver_is_checked_with_core_disabled() {
    let input = r#"{"source": {"schain": {"complete": 1, "ver": "2.0",
                    "nodes": [{"asi": "a.com", "sid": "1", "hp": 1}]}}}"#;
    for groups in [RuleGroups::ALL, RuleGroups::EQ_ONLY] {
        let result = validate_with(input, groups).expect("parse");
        assert!(
            result.issues.iter().any(|i| i.id == "EQ-Source-002"),
            "expected EQ-Source-002 with groups {:?}, got {:?}",
            groups,
            result.issues.iter().map(|i| &i.id).collect::<Vec<_>>()
        );
    }
    let eq_only = validate_with(input, RuleGroups::EQ_ONLY).expect("parse");
    assert!(eq_only.issues.iter().all(|i| !i.id.starts_with("Core-")));
}

#[test]
fn schain_under_source_ext_is_found() {
    assert_no_issue(
        r#"{"source": {"ext": {"schain": {"complete": 1,
            "nodes": [{"asi": "a.com", "sid": "1", "hp": 1}]}}}}"#,
        "Core-Source-001",
    );
}
