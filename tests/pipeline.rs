use bidlint::{ParseErrorKind, RuleGroups, Severity, validate, validate_with};

#[test]
fn malformed_json_is_fatal_and_yields_no_result() {
    let err = validate(r#"{"id": "req-1", "imp": ["#).expect_err("must not parse");
    assert_eq!(err.kind, ParseErrorKind::Eof);
    assert!(err.line.is_some());

    let err = validate(r#"{"id": req}"#).expect_err("must not parse");
    assert_eq!(err.kind, ParseErrorKind::Syntax);
}

#[test]
fn empty_input_is_a_distinct_parse_failure() {
    for input in ["", "   ", "\n\t"] {
        let err = validate(input).expect_err("empty input must not parse");
        assert_eq!(err.kind, ParseErrorKind::Eof);
        assert_eq!(err.line, None);
    }
}

#[test]
fn non_object_root_parses_and_degrades_to_findings() {
    // A JSON array or scalar at the root is well-formed JSON, so parsing
    // succeeds and every missing-object rule fires instead.
    for input in ["[]", "42", r#""text""#, "null"] {
        let result = validate(input).expect("well-formed JSON");
        assert!(!result.is_valid, "{} should not validate", input);
        assert!(result.issues.iter().any(|i| i.id == "Core-BR-001"));
    }
}

#[test]
fn is_valid_tracks_error_severity_only() {
    // test=3 raises a lone warning on an otherwise complete request.
    let input = r#"{
      "id": "req-1", "at": 1, "tmax": 120, "cur": ["USD"], "test": 3,
      "imp": [{"id": "1", "banner": {"w": 300, "h": 250}, "bidfloor": 0.5,
               "bidfloorcur": "USD", "secure": 1}],
      "site": {"page": "https://news.example.com/", "domain": "news.example.com",
               "publisher": {"id": "pub-9"}},
      "device": {"ua": "Mozilla/5.0", "make": "Apple", "model": "iPhone",
                 "os": "iOS", "devicetype": 1, "ip": "203.0.113.7",
                 "ifa": "6D92078A-8246-4BA4-AE5B-76104861E7DC",
                 "language": "en", "geo": {"country": "USA"}},
      "user": {"id": "u-1"},
      "source": {"tid": "t-1", "schain": {"complete": 1, "ver": "1.0",
                 "nodes": [{"asi": "exchange.com", "sid": "1234", "hp": 1}]}},
      "regs": {"coppa": 0, "ext": {"gdpr": 0}}
    }"#;
    let result = validate(input).expect("parse");
    assert!(result.issues.iter().any(|i| i.severity == Severity::Warning));
    assert!(
        result.issues.iter().all(|i| i.severity != Severity::Error),
        "unexpected errors: {:?}",
        result.issues
    );
    assert!(result.is_valid);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let input = r#"{"id": "", "imp": [{"banner": {}}, 7],
                    "app": {"bundle": "[MACRO]"}, "site": {},
                    "device": {"devicetype": 5, "ip": "999.9.9.9"}}"#;
    let first = validate(input).expect("parse");
    for _ in 0..3 {
        let again = validate(input).expect("parse");
        assert_eq!(first, again);
    }
    let encoded_first = serde_json::to_string(&first).expect("encode");
    let encoded_again =
        serde_json::to_string(&validate(input).expect("parse")).expect("encode");
    assert_eq!(encoded_first, encoded_again);
}

#[test]
fn issue_order_follows_category_then_emission_order() {
    let result = validate(r#"{"imp": [{"banner": {}}]}"#).expect("parse");
    let positions: Vec<usize> = ["Core-BR-001", "Core-Imp-001", "Banner-B-001"]
        .iter()
        .map(|id| {
            result
                .issues
                .iter()
                .position(|i| &i.id == id)
                .unwrap_or_else(|| panic!("missing {}", id))
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "order: {:?}", positions);
}

#[test]
fn default_rule_groups_enable_both_generations() {
    let default = validate_with("{}", RuleGroups::default()).expect("parse");
    let all = validate_with("{}", RuleGroups::ALL).expect("parse");
    assert_eq!(default, all);
}

#[test]
fn issues_with_prefix_filters_by_namespace() {
    let result = validate(r#"{"device": {"devicetype": 5}}"#).expect("parse");
    assert!(result.issues_with_prefix("CTV-").count() > 0);
    assert!(result.issues_with_prefix("DOOH-").count() == 0);
    assert!(
        result
            .issues_with_prefix("Core-Device-")
            .all(|i| i.id.starts_with("Core-Device-"))
    );
}
