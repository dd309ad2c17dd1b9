use crate::error::{ParseError, ParseErrorKind};
use serde_json::Value;

/// Parse a raw payload string into an untyped JSON tree.
///
/// Performs JSON deserialization only. Does NOT validate the bid request;
/// the shape of the tree (including a non-object root) is the rule engine's
/// business. Parsing happens exactly once per call; a failure here aborts
/// the whole pipeline before any rule runs.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError {
            kind: ParseErrorKind::Eof,
            message: "empty input".to_string(),
            line: None,
            column: None,
        });
    }

    serde_json::from_str(input).map_err(|e| ParseError {
        kind: classify(&e),
        message: e.to_string(),
        line: Some(e.line()),
        column: Some(e.column()),
    })
}

fn classify(e: &serde_json::Error) -> ParseErrorKind {
    if e.is_eof() {
        ParseErrorKind::Eof
    } else if e.is_data() {
        ParseErrorKind::Data
    } else {
        ParseErrorKind::Syntax
    }
}
