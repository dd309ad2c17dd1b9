#![no_main]

use bidlint::RuleGroups;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    if let Ok(result) = bidlint::validate(&s) {
        // Re-running on the same tree must reproduce the report exactly.
        let payload: serde_json::Value = serde_json::from_str(&s).unwrap();
        let again = bidlint::validate_value(&payload, RuleGroups::ALL);
        assert_eq!(result, again);
    }
});
