#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    let path = match String::arbitrary(&mut u) {
        Ok(p) => p,
        Err(_) => return,
    };
    let json = match String::arbitrary(&mut u) {
        Ok(j) => j,
        Err(_) => return,
    };

    if let Ok(payload) = serde_json::from_str::<serde_json::Value>(&json) {
        let _ = bidlint::paths::lookup(&payload, &path);
        let _ = bidlint::paths::exists(&payload, &path);
    }
});
