//! Characteristic detection: a read-only summary of the request derived
//! before any rule runs. Detection never emits issues.

use crate::paths::{get_i64, get_str, is_set, is_truthy, lookup};
use crate::types::{AdPodDetails, DetectedCharacteristics};
use serde_json::Value;

/// Derive the human-readable characteristics of a parsed bid request.
pub fn detect(payload: &Value) -> DetectedCharacteristics {
    let imps = lookup(payload, "imp").and_then(Value::as_array);

    let mut formats: Vec<&str> = Vec::new();
    let mut media_formats: Vec<String> = Vec::new();
    let mut pod_slots = 0usize;
    let mut pod_duration = 0i64;
    let mut is_ad_pod = false;

    if let Some(imps) = imps {
        for imp in imps {
            for (key, label) in [
                ("video", "Video"),
                ("native", "Native"),
                ("banner", "Display"),
                ("audio", "Audio"),
            ] {
                if is_set(imp, key) && !formats.contains(&label) {
                    formats.push(label);
                }
            }
            if let Some(mimes) = lookup(imp, "video.mimes").and_then(Value::as_array) {
                for mime in mimes.iter().filter_map(Value::as_str) {
                    if !media_formats.iter().any(|m| m == mime) {
                        media_formats.push(mime.to_string());
                    }
                }
            }
            if is_set(imp, "video.podid") {
                is_ad_pod = true;
                pod_slots += 1;
            }
            if let Some(dur) = get_i64(imp, "video.poddur") {
                pod_duration += dur;
            }
        }
    }

    let primary_type = if formats.is_empty() {
        "Unknown".to_string()
    } else {
        formats.join(", ")
    };

    let platform = if is_set(payload, "app") {
        Some("Mobile App".to_string())
    } else if is_set(payload, "site") {
        Some("Website".to_string())
    } else {
        None
    };

    DetectedCharacteristics {
        primary_type,
        media_formats,
        platform,
        device_info: device_info(payload),
        privacy_signals: privacy_signals(payload),
        is_ad_pod,
        ad_pod_details: is_ad_pod.then_some(AdPodDetails {
            slots: pod_slots,
            total_duration: pod_duration,
        }),
    }
}

fn device_info(payload: &Value) -> Option<String> {
    let devicetype = get_i64(payload, "device.devicetype")?;
    let label = match devicetype {
        1 => "Mobile/Tablet".to_string(),
        2 => "Desktop".to_string(),
        5 => "Connected TV".to_string(),
        6 => "Digital Out-of-Home".to_string(),
        7 => "Phone".to_string(),
        other => format!("Device Type {}", other),
    };
    match get_str(payload, "device.os") {
        Some(os) => Some(format!("{} ({})", label, os)),
        None => Some(label),
    }
}

fn privacy_signals(payload: &Value) -> Vec<String> {
    let mut signals = Vec::new();
    if get_i64(payload, "regs.ext.gdpr") == Some(1) {
        signals.push("GDPR Applicable".to_string());
    }
    if lookup(payload, "user.ext.consent").is_some_and(is_truthy) {
        signals.push("TCF String Present".to_string());
    }
    if lookup(payload, "regs.ext.us_privacy").is_some_and(is_truthy) {
        signals.push("CCPA String Present".to_string());
    }
    if lookup(payload, "regs.gpp").is_some_and(is_truthy) {
        signals.push("GPP String Present".to_string());
    }
    signals
}
