//! Device, User, Regs, and Source categories
//! (`Core-Device-*` / `EQ-Device-*` / `Core-User-*` / `Core-Regs-*` /
//! `Core-Source-*` / `EQ-Source-*`).

use crate::geo::{continent_for_country, lookup_datacenter};
use crate::paths::{get_i64, get_str, is_binary_flag, is_set, is_truthy, lookup};
use crate::types::{Issue, RuleGroups};
use serde_json::Value;
use std::net::{Ipv4Addr, Ipv6Addr};

/// The placeholder IFA some SSPs send when the real identifier is withheld.
fn is_all_zero_ifa(ifa: &str) -> bool {
    !ifa.is_empty() && ifa.chars().all(|c| c == '0' || c == '-')
}

/// Heuristics for IP literals that have been anonymized or truncated
/// upstream: a zeroed final octet, masked octets, or a `::`-compressed IPv6
/// literal too short to be a real interface address.
fn looks_truncated(ip: &str) -> bool {
    ip.ends_with(".0") || ip.contains("xxx") || ip.contains("***") || (ip.contains("::") && ip.len() < 10)
}

pub(super) fn device(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    let Some(device) = lookup(payload, "device").filter(|v| v.is_object()) else {
        return issues;
    };

    let ip = get_str(device, "ip");
    let ipv6 = get_str(device, "ipv6");

    if groups.core {
        match get_str(device, "geo.country") {
            None => issues.push(Issue::error(
                "Core-Device-001",
                "device.geo.country",
                "device.geo.country is required",
            )),
            Some(country) => {
                let three_letter =
                    country.len() == 3 && country.bytes().all(|b| b.is_ascii_uppercase());
                if !three_letter {
                    issues.push(
                        Issue::error(
                            "Core-Device-002",
                            "device.geo.country",
                            "device.geo.country must be a 3-letter ISO-3166 code",
                        )
                        .with_actual(&device["geo"]["country"])
                        .with_expected("e.g. USA"),
                    );
                } else if let Some(dc_id) = get_i64(device, "ext.auctionDatacenterId")
                    && let Some(dc) = lookup_datacenter(dc_id)
                    && let Some(continent) = continent_for_country(country)
                    && continent != dc.continent
                {
                    issues.push(
                        Issue::warning(
                            "Core-Device-003",
                            "device.geo.country",
                            format!(
                                "country {} is on continent {} but the auction ran in the {} data center ({})",
                                country, continent, dc.city, dc.continent
                            ),
                        )
                        .with_expected(format!("a country on continent {}", dc.continent)),
                    );
                }
            }
        }

        for (rule, field) in [
            ("Core-Device-004", "make"),
            ("Core-Device-005", "model"),
            ("Core-Device-006", "ua"),
        ] {
            if get_str(device, field).is_none_or(str::is_empty) {
                issues.push(Issue::error(
                    rule,
                    format!("device.{}", field),
                    format!("device.{} is required", field),
                ));
            }
        }

        match get_i64(device, "devicetype") {
            Some(dt) if (1..=7).contains(&dt) => {}
            Some(_) => issues.push(
                Issue::error(
                    "Core-Device-007",
                    "device.devicetype",
                    "device.devicetype must be between 1 and 7",
                )
                .with_actual(&device["devicetype"])
                .with_expected("1-7"),
            ),
            None => issues.push(Issue::error(
                "Core-Device-007",
                "device.devicetype",
                "device.devicetype is required",
            )),
        }

        match (ip, ipv6) {
            (None, None) => issues.push(Issue::error(
                "Core-Device-008",
                "device.ip",
                "device.ip or device.ipv6 is required",
            )),
            _ => {
                if let Some(ip) = ip
                    && ip.parse::<Ipv4Addr>().is_err()
                {
                    issues.push(
                        Issue::error(
                            "Core-Device-009",
                            "device.ip",
                            "device.ip must be a valid IPv4 literal",
                        )
                        .with_actual(&device["ip"]),
                    );
                }
                if let Some(ipv6) = ipv6
                    && ipv6.parse::<Ipv6Addr>().is_err()
                {
                    issues.push(
                        Issue::error(
                            "Core-Device-010",
                            "device.ipv6",
                            "device.ipv6 must be a valid IPv6 literal",
                        )
                        .with_actual(&device["ipv6"]),
                    );
                }
            }
        }

        let ifa = get_str(device, "ifa");
        let lmt = get_i64(device, "lmt");
        if ifa.is_none_or(str::is_empty) && lmt != Some(1) {
            issues.push(Issue::error(
                "Core-Device-011",
                "device.ifa",
                "device.ifa is required unless lmt is 1",
            ));
        }

        let zero_ifa = ifa.is_some_and(is_all_zero_ifa);
        let truncated_ip =
            ip.is_some_and(looks_truncated) || ipv6.is_some_and(looks_truncated);
        if (zero_ifa || truncated_ip) && get_i64(device, "ext.truncated_ip") != Some(1) {
            let reason = if zero_ifa {
                "ifa is the all-zero identifier"
            } else {
                "the IP literal looks truncated"
            };
            issues.push(
                Issue::error(
                    "Core-Device-012",
                    "device.ext.truncated_ip",
                    format!("{}, so device.ext.truncated_ip must equal 1", reason),
                )
                .with_expected("1"),
            );
        }
    }

    if groups.eq {
        // Second-generation presence check, overlaps Core-Device-008.
        if ip.is_none() && ipv6.is_none() {
            issues.push(Issue::error(
                "EQ-Device-001",
                "device.ip",
                "an IP address is required by the exchange",
            ));
        }
        if let Some(lmt) = lookup(device, "lmt")
            && !is_binary_flag(lmt)
        {
            issues.push(
                Issue::warning("EQ-Device-002", "device.lmt", "lmt flag must be 0 or 1")
                    .with_actual(lmt)
                    .with_expected("0 or 1"),
            );
        }
        if get_str(device, "language").is_none() {
            issues.push(Issue::warning(
                "EQ-Device-003",
                "device.language",
                "device.language is recommended",
            ));
        }
    }

    issues
}

pub(super) fn user(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    if !groups.core {
        return issues;
    }
    let Some(user) = lookup(payload, "user").filter(|v| v.is_object()) else {
        return issues;
    };

    if get_str(user, "id").is_none_or(str::is_empty)
        && get_str(user, "buyeruid").is_none_or(str::is_empty)
    {
        issues.push(Issue::warning(
            "Core-User-001",
            "user.id",
            "user.id or user.buyeruid is recommended",
        ));
    }

    if let (Some(user_country), Some(device_country)) = (
        get_str(user, "geo.country"),
        get_str(payload, "device.geo.country"),
    ) && user_country != device_country
    {
        issues.push(
            Issue::warning(
                "Core-User-002",
                "user.geo.country",
                format!(
                    "user.geo.country '{}' differs from device.geo.country '{}'",
                    user_country, device_country
                ),
            )
            .with_actual(&user["geo"]["country"])
            .with_expected(device_country),
        );
    }

    issues
}

pub(super) fn regs(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    if !groups.core {
        return issues;
    }
    let Some(regs) = lookup(payload, "regs").filter(|v| v.is_object()) else {
        return issues;
    };

    if let Some(coppa) = lookup(regs, "coppa")
        && !is_binary_flag(coppa)
    {
        issues.push(
            Issue::error("Core-Regs-001", "regs.coppa", "coppa flag must be 0 or 1")
                .with_actual(coppa)
                .with_expected("0 or 1"),
        );
    }

    // The GDPR flag may live at regs.ext.gdpr (2.x convention) or regs.gdpr.
    let gdpr = lookup(regs, "ext.gdpr")
        .map(|v| ("regs.ext.gdpr", v))
        .or_else(|| lookup(regs, "gdpr").map(|v| ("regs.gdpr", v)));
    if let Some((gdpr_path, gdpr)) = gdpr {
        if !is_binary_flag(gdpr) {
            issues.push(
                Issue::error("Core-Regs-002", gdpr_path, "gdpr flag must be 0 or 1")
                    .with_actual(gdpr)
                    .with_expected("0 or 1"),
            );
        } else if gdpr.as_i64() == Some(1)
            && !lookup(payload, "user.ext.consent").is_some_and(is_truthy)
        {
            issues.push(
                Issue::error(
                    "Core-Regs-003",
                    "user.ext.consent",
                    "GDPR applies but no TCF consent string is present",
                )
                .with_expected("a TCF consent string in user.ext.consent"),
            );
        }
    }

    if lookup(regs, "gpp").is_some_and(is_truthy) && !is_set(regs, "gpp_sid") {
        issues.push(Issue::error(
            "Core-Regs-004",
            "regs.gpp_sid",
            "regs.gpp_sid must accompany regs.gpp",
        ));
    }
    if let Some(gpp_sid) = lookup(regs, "gpp_sid")
        && !gpp_sid.is_null()
    {
        let well_formed = gpp_sid
            .as_array()
            .is_some_and(|a| a.iter().all(|v| v.as_i64().is_some()));
        if !well_formed {
            issues.push(
                Issue::error(
                    "Core-Regs-006",
                    "regs.gpp_sid",
                    "regs.gpp_sid must be an array of section ids",
                )
                .with_actual(gpp_sid),
            );
        }
    }

    if let Some(us_privacy) = get_str(regs, "ext.us_privacy")
        && us_privacy.len() != 4
    {
        issues.push(
            Issue::warning(
                "Core-Regs-005",
                "regs.ext.us_privacy",
                "us_privacy should be a 4-character string",
            )
            .with_expected("e.g. 1YNN"),
        );
    }

    issues
}

pub(super) fn source(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    let Some(source) = lookup(payload, "source").filter(|v| v.is_object()) else {
        return issues;
    };

    if groups.eq && get_str(source, "tid").is_none() {
        issues.push(Issue::warning(
            "EQ-Source-001",
            "source.tid",
            "source.tid is recommended",
        ));
    }

    // The schain may live at source.schain or source.ext.schain.
    let schain = lookup(source, "schain")
        .or_else(|| lookup(source, "ext.schain"))
        .filter(|v| v.is_object());
    let Some(schain) = schain else {
        if groups.core {
            issues.push(Issue::error(
                "Core-Source-001",
                "source.schain",
                "source.schain is required",
            ));
        }
        return issues;
    };

    if groups.core && get_i64(schain, "complete") != Some(1) {
        issues.push(
            Issue::error(
                "Core-Source-002",
                "source.schain.complete",
                "schain.complete must equal 1",
            )
            .with_expected("1"),
        );
    }

    if groups.eq && get_str(schain, "ver") != Some("1.0") {
        issues.push(
            Issue::warning(
                "EQ-Source-002",
                "source.schain.ver",
                "schain.ver should be \"1.0\"",
            )
            .with_expected("1.0"),
        );
    }

    if !groups.core {
        return issues;
    }

    match lookup(schain, "nodes").and_then(Value::as_array) {
        Some(nodes) if !nodes.is_empty() => {
            for (i, node) in nodes.iter().enumerate() {
                if get_str(node, "asi").is_none_or(str::is_empty) {
                    issues.push(Issue::error(
                        "Core-Source-004",
                        format!("source.schain.nodes[{}].asi", i),
                        "schain node must carry asi",
                    ));
                }
                if get_str(node, "sid").is_none_or(str::is_empty) {
                    issues.push(Issue::error(
                        "Core-Source-005",
                        format!("source.schain.nodes[{}].sid", i),
                        "schain node must carry sid",
                    ));
                }
                if !is_set(node, "hp") {
                    issues.push(Issue::error(
                        "Core-Source-006",
                        format!("source.schain.nodes[{}].hp", i),
                        "schain node must define hp",
                    ));
                }
            }
        }
        _ => issues.push(Issue::error(
            "Core-Source-003",
            "source.schain.nodes",
            "schain.nodes must be a non-empty array",
        )),
    }

    issues
}
