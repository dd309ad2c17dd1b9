//! Inventory categories: App (`Core-App-*` / `EQ-App-*`) and Site
//! (`Core-Site-*`), including the store-URL / bundle cross-validator.

use super::{URL_RE, contains_macro, first_macro};
use crate::paths::{get_str, is_set, lookup};
use crate::stores::match_store_url;
use crate::types::{Issue, RuleGroups};
use serde_json::Value;

pub(super) fn app(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    let Some(app) = lookup(payload, "app").filter(|v| v.is_object()) else {
        return issues;
    };

    let storeurl = get_str(app, "storeurl");
    let bundle = get_str(app, "bundle");

    if groups.eq {
        // Exchange-generation presence checks, overlapping Core-App-001/-002.
        if bundle.is_none() {
            issues.push(Issue::error(
                "EQ-App-001",
                "app.bundle",
                "app.bundle is required by the exchange",
            ));
        }
        if storeurl.is_none() {
            issues.push(Issue::error(
                "EQ-App-002",
                "app.storeurl",
                "app.storeurl is required by the exchange",
            ));
        }
    }

    if !groups.core {
        return issues;
    }

    if storeurl.is_none() {
        issues.push(
            Issue::error("Core-App-001", "app.storeurl", "app.storeurl must be a string")
                .with_spec("OpenRTB 2.6 §3.2.14"),
        );
    }
    if bundle.is_none() {
        issues.push(
            Issue::error("Core-App-002", "app.bundle", "app.bundle must be a string")
                .with_spec("OpenRTB 2.6 §3.2.14"),
        );
    }
    // Deeper app checks assume both fields exist; stop here when either is
    // missing or wrong-typed.
    let (Some(storeurl), Some(bundle)) = (storeurl, bundle) else {
        return issues;
    };

    let url_well_formed = URL_RE.is_match(storeurl);
    if !url_well_formed {
        issues.push(
            Issue::error(
                "Core-App-003",
                "app.storeurl",
                "app.storeurl must be a well-formed http(s) URL",
            )
            .with_actual(&app["storeurl"]),
        );
    }

    if let Some(token) = first_macro(bundle) {
        issues.push(
            Issue::error(
                "Core-App-004",
                "app.bundle",
                format!("app.bundle contains unresolved macro {}", token),
            )
            .with_actual(&app["bundle"]),
        );
    }
    if let Some(token) = first_macro(storeurl) {
        issues.push(Issue::error(
            "Core-App-005",
            "app.storeurl",
            format!("app.storeurl contains unresolved macro {}", token),
        ));
    }
    let serialized = app.to_string();
    if contains_macro(&serialized) {
        issues.push(Issue::error(
            "Core-App-006",
            "app",
            "app object contains an unresolved macro token",
        ));
    }

    if url_well_formed {
        issues.extend(cross_validate_store(storeurl, bundle, app));
    }

    if !is_set(app, "publisher.id") {
        issues.push(Issue::error(
            "Core-App-007",
            "app.publisher.id",
            "app.publisher.id is required",
        ));
    }
    if get_str(app, "name").is_none() {
        issues.push(Issue::warning(
            "Core-App-008",
            "app.name",
            "app.name is recommended",
        ));
    }

    issues
}

/// Cross-validate the bundle against whichever platform's URL pattern
/// matches the store URL. Platforms are tried in registry order and the
/// first match wins; their URL shapes are mutually exclusive by
/// construction.
fn cross_validate_store(storeurl: &str, bundle: &str, app: &Value) -> Vec<Issue> {
    let mut issues = Vec::new();
    let Some((platform, extracted)) = match_store_url(storeurl) else {
        issues.push(
            Issue::error(
                "Core-App-009",
                "app.storeurl",
                "app.storeurl does not match any known app-store URL pattern",
            )
            .with_actual(&app["storeurl"]),
        );
        return issues;
    };

    if !platform.bundle_re.is_match(bundle) {
        issues.push(
            Issue::error(
                &format!("Core-App-{}-001", platform.entry.id_suffix),
                "app.bundle",
                format!(
                    "app.bundle does not match the {} bundle format",
                    platform.entry.name
                ),
            )
            .with_actual(&app["bundle"])
            .with_expected(platform.entry.bundle_hint),
        );
    }
    if extracted != bundle {
        issues.push(
            Issue::error(
                &format!("Core-App-{}-002", platform.entry.id_suffix),
                "app.bundle",
                format!(
                    "app.bundle '{}' does not equal the id '{}' extracted from the {} store URL",
                    bundle, extracted, platform.entry.name
                ),
            )
            .with_actual(&app["bundle"])
            .with_expected(extracted),
        );
    }

    issues
}

pub(super) fn site(payload: &Value, groups: RuleGroups) -> Vec<Issue> {
    let mut issues = Vec::new();
    if !groups.core {
        return issues;
    }
    let Some(site) = lookup(payload, "site").filter(|v| v.is_object()) else {
        return issues;
    };

    let page = get_str(site, "page");
    let domain = get_str(site, "domain");

    if page.is_none_or(str::is_empty) && domain.is_none_or(str::is_empty) {
        issues.push(Issue::error(
            "Core-Site-001",
            "site",
            "site must carry page or domain",
        ));
    }

    if let Some(page) = page
        && !URL_RE.is_match(page)
    {
        issues.push(
            Issue::error(
                "Core-Site-002",
                "site.page",
                "site.page must be a well-formed http(s) URL",
            )
            .with_actual(&site["page"]),
        );
    }

    if !is_set(site, "publisher.id") {
        issues.push(Issue::error(
            "Core-Site-003",
            "site.publisher.id",
            "site.publisher.id is required",
        ));
    }

    if let Some(domain) = domain
        && domain.contains("://")
    {
        issues.push(
            Issue::warning(
                "Core-Site-004",
                "site.domain",
                "site.domain should be a bare domain without a scheme",
            )
            .with_actual(&site["domain"])
            .with_expected("e.g. example.com"),
        );
    }

    if contains_macro(&site.to_string()) {
        issues.push(Issue::error(
            "Core-Site-005",
            "site",
            "site object contains an unresolved macro token",
        ));
    }

    issues
}
