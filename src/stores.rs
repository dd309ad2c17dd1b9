//! Per-platform app-store URL and bundle-ID pattern registry.
//!
//! Static data compiled once at first use. Platform URL shapes are mutually
//! exclusive by construction, so the cross-validator stops at the first
//! matching entry.

use regex::Regex;
use std::sync::LazyLock;

/// One app-store platform: how its store URLs look, how its bundle
/// identifiers look, and the suffix used in rule ids
/// (`Core-App-<suffix>-001` / `-002`).
pub(crate) struct PlatformPattern {
    pub name: &'static str,
    pub id_suffix: &'static str,
    /// Store-URL pattern. Exactly one capture group: the platform-specific
    /// app identifier.
    url: &'static str,
    /// Expected bundle-ID format for this platform.
    bundle: &'static str,
    /// Human-readable description of the bundle format, used in messages.
    pub bundle_hint: &'static str,
}

static PLATFORM_TABLE: &[PlatformPattern] = &[
    PlatformPattern {
        name: "iOS",
        id_suffix: "iOS",
        url: r"^https?://(?:apps|itunes)\.apple\.com/(?:[a-z]{2}/)?app/(?:[^/]+/)?id(\d+)",
        bundle: r"^\d+$",
        bundle_hint: "numeric App Store id",
    },
    PlatformPattern {
        name: "Android",
        id_suffix: "Android",
        url: r"^https?://play\.google\.com/store/apps/details\?id=([a-zA-Z0-9._]+)",
        bundle: r"^[a-zA-Z][a-zA-Z0-9_]*(\.[a-zA-Z][a-zA-Z0-9_]*)+$",
        bundle_hint: "reverse-DNS package name",
    },
    PlatformPattern {
        name: "Roku",
        id_suffix: "Roku",
        url: r"^https?://channelstore\.roku\.com/(?:[a-z]{2}-[a-z]{2}/)?details/(\d+)",
        bundle: r"^\d+$",
        bundle_hint: "numeric channel id",
    },
    PlatformPattern {
        name: "Fire OS",
        id_suffix: "FireOS",
        url: r"^https?://(?:www\.)?amazon\.com/(?:[^/]+/)*dp/([A-Z0-9]{10})",
        bundle: r"^B0[A-Z0-9]{8}$",
        bundle_hint: "Amazon ASIN (B0 followed by 8 characters)",
    },
    PlatformPattern {
        name: "Samsung Galaxy Store",
        id_suffix: "SamsungGalaxy",
        url: r"^https?://galaxystore\.samsung\.com/detail/([a-zA-Z0-9._]+)",
        bundle: r"^[a-zA-Z][a-zA-Z0-9_]*(\.[a-zA-Z][a-zA-Z0-9_]*)+$",
        bundle_hint: "reverse-DNS package name",
    },
    PlatformPattern {
        name: "Samsung Smart TV",
        id_suffix: "SamsungTV",
        url: r"^https?://(?:www\.)?samsung\.com/[a-z]{2}/appstore/app/(G\d+)",
        bundle: r"^G\d+$",
        bundle_hint: "G-prefixed numeric app id",
    },
    PlatformPattern {
        name: "LG",
        id_suffix: "LG",
        url: r"^https?://(?:us|www)\.lgappstv\.com/main/tvapp/detail\?appId=(\d+)",
        bundle: r"^\d+$",
        bundle_hint: "numeric app id",
    },
    PlatformPattern {
        name: "Vizio SmartCast",
        id_suffix: "Vizio",
        url: r"^https?://(?:www\.)?vizio\.com/smartcast-app/([a-z0-9.-]+)",
        bundle: r"^[a-z0-9.-]+$",
        bundle_hint: "lowercase SmartCast app id",
    },
    PlatformPattern {
        name: "Huawei AppGallery",
        id_suffix: "Huawei",
        url: r"^https?://appgallery\.huawei\.com/(?:#/)?app/(C\d+)",
        bundle: r"^C\d+$",
        bundle_hint: "C-prefixed AppGallery id",
    },
    PlatformPattern {
        name: "Microsoft Store",
        id_suffix: "Microsoft",
        url: r"^https?://apps\.microsoft\.com/(?:store/)?detail/(?:[^/]+/)?([9X][A-Z0-9]{11})",
        bundle: r"^[9X][A-Z0-9]{11}$",
        bundle_hint: "12-character Store product id",
    },
    PlatformPattern {
        name: "PlayStation Store",
        id_suffix: "PlayStation",
        url: r"^https?://store\.playstation\.com/[a-z]{2}-[a-z]{2}/(?:product|concept)/([A-Za-z0-9_-]+)",
        bundle: r"^[A-Za-z0-9_-]+$",
        bundle_hint: "PlayStation Store product id",
    },
];

pub(crate) struct CompiledPlatform {
    pub entry: &'static PlatformPattern,
    pub url_re: Regex,
    pub bundle_re: Regex,
}

pub(crate) static PLATFORMS: LazyLock<Vec<CompiledPlatform>> = LazyLock::new(|| {
    PLATFORM_TABLE
        .iter()
        .map(|entry| CompiledPlatform {
            entry,
            url_re: Regex::new(entry.url).unwrap(),
            bundle_re: Regex::new(entry.bundle).unwrap(),
        })
        .collect()
});

/// Find the first platform whose URL pattern matches the store URL, and the
/// app identifier extracted from its capture group.
pub(crate) fn match_store_url(url: &str) -> Option<(&'static CompiledPlatform, String)> {
    let platforms: &'static Vec<CompiledPlatform> = &PLATFORMS;
    for platform in platforms {
        if let Some(caps) = platform.url_re.captures(url) {
            let id = caps.get(1).map(|m| m.as_str().to_string())?;
            return Some((platform, id));
        }
    }
    None
}
