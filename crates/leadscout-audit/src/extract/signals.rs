use std::sync::LazyLock;

use leadscout_core::AuditLists;
use regex::Regex;

static VIEWPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+name=["']viewport["'][^>]*>"#).expect("valid regex")
});
static GENERATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+name=["']generator["'][^>]+content=["']([^"']+)["']"#)
        .expect("valid regex")
});
static JSON_LD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script[^>]+type=["']application/ld\+json["']"#).expect("valid regex")
});
static MICRODATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)itemtype=["']https?://schema\.org"#).expect("valid regex")
});
static COPYRIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:©|&copy;|copyright)\s*([0-9]{4})").expect("valid regex")
});

const COPYRIGHT_YEARS: std::ops::RangeInclusive<i32> = 2000..=2030;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualitySignals {
    pub has_viewport: bool,
    pub generator: Option<String>,
    pub has_structured_data: bool,
    /// Most recent plausible copyright year on the page.
    pub copyright_year: Option<i32>,
}

#[must_use]
pub fn extract_quality_signals(html: &str) -> QualitySignals {
    let generator = GENERATOR_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|g| !g.is_empty());

    let copyright_year = COPYRIGHT_RE
        .captures_iter(html)
        .filter_map(|c| c.get(1)?.as_str().parse::<i32>().ok())
        .filter(|y| COPYRIGHT_YEARS.contains(y))
        .max();

    QualitySignals {
        has_viewport: VIEWPORT_RE.is_match(html),
        generator,
        has_structured_data: JSON_LD_RE.is_match(html) || MICRODATA_RE.is_match(html),
        copyright_year,
    }
}

/// `true` when `hostname` ends with a free website-builder suffix.
#[must_use]
pub fn is_free_subdomain(hostname: &str, lists: &AuditLists) -> bool {
    let host = hostname.to_ascii_lowercase();
    lists
        .free_subdomains
        .iter()
        .any(|suffix| host.ends_with(suffix.as_str()))
}
