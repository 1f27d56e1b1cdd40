use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static SOCIAL_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("facebook", r"facebook\.com"),
        ("instagram", r"instagram\.com"),
        ("twitter", r"(?:twitter|x)\.com"),
        ("linkedin", r"linkedin\.com"),
        ("yelp", r"yelp\.com"),
        ("youtube", r"youtube\.com"),
        ("tiktok", r"tiktok\.com"),
    ]
    .into_iter()
    .map(|(platform, domain)| {
        let pattern = format!(r#"(?i)(?:https?://)?(?:www\.)?{domain}/[^\s"'<>]+"#);
        (platform, Regex::new(&pattern).expect("valid regex"))
    })
    .collect()
});

/// First profile URL per platform; platforms without a match are absent.
///
/// Scheme-less matches get an `https://` prefix.
#[must_use]
pub fn extract_social_links(html: &str) -> BTreeMap<String, String> {
    SOCIAL_PATTERNS
        .iter()
        .filter_map(|(platform, re)| {
            let found = re.find(html)?.as_str();
            let url = if found.starts_with("http") {
                found.to_string()
            } else {
                format!("https://{found}")
            };
            Some(((*platform).to_string(), url))
        })
        .collect()
}
