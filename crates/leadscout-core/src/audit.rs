use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of one scrape-and-analyze pass over a website.
///
/// Produced by the site auditor and persisted as one append-only
/// `site_audits` row. On failure `success` is `false`, `error` describes
/// the fault, and every signal not yet observed keeps its default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// The URL as supplied by the caller, before scheme normalization.
    pub url: String,
    pub success: bool,
    pub error: Option<String>,

    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    /// Platform name (`facebook`, `instagram`, ...) to profile URL.
    pub social_links: BTreeMap<String, String>,

    pub https: bool,
    pub has_viewport: bool,
    /// e.g. `"WordPress 6.4"`, `"Wix.com Website Builder"`.
    pub generator: Option<String>,
    pub free_subdomain: bool,
    pub copyright_year: Option<i32>,
    pub server_header: Option<String>,
    pub has_sitemap: bool,
    pub has_structured_data: bool,

    pub load_time_ms: Option<i64>,
    pub page_size: Option<i64>,
}

impl ScrapeResult {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Compact quality flags for one-line batch logging.
    ///
    /// A copyright year before `stale_before` is reported as `©<year>`.
    #[must_use]
    pub fn flags(&self, stale_before: i32) -> Vec<String> {
        let mut flags = Vec::new();
        if !self.https {
            flags.push("NO-HTTPS".to_string());
        }
        if !self.has_viewport {
            flags.push("NO-VIEWPORT".to_string());
        }
        if self.free_subdomain {
            flags.push("FREE-SUB".to_string());
        }
        if let Some(year) = self.copyright_year.filter(|y| *y < stale_before) {
            flags.push(format!("©{year}"));
        }
        if !self.emails.is_empty() {
            flags.push(format!("{} emails", self.emails.len()));
        }
        flags
    }
}
