//! Network-bound scrape of a single website.
//!
//! [`SiteAuditor::scrape_website`] never returns an error: every fault is
//! recorded on the [`ScrapeResult`] together with whatever was observed
//! before it happened. It also never retries; pacing and retry policy
//! belong to the caller.

use std::time::{Duration, Instant};

use futures::future::join_all;
use leadscout_core::{AppConfig, AuditLists, ScrapeResult};
use reqwest::{Client, Url};

use crate::error::AuditError;
use crate::extract::{
    dedupe_in_order, dedupe_valid_emails, extract_emails, extract_phones, extract_quality_signals,
    extract_social_links, is_free_subdomain,
};

/// Secondary pages fetched for extra contact emails.
pub const CONTACT_PATHS: &[&str] = &["/contact", "/contact-us", "/about", "/about-us"];

#[derive(Debug, Clone)]
pub struct AuditorConfig {
    /// Budget for the primary page fetch.
    pub timeout_secs: u64,
    /// Budget for each sitemap and contact-page request.
    pub followup_timeout_secs: u64,
    pub user_agent: String,
}

impl AuditorConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.audit_timeout_secs,
            followup_timeout_secs: config.audit_followup_timeout_secs,
            user_agent: config.audit_user_agent.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteAuditor {
    client: Client,
    timeout: Duration,
    followup_timeout: Duration,
    lists: AuditLists,
}

impl SiteAuditor {
    /// # Errors
    ///
    /// Returns [`AuditError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &AuditorConfig, lists: AuditLists) -> Result<Self, AuditError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(config.timeout_secs),
            followup_timeout: Duration::from_secs(config.followup_timeout_secs),
            lists,
        })
    }

    /// Scrape `url` (bare host or full URL; `https://` is assumed when no
    /// scheme is given) and collect contact info and quality signals.
    pub async fn scrape_website(&self, url: &str) -> ScrapeResult {
        let mut result = ScrapeResult::new(url);

        let normalized = with_default_scheme(url);
        let target = match Url::parse(&normalized) {
            Ok(target) => target,
            Err(e) => {
                result.error = Some(format!("invalid URL '{normalized}': {e}"));
                return result;
            }
        };
        if let Some(host) = target.host_str() {
            result.free_subdomain = is_free_subdomain(host, &self.lists);
        }

        let started = Instant::now();
        let response = match self
            .client
            .get(target)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url, error = %e, "primary fetch failed");
                result.error = Some(e.to_string());
                return result;
            }
        };
        result.load_time_ms = i64::try_from(started.elapsed().as_millis()).ok();

        let final_url = response.url().clone();
        result.https = final_url.scheme() == "https";
        result.server_header = response
            .headers()
            .get(reqwest::header::SERVER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let status = response.status();
        if !status.is_success() {
            result.error = Some(format!("HTTP {}", status.as_u16()));
            return result;
        }

        let html = match response.text().await {
            Ok(html) => html,
            Err(e) => {
                result.error = Some(e.to_string());
                return result;
            }
        };
        result.page_size = i64::try_from(html.len()).ok();
        result.success = true;

        let signals = extract_quality_signals(&html);
        result.has_viewport = signals.has_viewport;
        result.generator = signals.generator;
        result.has_structured_data = signals.has_structured_data;
        result.copyright_year = signals.copyright_year;
        result.social_links = extract_social_links(&html);

        let mut emails = extract_emails(&html);
        let phones = extract_phones(&html);

        let origin = final_url.origin().ascii_serialization();
        let sitemap_url = format!("{origin}/sitemap.xml");
        let (has_sitemap, contact_pages) = futures::join!(
            self.responds_ok(&sitemap_url),
            join_all(
                CONTACT_PATHS
                    .iter()
                    .map(|path| self.fetch_page(format!("{origin}{path}")))
            )
        );
        result.has_sitemap = has_sitemap;
        for page in contact_pages.into_iter().flatten() {
            emails.extend(extract_emails(&page));
        }

        result.emails = dedupe_valid_emails(emails, &self.lists);
        result.phone_numbers = dedupe_in_order(phones);
        result
    }

    async fn responds_ok(&self, url: &str) -> bool {
        match self.client.get(url).timeout(self.followup_timeout).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(url, error = %e, "follow-up request failed");
                false
            }
        }
    }

    /// Body of a 2xx page, or `None` on any failure.
    async fn fetch_page(&self, url: String) -> Option<String> {
        let response = self
            .client
            .get(&url)
            .timeout(self.followup_timeout)
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.text().await.ok()
    }
}

/// Prefix `https://` unless `url` already carries an http(s) scheme.
fn with_default_scheme(url: &str) -> String {
    let lower = url.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}
