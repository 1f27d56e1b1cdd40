//! Sequential batch drivers for populate and bulk audit runs.
//!
//! Both drivers isolate per-item failures: one bad query or site is counted
//! and logged, and the run moves on. Pacing is fixed delays between items.

use std::time::{Duration, Instant};

use leadscout_audit::SiteAuditor;
use leadscout_core::{AppConfig, PopulateQuery};

use crate::error::LeadError;
use crate::service::{LeadService, SearchOptions, SearchQuery};
use crate::store::LeadStore;

/// Copyright years before this are flagged as stale in audit logs.
pub const STALE_COPYRIGHT_BEFORE: i32 = 2023;

const PROGRESS_EVERY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPacing {
    /// After a search that reached the API.
    pub search_delay: Duration,
    /// After a search that failed.
    pub search_error_delay: Duration,
    /// Between site scrapes.
    pub audit_delay: Duration,
}

impl BatchPacing {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            search_delay: Duration::from_millis(config.search_delay_ms),
            search_error_delay: Duration::from_millis(config.search_error_delay_ms),
            audit_delay: Duration::from_millis(config.audit_delay_ms),
        }
    }

    /// No delays at all.
    #[must_use]
    pub fn none() -> Self {
        Self {
            search_delay: Duration::ZERO,
            search_error_delay: Duration::ZERO,
            audit_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchBatchSummary {
    /// Searches that reached the API and were stored.
    pub succeeded: usize,
    pub cached: usize,
    pub errors: usize,
    /// Places returned across all successful and cached searches.
    pub places: usize,
}

/// Runs every query through [`LeadService::search`] with `all_pages` set.
///
/// Sleeps `search_delay` after each live search and `search_error_delay`
/// after each failure. Cache hits are not delayed.
pub async fn run_search_batch<S: LeadStore>(
    service: &LeadService<S>,
    queries: &[PopulateQuery],
    pacing: BatchPacing,
    quiet: bool,
) -> SearchBatchSummary {
    let mut summary = SearchBatchSummary::default();
    let options = SearchOptions {
        all_pages: true,
        ..SearchOptions::default()
    };
    let total = queries.len();

    for (index, query) in queries.iter().enumerate() {
        let position = index + 1;
        let search = SearchQuery {
            text_query: query.text_query.clone(),
            included_type: query.included_type.clone(),
            min_rating: None,
            max_result_count: None,
            location_bias: Some(query.location_bias),
        };

        match service.search(&search, &options).await {
            Ok(outcome) => {
                summary.places += outcome.places.len();
                if outcome.cached {
                    summary.cached += 1;
                    log_item(
                        quiet,
                        position,
                        total,
                        &query.text_query,
                        &format!("cached ({} places)", outcome.places.len()),
                    );
                } else {
                    summary.succeeded += 1;
                    log_item(
                        quiet,
                        position,
                        total,
                        &query.text_query,
                        &format!(
                            "{} places, {} pages",
                            outcome.places.len(),
                            outcome.pages_fetched.unwrap_or(1)
                        ),
                    );
                    pause(pacing.search_delay).await;
                }
            }
            Err(e) => {
                summary.errors += 1;
                tracing::warn!(
                    position,
                    total,
                    query = %query.text_query,
                    error = %e,
                    "search failed; continuing"
                );
                pause(pacing.search_error_delay).await;
            }
        }
    }

    summary
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub audited: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Successful audits that found at least one email.
    pub with_emails: usize,
}

/// Audits places that have a website and no prior audit.
///
/// Every scrape result is persisted, failed ones included.
///
/// # Errors
///
/// Returns [`LeadError::Store`] only if the pending-audit queue cannot be
/// read. Per-site persistence failures are counted as failed and skipped.
pub async fn run_bulk_audit<S: LeadStore + ?Sized>(
    store: &S,
    auditor: &SiteAuditor,
    limit: Option<i64>,
    pacing: BatchPacing,
    quiet: bool,
) -> Result<AuditSummary, LeadError> {
    let pending = store.places_pending_audit(limit).await?;
    let total = pending.len();
    let started = Instant::now();
    let mut summary = AuditSummary::default();

    tracing::info!(total, "auditing sites");

    for (index, place) in pending.iter().enumerate() {
        let Some(website) = place.website_uri.as_deref().filter(|w| !w.trim().is_empty()) else {
            continue;
        };
        let position = index + 1;
        let name = place.display_name.as_deref().unwrap_or(place.id.as_str());

        if index > 0 {
            pause(pacing.audit_delay).await;
        }

        let result = auditor.scrape_website(website).await;
        summary.audited += 1;

        if let Err(e) = store.insert_site_audit(&place.id, &result).await {
            summary.failed += 1;
            tracing::warn!(
                position,
                total,
                place_id = %place.id,
                error = %e,
                "failed to store site audit"
            );
            continue;
        }

        if result.success {
            summary.succeeded += 1;
            if !result.emails.is_empty() {
                summary.with_emails += 1;
            }
            let flags = result.flags(STALE_COPYRIGHT_BEFORE);
            let detail = if flags.is_empty() {
                "ok".to_string()
            } else {
                flags.join(", ")
            };
            log_item(quiet, position, total, name, &detail);
        } else {
            summary.failed += 1;
            tracing::warn!(
                position,
                total,
                place = name,
                url = website,
                error = result.error.as_deref().unwrap_or("unknown"),
                "audit failed"
            );
        }

        if position % PROGRESS_EVERY == 0 {
            let elapsed = started.elapsed().as_secs_f64();
            #[allow(clippy::cast_precision_loss)]
            let eta_mins = (total - position) as f64 * (elapsed / position as f64) / 60.0;
            tracing::info!(
                position,
                total,
                succeeded = summary.succeeded,
                failed = summary.failed,
                with_emails = summary.with_emails,
                eta_mins = (eta_mins * 10.0).round() / 10.0,
                "audit progress"
            );
        }
    }

    Ok(summary)
}

fn log_item(quiet: bool, position: usize, total: usize, label: &str, detail: &str) {
    if quiet {
        tracing::debug!(position, total, item = label, detail, "done");
    } else {
        tracing::info!(position, total, item = label, detail, "done");
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
