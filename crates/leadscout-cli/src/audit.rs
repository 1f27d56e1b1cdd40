//! `audit` command: bulk audit of pending places, or a one-off URL.

use leadscout_audit::{AuditorConfig, SiteAuditor};
use leadscout_leads::{run_bulk_audit, BatchPacing, PgLeadStore, STALE_COPYRIGHT_BEFORE};

fn build_auditor(config: &leadscout_core::AppConfig) -> anyhow::Result<SiteAuditor> {
    let lists = leadscout_core::load_audit_lists(config.audit_lists_path.as_deref())?;
    SiteAuditor::new(&AuditorConfig::from_app_config(config), lists)
        .map_err(|e| anyhow::anyhow!("failed to build site auditor: {e}"))
}

pub(crate) async fn run_bulk(
    pool: sqlx::PgPool,
    config: &leadscout_core::AppConfig,
    limit: Option<i64>,
    quiet: bool,
) -> anyhow::Result<()> {
    let auditor = build_auditor(config)?;
    let store = PgLeadStore::new(pool);
    let started = std::time::Instant::now();

    let summary = run_bulk_audit(
        &store,
        &auditor,
        limit,
        BatchPacing::from_app_config(config),
        quiet,
    )
    .await?;

    println!(
        "done in {:.1}m: {} audited, {} ok, {} failed, {} with emails",
        started.elapsed().as_secs_f64() / 60.0,
        summary.audited,
        summary.succeeded,
        summary.failed,
        summary.with_emails
    );
    Ok(())
}

/// Scrape one URL and print the result as JSON. Nothing is stored.
pub(crate) async fn run_audit_url(
    config: &leadscout_core::AppConfig,
    url: &str,
) -> anyhow::Result<()> {
    let auditor = build_auditor(config)?;
    let result = auditor.scrape_website(url).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    let flags = result.flags(STALE_COPYRIGHT_BEFORE);
    if !flags.is_empty() {
        println!("flags: {}", flags.join(", "));
    }
    Ok(())
}
