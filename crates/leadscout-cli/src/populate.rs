//! `populate` command: batch searches over a city x business-type plan.

use std::path::Path;

use leadscout_core::populate::window;
use leadscout_leads::{run_search_batch, BatchPacing, LeadService, PgLeadStore};
use leadscout_places::is_known_place_type;

/// Build the query list from `plan_path` and run it, or print it on
/// `dry_run`.
///
/// # Errors
///
/// Returns an error if the plan is invalid or the places client cannot be
/// built. Per-query failures are logged and counted, not propagated.
pub(crate) async fn run_populate(
    pool: sqlx::PgPool,
    config: &leadscout_core::AppConfig,
    plan_path: &Path,
    offset: usize,
    limit: Option<usize>,
    dry_run: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let plan = leadscout_core::load_populate_plan(plan_path)?;
    let cities = plan.select_cities();
    let all_queries = plan.build_queries(&cities, is_known_place_type);
    let queries = window(&all_queries, offset, limit);

    println!(
        "{} cities x {} types = {} queries; running {} from offset {offset}",
        cities.len(),
        plan.types.len(),
        all_queries.len(),
        queries.len()
    );

    if dry_run {
        for query in &queries {
            let filter = query.included_type.as_deref().unwrap_or("-");
            println!("dry-run: {}  [type: {filter}]", query.text_query);
        }
        return Ok(());
    }

    let service = LeadService::new(PgLeadStore::new(pool), crate::places_client(config)?);
    let summary =
        run_search_batch(&service, &queries, BatchPacing::from_app_config(config), quiet).await;

    println!(
        "done: {} searched, {} cached, {} errors, {} places returned",
        summary.succeeded, summary.cached, summary.errors, summary.places
    );
    Ok(())
}
