//! Read-only lead reports.

use clap::{Args, Subcommand};
use leadscout_core::{get_top_leads, Place, ScrapeResult, DEFAULT_MIN_SCORE};
use leadscout_db::PlaceFilter;
use leadscout_leads::STALE_COPYRIGHT_BEFORE;

/// Sub-commands available under `leads`.
#[derive(Debug, Subcommand)]
pub enum LeadsCommands {
    /// Highest-scoring stored places
    Top(TopArgs),
    /// One place with its audit history
    Show { place_id: String },
}

#[derive(Debug, Args)]
pub struct TopArgs {
    /// Two-letter country code, e.g. US
    #[arg(long)]
    pub country: Option<String>,
    /// State or region code, e.g. CO
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub min_rating: Option<f64>,
    /// Only places without a website
    #[arg(long, conflicts_with = "with_website")]
    pub no_website: bool,
    /// Only places with a website
    #[arg(long)]
    pub with_website: bool,
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    pub min_score: u32,
    /// Maximum number of leads to print
    #[arg(long, default_value_t = 25)]
    pub limit: usize,
}

impl TopArgs {
    pub fn place_filter(&self) -> PlaceFilter {
        let has_website = if self.with_website {
            Some(true)
        } else if self.no_website {
            Some(false)
        } else {
            None
        };
        PlaceFilter {
            country: self.country.clone(),
            region: self.region.clone(),
            city: self.city.clone(),
            min_rating: self.min_rating,
            has_website,
            limit: None,
        }
    }
}

pub(crate) async fn run_leads(pool: &sqlx::PgPool, command: LeadsCommands) -> anyhow::Result<()> {
    match command {
        LeadsCommands::Top(args) => run_top(pool, &args).await,
        LeadsCommands::Show { place_id } => run_show(pool, &place_id).await,
    }
}

async fn run_top(pool: &sqlx::PgPool, args: &TopArgs) -> anyhow::Result<()> {
    let places: Vec<Place> = leadscout_db::list_places(pool, &args.place_filter())
        .await?
        .into_iter()
        .map(Place::from)
        .collect();
    let leads = get_top_leads(&places, args.min_score);

    println!(
        "{} of {} places score >= {}",
        leads.len(),
        places.len(),
        args.min_score
    );
    for lead in leads.iter().take(args.limit) {
        let place = &lead.place;
        println!(
            "{:>3}  {:<40}  {:<20}  {:<4}  {:>4}  {}",
            lead.lead_score,
            place.display_name.as_deref().unwrap_or(place.id.as_str()),
            place.city.as_deref().unwrap_or("-"),
            place.region.as_deref().unwrap_or("-"),
            place
                .rating
                .map_or_else(|| "-".to_string(), |r| format!("{r:.1}")),
            place.phone.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

async fn run_show(pool: &sqlx::PgPool, place_id: &str) -> anyhow::Result<()> {
    let place = leadscout_db::get_place_by_id(pool, place_id)
        .await?
        .map(Place::from)
        .ok_or_else(|| anyhow::anyhow!("place '{place_id}' not found"))?;
    println!("{}", serde_json::to_string_pretty(&place)?);

    let audits = leadscout_db::list_site_audits_for_place(pool, place_id).await?;
    println!("{} audit(s)", audits.len());
    for row in audits {
        let scraped_at = row.scraped_at;
        let result = ScrapeResult::from(row);
        let status = match (result.success, result.error.as_deref()) {
            (true, _) => "ok".to_string(),
            (false, Some(e)) => format!("FAILED: {e}"),
            (false, None) => "FAILED".to_string(),
        };
        println!(
            "{}  {}  {status}  [{}]",
            scraped_at.format("%Y-%m-%d %H:%M"),
            result.url,
            result.flags(STALE_COPYRIGHT_BEFORE).join(", ")
        );
    }
    Ok(())
}
