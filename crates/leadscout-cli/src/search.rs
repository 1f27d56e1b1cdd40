//! `search` command: one query through the cache-or-fetch service.

use clap::Args;
use leadscout_core::{score_place, LocationBias};
use leadscout_leads::{LeadService, PgLeadStore, SearchOptions, SearchQuery};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text query, e.g. "plumbers in Denver, CO"
    pub query: String,
    /// Restrict to one place type, e.g. plumber
    #[arg(long = "type")]
    pub included_type: Option<String>,
    #[arg(long)]
    pub min_rating: Option<f64>,
    /// Results per page (max 20)
    #[arg(long)]
    pub max_results: Option<u32>,
    /// Bias center latitude; requires --lng
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
    /// Bias radius in meters
    #[arg(long, default_value_t = 50_000.0)]
    pub radius: f64,
    /// Call the API even if this query is cached
    #[arg(long)]
    pub skip_cache: bool,
    /// Follow result pages (3 pages unless --max-pages is given)
    #[arg(long)]
    pub all_pages: bool,
    #[arg(long)]
    pub max_pages: Option<u32>,
}

impl SearchArgs {
    pub fn to_query(&self) -> SearchQuery {
        let location_bias = match (self.lat, self.lng) {
            (Some(latitude), Some(longitude)) => Some(LocationBias {
                latitude,
                longitude,
                radius: self.radius,
            }),
            _ => None,
        };
        SearchQuery {
            text_query: self.query.clone(),
            included_type: self.included_type.clone(),
            min_rating: self.min_rating,
            max_result_count: self.max_results,
            location_bias,
        }
    }

    pub fn to_options(&self) -> SearchOptions {
        SearchOptions {
            skip_cache: self.skip_cache,
            all_pages: self.all_pages,
            max_pages: self.max_pages,
        }
    }
}

pub(crate) async fn run_search(
    pool: sqlx::PgPool,
    config: &leadscout_core::AppConfig,
    args: &SearchArgs,
) -> anyhow::Result<()> {
    let service = LeadService::new(PgLeadStore::new(pool), crate::places_client(config)?);
    let outcome = service.search(&args.to_query(), &args.to_options()).await?;

    let source = if outcome.cached {
        "cache".to_string()
    } else {
        format!("api, {} page(s)", outcome.pages_fetched.unwrap_or(1))
    };
    println!("{} places ({source})", outcome.places.len());

    for place in &outcome.places {
        println!(
            "{:>3}  {:<40}  {:<20}  {}",
            score_place(place),
            place.display_name.as_deref().unwrap_or(place.id.as_str()),
            place.city.as_deref().unwrap_or("-"),
            place.website_uri.as_deref().unwrap_or("(no website)"),
        );
    }
    Ok(())
}
