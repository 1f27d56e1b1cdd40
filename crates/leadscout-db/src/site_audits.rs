//! Database operations for `site_audits`.
//!
//! Audits are append-only: re-auditing a place adds a row.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use leadscout_core::ScrapeResult;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::places::PlaceRow;
use crate::DbError;

/// A row from the `site_audits` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SiteAuditRow {
    pub id: i64,
    pub place_id: Option<String>,
    pub url: String,
    pub success: bool,
    pub error: Option<String>,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub social_links: Json<BTreeMap<String, String>>,
    pub https: bool,
    pub has_viewport: bool,
    pub generator: Option<String>,
    pub free_subdomain: bool,
    pub copyright_year: Option<i32>,
    pub server_header: Option<String>,
    pub has_sitemap: bool,
    pub has_structured_data: bool,
    pub load_time_ms: Option<i64>,
    pub page_size: Option<i64>,
    pub scraped_at: DateTime<Utc>,
}

impl From<SiteAuditRow> for ScrapeResult {
    fn from(row: SiteAuditRow) -> Self {
        ScrapeResult {
            url: row.url,
            success: row.success,
            error: row.error,
            emails: row.emails,
            phone_numbers: row.phone_numbers,
            social_links: row.social_links.0,
            https: row.https,
            has_viewport: row.has_viewport,
            generator: row.generator,
            free_subdomain: row.free_subdomain,
            copyright_year: row.copyright_year,
            server_header: row.server_header,
            has_sitemap: row.has_sitemap,
            has_structured_data: row.has_structured_data,
            load_time_ms: row.load_time_ms,
            page_size: row.page_size,
        }
    }
}

/// Persists one audit result for `place_id`. Failed scrapes are stored too.
///
/// Returns the new row id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_site_audit(
    pool: &PgPool,
    place_id: &str,
    result: &ScrapeResult,
) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO site_audits \
             (place_id, url, success, error, emails, phone_numbers, social_links, https, \
              has_viewport, generator, free_subdomain, copyright_year, server_header, \
              has_sitemap, has_structured_data, load_time_ms, page_size) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
         RETURNING id",
    )
    .bind(place_id)
    .bind(&result.url)
    .bind(result.success)
    .bind(&result.error)
    .bind(&result.emails)
    .bind(&result.phone_numbers)
    .bind(Json(&result.social_links))
    .bind(result.https)
    .bind(result.has_viewport)
    .bind(&result.generator)
    .bind(result.free_subdomain)
    .bind(result.copyright_year)
    .bind(&result.server_header)
    .bind(result.has_sitemap)
    .bind(result.has_structured_data)
    .bind(result.load_time_ms)
    .bind(result.page_size)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Places with a website and no audit on record, best rated first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_places_pending_audit(
    pool: &PgPool,
    limit: Option<i64>,
) -> Result<Vec<PlaceRow>, DbError> {
    let rows = sqlx::query_as::<_, PlaceRow>(
        "SELECT p.id, p.display_name, p.formatted_address, p.city, p.region, p.country, \
                p.postal_code, p.location_lat, p.location_lng, p.primary_type, p.types, \
                p.business_status, p.google_maps_uri, p.phone, p.website_uri, p.rating, \
                p.user_rating_count, p.price_level, p.created_at, p.updated_at \
         FROM places p \
         WHERE p.website_uri IS NOT NULL AND p.website_uri <> '' \
           AND NOT EXISTS (SELECT 1 FROM site_audits a WHERE a.place_id = p.id) \
         ORDER BY p.rating DESC NULLS LAST, p.user_rating_count DESC NULLS LAST, p.id \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Audit history for one place, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_site_audits_for_place(
    pool: &PgPool,
    place_id: &str,
) -> Result<Vec<SiteAuditRow>, DbError> {
    let rows = sqlx::query_as::<_, SiteAuditRow>(
        "SELECT id, place_id, url, success, error, emails, phone_numbers, social_links, \
                https, has_viewport, generator, free_subdomain, copyright_year, \
                server_header, has_sitemap, has_structured_data, load_time_ms, page_size, \
                scraped_at \
         FROM site_audits \
         WHERE place_id = $1 \
         ORDER BY scraped_at DESC, id DESC",
    )
    .bind(place_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
