//! Database operations for the `places` table.

use chrono::{DateTime, Utc};
use leadscout_core::Place;
use sqlx::PgPool;

use crate::DbError;

const PLACE_COLUMNS: &str = "id, display_name, formatted_address, city, region, country, \
     postal_code, location_lat, location_lng, primary_type, types, business_status, \
     google_maps_uri, phone, website_uri, rating, user_rating_count, price_level, \
     created_at, updated_at";

/// A row from the `places` table.
///
/// `business_status` and `price_level` hold the upstream enum text
/// (`OPERATIONAL`, `PRICE_LEVEL_MODERATE`, ...).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlaceRow {
    pub id: String,
    pub display_name: Option<String>,
    pub formatted_address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub primary_type: Option<String>,
    pub types: Vec<String>,
    pub business_status: Option<String>,
    pub google_maps_uri: Option<String>,
    pub phone: Option<String>,
    pub website_uri: Option<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<i32>,
    pub price_level: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PlaceRow> for Place {
    /// Unrecognised status or price text is dropped rather than failing the read.
    fn from(row: PlaceRow) -> Self {
        Place {
            id: row.id,
            display_name: row.display_name,
            formatted_address: row.formatted_address,
            city: row.city,
            region: row.region,
            country: row.country,
            postal_code: row.postal_code,
            location_lat: row.location_lat,
            location_lng: row.location_lng,
            primary_type: row.primary_type,
            types: row.types,
            business_status: row.business_status.and_then(|s| s.parse().ok()),
            google_maps_uri: row.google_maps_uri,
            phone: row.phone,
            website_uri: row.website_uri,
            rating: row.rating,
            user_rating_count: row.user_rating_count,
            price_level: row.price_level.and_then(|s| s.parse().ok()),
        }
    }
}

/// Optional filters for [`list_places`]. `None` fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceFilter {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub min_rating: Option<f64>,
    /// `Some(false)` selects places with no website on record.
    pub has_website: Option<bool>,
    pub limit: Option<i64>,
}

/// Inserts a place, or overwrites every attribute of the existing row.
///
/// `created_at` is preserved on conflict and `updated_at` is refreshed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_place(pool: &PgPool, place: &Place) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO places \
             (id, display_name, formatted_address, city, region, country, postal_code, \
              location_lat, location_lng, primary_type, types, business_status, \
              google_maps_uri, phone, website_uri, rating, user_rating_count, price_level) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18) \
         ON CONFLICT (id) DO UPDATE SET \
             display_name      = EXCLUDED.display_name, \
             formatted_address = EXCLUDED.formatted_address, \
             city              = EXCLUDED.city, \
             region            = EXCLUDED.region, \
             country           = EXCLUDED.country, \
             postal_code       = EXCLUDED.postal_code, \
             location_lat      = EXCLUDED.location_lat, \
             location_lng      = EXCLUDED.location_lng, \
             primary_type      = EXCLUDED.primary_type, \
             types             = EXCLUDED.types, \
             business_status   = EXCLUDED.business_status, \
             google_maps_uri   = EXCLUDED.google_maps_uri, \
             phone             = EXCLUDED.phone, \
             website_uri       = EXCLUDED.website_uri, \
             rating            = EXCLUDED.rating, \
             user_rating_count = EXCLUDED.user_rating_count, \
             price_level       = EXCLUDED.price_level, \
             updated_at        = NOW()",
    )
    .bind(&place.id)
    .bind(&place.display_name)
    .bind(&place.formatted_address)
    .bind(&place.city)
    .bind(&place.region)
    .bind(&place.country)
    .bind(&place.postal_code)
    .bind(place.location_lat)
    .bind(place.location_lng)
    .bind(&place.primary_type)
    .bind(&place.types)
    .bind(place.business_status.map(|s| s.as_str()))
    .bind(&place.google_maps_uri)
    .bind(&place.phone)
    .bind(&place.website_uri)
    .bind(place.rating)
    .bind(place.user_rating_count)
    .bind(place.price_level.map(|p| p.as_str()))
    .execute(pool)
    .await?;

    Ok(())
}

/// Returns the place with `id`, or `None` if absent.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_place_by_id(pool: &PgPool, id: &str) -> Result<Option<PlaceRow>, DbError> {
    let row = sqlx::query_as::<_, PlaceRow>(&format!(
        "SELECT {PLACE_COLUMNS} FROM places WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Lists places matching `filter`, best rated first, ties broken by
/// rating count. Unrated places sort last.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_places(pool: &PgPool, filter: &PlaceFilter) -> Result<Vec<PlaceRow>, DbError> {
    let rows = sqlx::query_as::<_, PlaceRow>(&format!(
        "SELECT {PLACE_COLUMNS} FROM places \
         WHERE ($1::TEXT IS NULL OR country = $1) \
           AND ($2::TEXT IS NULL OR region = $2) \
           AND ($3::TEXT IS NULL OR city = $3) \
           AND ($4::DOUBLE PRECISION IS NULL OR rating >= $4) \
           AND ($5::BOOLEAN IS NULL \
                OR ($5 AND website_uri IS NOT NULL AND website_uri <> '') \
                OR (NOT $5 AND (website_uri IS NULL OR website_uri = ''))) \
         ORDER BY rating DESC NULLS LAST, user_rating_count DESC NULLS LAST, id \
         LIMIT $6"
    ))
    .bind(&filter.country)
    .bind(&filter.region)
    .bind(&filter.city)
    .bind(filter.min_rating)
    .bind(filter.has_website)
    .bind(filter.limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
