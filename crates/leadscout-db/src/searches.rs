//! Database operations for `place_searches` and `place_search_results`.

use chrono::{DateTime, Utc};
use leadscout_core::LocationBias;
use sqlx::PgPool;

use crate::places::PlaceRow;
use crate::DbError;

/// A row from the `place_searches` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SearchRow {
    pub id: i64,
    pub text_query: String,
    pub included_type: Option<String>,
    pub min_rating: Option<f64>,
    pub location_bias_lat: Option<f64>,
    pub location_bias_lng: Option<f64>,
    pub location_bias_radius: Option<f64>,
    pub result_count: Option<i32>,
    pub pages_fetched: Option<i32>,
    pub searched_at: DateTime<Utc>,
}

/// Parameters recorded for one live search.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSearch {
    pub text_query: String,
    pub included_type: Option<String>,
    pub min_rating: Option<f64>,
    pub location_bias: Option<LocationBias>,
    pub result_count: i32,
    pub pages_fetched: Option<i32>,
}

/// Returns the most recent search for `(text_query, included_type)`.
///
/// A `None` type matches only searches recorded without a type; it is not a
/// wildcard.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_search(
    pool: &PgPool,
    text_query: &str,
    included_type: Option<&str>,
) -> Result<Option<SearchRow>, DbError> {
    let row = sqlx::query_as::<_, SearchRow>(
        "SELECT id, text_query, included_type, min_rating, location_bias_lat, \
                location_bias_lng, location_bias_radius, result_count, pages_fetched, \
                searched_at \
         FROM place_searches \
         WHERE text_query = $1 \
           AND included_type IS NOT DISTINCT FROM $2::TEXT \
         ORDER BY searched_at DESC, id DESC \
         LIMIT 1",
    )
    .bind(text_query)
    .bind(included_type)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Records a live search and returns the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_search(pool: &PgPool, search: &NewSearch) -> Result<SearchRow, DbError> {
    let row = sqlx::query_as::<_, SearchRow>(
        "INSERT INTO place_searches \
             (text_query, included_type, min_rating, location_bias_lat, location_bias_lng, \
              location_bias_radius, result_count, pages_fetched) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING id, text_query, included_type, min_rating, location_bias_lat, \
                   location_bias_lng, location_bias_radius, result_count, pages_fetched, \
                   searched_at",
    )
    .bind(&search.text_query)
    .bind(&search.included_type)
    .bind(search.min_rating)
    .bind(search.location_bias.map(|b| b.latitude))
    .bind(search.location_bias.map(|b| b.longitude))
    .bind(search.location_bias.map(|b| b.radius))
    .bind(search.result_count)
    .bind(search.pages_fetched)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Links a place to a search. Linking the same pair twice is a no-op.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails, including when either side
/// of the link does not exist.
pub async fn link_search_to_place(
    pool: &PgPool,
    search_id: i64,
    place_id: &str,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO place_search_results (search_id, place_id) \
         VALUES ($1, $2) \
         ON CONFLICT (search_id, place_id) DO NOTHING",
    )
    .bind(search_id)
    .bind(place_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Current state of every place linked to `search_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_places_for_search(
    pool: &PgPool,
    search_id: i64,
) -> Result<Vec<PlaceRow>, DbError> {
    let rows = sqlx::query_as::<_, PlaceRow>(
        "SELECT p.id, p.display_name, p.formatted_address, p.city, p.region, p.country, \
                p.postal_code, p.location_lat, p.location_lng, p.primary_type, p.types, \
                p.business_status, p.google_maps_uri, p.phone, p.website_uri, p.rating, \
                p.user_rating_count, p.price_level, p.created_at, p.updated_at \
         FROM places p \
         JOIN place_search_results r ON r.place_id = p.id \
         WHERE r.search_id = $1 \
         ORDER BY p.rating DESC NULLS LAST, p.id",
    )
    .bind(search_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
