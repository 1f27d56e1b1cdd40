//! Persistence seam for the lead service and batch drivers.

use async_trait::async_trait;
use leadscout_core::{Place, ScrapeResult};
use leadscout_db::{DbError, NewSearch};
use sqlx::PgPool;

/// Storage operations the lead pipeline depends on.
///
/// [`PgLeadStore`] is the production implementation.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Id of the newest search matching `(text_query, included_type)`
    /// exactly. A `None` type matches only untyped searches.
    async fn find_search(
        &self,
        text_query: &str,
        included_type: Option<&str>,
    ) -> Result<Option<i64>, DbError>;

    /// Current state of the places linked to a search.
    async fn places_for_search(&self, search_id: i64) -> Result<Vec<Place>, DbError>;

    async fn upsert_place(&self, place: &Place) -> Result<(), DbError>;

    /// Returns the new search id.
    async fn insert_search(&self, search: &NewSearch) -> Result<i64, DbError>;

    /// Idempotent.
    async fn link_search_to_place(&self, search_id: i64, place_id: &str) -> Result<(), DbError>;

    /// Places with a website and no audit on record.
    async fn places_pending_audit(&self, limit: Option<i64>) -> Result<Vec<Place>, DbError>;

    async fn insert_site_audit(&self, place_id: &str, result: &ScrapeResult)
        -> Result<i64, DbError>;
}

#[derive(Debug, Clone)]
pub struct PgLeadStore {
    pool: PgPool,
}

impl PgLeadStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn find_search(
        &self,
        text_query: &str,
        included_type: Option<&str>,
    ) -> Result<Option<i64>, DbError> {
        let row = leadscout_db::find_search(&self.pool, text_query, included_type).await?;
        Ok(row.map(|r| r.id))
    }

    async fn places_for_search(&self, search_id: i64) -> Result<Vec<Place>, DbError> {
        let rows = leadscout_db::get_places_for_search(&self.pool, search_id).await?;
        Ok(rows.into_iter().map(Place::from).collect())
    }

    async fn upsert_place(&self, place: &Place) -> Result<(), DbError> {
        leadscout_db::upsert_place(&self.pool, place).await
    }

    async fn insert_search(&self, search: &NewSearch) -> Result<i64, DbError> {
        let row = leadscout_db::insert_search(&self.pool, search).await?;
        Ok(row.id)
    }

    async fn link_search_to_place(&self, search_id: i64, place_id: &str) -> Result<(), DbError> {
        leadscout_db::link_search_to_place(&self.pool, search_id, place_id).await
    }

    async fn places_pending_audit(&self, limit: Option<i64>) -> Result<Vec<Place>, DbError> {
        let rows = leadscout_db::list_places_pending_audit(&self.pool, limit).await?;
        Ok(rows.into_iter().map(Place::from).collect())
    }

    async fn insert_site_audit(
        &self,
        place_id: &str,
        result: &ScrapeResult,
    ) -> Result<i64, DbError> {
        leadscout_db::insert_site_audit(&self.pool, place_id, result).await
    }
}
