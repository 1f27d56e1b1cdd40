use sqlx::PgPool;

use crate::DbError;

/// Row counts across the lead tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct LeadStats {
    pub total_places: i64,
    pub with_website: i64,
    pub without_website: i64,
    pub total_searches: i64,
    pub total_audits: i64,
}

/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_stats(pool: &PgPool) -> Result<LeadStats, DbError> {
    let stats = sqlx::query_as::<_, LeadStats>(
        "SELECT \
             (SELECT COUNT(*) FROM places) AS total_places, \
             (SELECT COUNT(*) FROM places \
               WHERE website_uri IS NOT NULL AND website_uri <> '') AS with_website, \
             (SELECT COUNT(*) FROM places \
               WHERE website_uri IS NULL OR website_uri = '') AS without_website, \
             (SELECT COUNT(*) FROM place_searches) AS total_searches, \
             (SELECT COUNT(*) FROM site_audits) AS total_audits",
    )
    .fetch_one(pool)
    .await?;

    Ok(stats)
}
