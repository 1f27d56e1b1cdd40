use thiserror::Error;

/// Construction errors for [`crate::SiteAuditor`].
///
/// Scrapes themselves never fail; faults are recorded on the result.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
