use leadscout_db::DbError;
use leadscout_places::PlacesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeadError {
    #[error(transparent)]
    Places(#[from] PlacesError),
    #[error("storage error: {0}")]
    Store(#[from] DbError),
}
