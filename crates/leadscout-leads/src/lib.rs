//! Cache-or-fetch place search, persistence seam, and batch drivers.

pub mod batch;
pub mod error;
pub mod normalize;
pub mod service;
pub mod store;

pub use batch::{
    run_bulk_audit, run_search_batch, AuditSummary, BatchPacing, SearchBatchSummary,
    STALE_COPYRIGHT_BEFORE,
};
pub use error::LeadError;
pub use normalize::{extract_address_fields, to_place, AddressFields};
pub use service::{LeadService, SearchOptions, SearchOutcome, SearchQuery};
pub use store::{LeadStore, PgLeadStore};
