//! Website audit: HTML signal extraction and the network-bound site auditor.

pub mod auditor;
pub mod error;
pub mod extract;

pub use auditor::{AuditorConfig, SiteAuditor, CONTACT_PATHS};
pub use error::AuditError;
pub use extract::{
    extract_contact_info, extract_emails, extract_phones, extract_quality_signals,
    extract_social_links, is_free_subdomain, is_valid_email, ContactInfo, QualitySignals,
};
