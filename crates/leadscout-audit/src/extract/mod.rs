//! Pure functions turning raw HTML into audit signals. No network I/O.

mod contact;
mod signals;
mod social;

pub use contact::{
    dedupe_valid_emails, extract_contact_info, extract_emails, extract_phones, is_valid_email,
    ContactInfo,
};
pub use signals::{extract_quality_signals, is_free_subdomain, QualitySignals};
pub use social::extract_social_links;

/// Keeps the first occurrence of each item.
pub(crate) fn dedupe_in_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
