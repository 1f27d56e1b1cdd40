use std::sync::LazyLock;

use leadscout_core::AuditLists;
use regex::Regex;

use super::dedupe_in_order;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid regex")
});
static MAILTO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)mailto:([^"'\s?]+)"#).expect("valid regex"));
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}")
        .expect("valid regex")
});
static TEL_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href=["']tel:([^"']+)["']"#).expect("valid regex"));
static SCRIPT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*?</script>").expect("valid regex"));

// Retina asset names such as `logo@2x.png`.
static RETINA_ASSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[0-9]+(\.[0-9]+)?x").expect("valid regex"));
static IMAGE_EXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(png|jpg|jpeg|gif|svg|webp|ico)$").expect("valid regex"));
static TLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([a-z]{2,})$").expect("valid regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

/// Raw, lower-cased email harvest: `mailto:` targets first, then free-text
/// matches. Not deduplicated or filtered.
#[must_use]
pub fn extract_emails(text: &str) -> Vec<String> {
    let from_mailto = MAILTO_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
        .filter(|e| !e.is_empty());
    let from_text = EMAIL_RE.find_iter(text).map(|m| m.as_str().to_lowercase());
    from_mailto.chain(from_text).collect()
}

/// Raw phone harvest: `tel:` hrefs, then free-text matches outside
/// `<script>` blocks. Not deduplicated.
#[must_use]
pub fn extract_phones(text: &str) -> Vec<String> {
    let mut phones: Vec<String> = TEL_HREF_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    let stripped = SCRIPT_BLOCK_RE.replace_all(text, "");
    phones.extend(
        PHONE_RE
            .find_iter(&stripped)
            .map(|m| m.as_str().trim().to_string()),
    );
    phones
}

/// Rejects retina asset names, image filenames, blacklisted domains,
/// lengths outside `6..=100`, and addresses without an alphabetic TLD.
#[must_use]
pub fn is_valid_email(candidate: &str, lists: &AuditLists) -> bool {
    let lower = candidate.to_lowercase();

    if RETINA_ASSET_RE.is_match(&lower) || IMAGE_EXT_RE.is_match(&lower) {
        return false;
    }
    if lists
        .email_blacklist
        .iter()
        .any(|b| lower.contains(b.as_str()))
    {
        return false;
    }
    if !(6..=100).contains(&lower.len()) {
        return false;
    }
    TLD_RE.is_match(&lower)
}

/// Deduplicates in discovery order, then drops invalid addresses.
#[must_use]
pub fn dedupe_valid_emails(emails: Vec<String>, lists: &AuditLists) -> Vec<String> {
    dedupe_in_order(emails)
        .into_iter()
        .filter(|e| is_valid_email(e, lists))
        .collect()
}

#[must_use]
pub fn extract_contact_info(html: &str, lists: &AuditLists) -> ContactInfo {
    ContactInfo {
        emails: dedupe_valid_emails(extract_emails(html), lists),
        phones: dedupe_in_order(extract_phones(html)),
    }
}
