//! Editable lists consumed by the website audit heuristics.
//!
//! The compiled-in defaults cover common noise domains and free website
//! builders. A YAML file may override either list:
//!
//! ```yaml
//! email_blacklist:
//!   - example.com
//!   - sentry.io
//! free_subdomains:
//!   - .wixsite.com
//! ```
//!
//! A key left out of the file keeps its default list.

use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Substrings that mark a harvested email address as noise.
pub const DEFAULT_EMAIL_BLACKLIST: &[&str] = &[
    "example.com",
    "domain.com",
    "email.com",
    "yoursite.com",
    "website.com",
    "sentry.io",
    "wixpress.com",
    "w3.org",
    "schema.org",
    "googleapis.com",
    "gstatic.com",
    "wordpress.org",
    "wordpress.com",
    "gravatar.com",
];

/// Hostname suffixes of free website-builder subdomains.
pub const DEFAULT_FREE_SUBDOMAINS: &[&str] = &[
    ".wixsite.com",
    ".weebly.com",
    ".squarespace.com",
    ".wordpress.com",
    ".blogspot.com",
    ".godaddysites.com",
    ".edan.io",
    ".carrd.co",
    ".webflow.io",
    ".netlify.app",
    ".vercel.app",
    ".myshopify.com",
    ".wix.com",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLists {
    pub email_blacklist: Vec<String>,
    pub free_subdomains: Vec<String>,
}

impl Default for AuditLists {
    fn default() -> Self {
        Self {
            email_blacklist: DEFAULT_EMAIL_BLACKLIST
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            free_subdomains: DEFAULT_FREE_SUBDOMAINS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuditListsFile {
    email_blacklist: Option<Vec<String>>,
    free_subdomains: Option<Vec<String>>,
}

impl AuditLists {
    /// Parse a YAML document, falling back to defaults for missing keys.
    ///
    /// Entries are trimmed and lower-cased; blank entries are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileParse`] on malformed YAML and
    /// [`ConfigError::Validation`] if a list contains a blank entry.
    pub fn from_yaml(source: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: AuditListsFile =
            serde_yaml::from_str(source).map_err(|e| ConfigError::FileParse {
                path: origin.to_string(),
                source: e,
            })?;

        let defaults = Self::default();
        let email_blacklist = match file.email_blacklist {
            Some(list) => normalize_entries(list, "email_blacklist")?,
            None => defaults.email_blacklist,
        };
        let free_subdomains = match file.free_subdomains {
            Some(list) => normalize_entries(list, "free_subdomains")?,
            None => defaults.free_subdomains,
        };

        Ok(Self {
            email_blacklist,
            free_subdomains,
        })
    }
}

fn normalize_entries(list: Vec<String>, key: &str) -> Result<Vec<String>, ConfigError> {
    list.into_iter()
        .map(|entry| {
            let entry = entry.trim().to_lowercase();
            if entry.is_empty() {
                Err(ConfigError::Validation(format!(
                    "{key} contains a blank entry"
                )))
            } else {
                Ok(entry)
            }
        })
        .collect()
}

/// Load audit lists from `path`, or return the defaults when `path` is `None`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_audit_lists(path: Option<&Path>) -> Result<AuditLists, ConfigError> {
    let Some(path) = path else {
        return Ok(AuditLists::default());
    };
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    AuditLists::from_yaml(&content, &path.display().to_string())
}
