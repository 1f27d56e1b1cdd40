//! Business location records sourced from the place-search API.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessStatus {
    Operational,
    ClosedTemporarily,
    ClosedPermanently,
}

impl BusinessStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BusinessStatus::Operational => "OPERATIONAL",
            BusinessStatus::ClosedTemporarily => "CLOSED_TEMPORARILY",
            BusinessStatus::ClosedPermanently => "CLOSED_PERMANENTLY",
        }
    }
}

impl FromStr for BusinessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPERATIONAL" => Ok(BusinessStatus::Operational),
            "CLOSED_TEMPORARILY" => Ok(BusinessStatus::ClosedTemporarily),
            "CLOSED_PERMANENTLY" => Ok(BusinessStatus::ClosedPermanently),
            other => Err(format!("unknown business status '{other}'")),
        }
    }
}

impl std::fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceLevel {
    #[serde(rename = "PRICE_LEVEL_FREE")]
    Free,
    #[serde(rename = "PRICE_LEVEL_INEXPENSIVE")]
    Inexpensive,
    #[serde(rename = "PRICE_LEVEL_MODERATE")]
    Moderate,
    #[serde(rename = "PRICE_LEVEL_EXPENSIVE")]
    Expensive,
    #[serde(rename = "PRICE_LEVEL_VERY_EXPENSIVE")]
    VeryExpensive,
}

impl PriceLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PriceLevel::Free => "PRICE_LEVEL_FREE",
            PriceLevel::Inexpensive => "PRICE_LEVEL_INEXPENSIVE",
            PriceLevel::Moderate => "PRICE_LEVEL_MODERATE",
            PriceLevel::Expensive => "PRICE_LEVEL_EXPENSIVE",
            PriceLevel::VeryExpensive => "PRICE_LEVEL_VERY_EXPENSIVE",
        }
    }

    /// The two cheapest tiers.
    #[must_use]
    pub fn is_budget(self) -> bool {
        matches!(self, PriceLevel::Free | PriceLevel::Inexpensive)
    }
}

impl FromStr for PriceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRICE_LEVEL_FREE" => Ok(PriceLevel::Free),
            "PRICE_LEVEL_INEXPENSIVE" => Ok(PriceLevel::Inexpensive),
            "PRICE_LEVEL_MODERATE" => Ok(PriceLevel::Moderate),
            "PRICE_LEVEL_EXPENSIVE" => Ok(PriceLevel::Expensive),
            "PRICE_LEVEL_VERY_EXPENSIVE" => Ok(PriceLevel::VeryExpensive),
            other => Err(format!("unknown price level '{other}'")),
        }
    }
}

impl std::fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Circle used to bias a text search towards a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationBias {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius in meters.
    pub radius: f64,
}

/// A discovered business location.
///
/// `id` is the externally-assigned place id and the join key for searches
/// and audits; it never changes once a row exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub display_name: Option<String>,
    pub formatted_address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub primary_type: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    pub business_status: Option<BusinessStatus>,
    pub google_maps_uri: Option<String>,
    pub phone: Option<String>,
    pub website_uri: Option<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<i32>,
    pub price_level: Option<PriceLevel>,
}

impl Place {
    /// A place with only its id set; every other attribute absent.
    #[must_use]
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            formatted_address: None,
            city: None,
            region: None,
            country: None,
            postal_code: None,
            location_lat: None,
            location_lng: None,
            primary_type: None,
            types: Vec::new(),
            business_status: None,
            google_maps_uri: None,
            phone: None,
            website_uri: None,
            rating: None,
            user_rating_count: None,
            price_level: None,
        }
    }

    /// `true` when a non-empty website URL is on record.
    #[must_use]
    pub fn has_website(&self) -> bool {
        self.website_uri.as_deref().is_some_and(|w| !w.trim().is_empty())
    }

    #[must_use]
    pub fn has_phone(&self) -> bool {
        self.phone.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_status_round_trips_through_text() {
        for status in [
            BusinessStatus::Operational,
            BusinessStatus::ClosedTemporarily,
            BusinessStatus::ClosedPermanently,
        ] {
            assert_eq!(status.as_str().parse::<BusinessStatus>(), Ok(status));
        }
        assert!("OPEN".parse::<BusinessStatus>().is_err());
    }

    #[test]
    fn price_level_deserializes_from_api_text() {
        let level: PriceLevel = serde_json::from_str("\"PRICE_LEVEL_INEXPENSIVE\"").unwrap();
        assert_eq!(level, PriceLevel::Inexpensive);
        assert!(level.is_budget());
        assert!(!PriceLevel::Moderate.is_budget());
    }

    #[test]
    fn empty_website_is_not_a_website() {
        let mut place = Place::bare("p1");
        assert!(!place.has_website());
        place.website_uri = Some(String::new());
        assert!(!place.has_website());
        place.website_uri = Some("https://acme.com".to_string());
        assert!(place.has_website());
    }
}
