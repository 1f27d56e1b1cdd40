//! Request and response types for `places:searchText`.
//!
//! Response types mirror the JSON the API returns for the enterprise field
//! mask. Every field is optional on the wire; absent fields deserialize to
//! `None` or an empty list.

use leadscout_core::LocationBias;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Parameters of one text search, independent of pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSearch {
    pub text_query: String,
    pub included_type: Option<String>,
    pub min_rating: Option<f64>,
    /// Results per page; the API caps this at 20.
    pub max_result_count: Option<u32>,
    pub location_bias: Option<LocationBias>,
}

impl TextSearch {
    #[must_use]
    pub fn new(text_query: impl Into<String>) -> Self {
        Self {
            text_query: text_query.into(),
            included_type: None,
            min_rating: None,
            max_result_count: None,
            location_bias: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchTextBody<'a> {
    pub text_query: &'a str,
    pub max_result_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_bias: Option<LocationBiasBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LocationBiasBody {
    pub circle: Circle,
}

#[derive(Debug, Serialize)]
pub(crate) struct Circle {
    pub center: LatLng,
    pub radius: f64,
}

impl From<LocationBias> for LocationBiasBody {
    fn from(bias: LocationBias) -> Self {
        Self {
            circle: Circle {
                center: LatLng {
                    latitude: bias.latitude,
                    longitude: bias.longitude,
                },
                radius: bias.radius,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSearchResponse {
    #[serde(default)]
    pub places: Vec<ApiPlace>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayName {
    pub text: String,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponent {
    #[serde(default)]
    pub long_text: Option<String>,
    #[serde(default)]
    pub short_text: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// One place as returned by the API.
///
/// `business_status` and `price_level` stay as raw text here; unknown
/// values are dropped during normalization rather than failing the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPlace {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<DisplayName>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub website_uri: Option<String>,
    #[serde(default)]
    pub google_maps_uri: Option<String>,
    #[serde(default)]
    pub primary_type: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_rating_count: Option<i32>,
    #[serde(default)]
    pub price_level: Option<String>,
    #[serde(default)]
    pub business_status: Option<String>,
    #[serde(default)]
    pub location: Option<LatLng>,
}

/// Places collected across one or more result pages.
#[derive(Debug, Clone, Default)]
pub struct PagedSearch {
    pub places: Vec<ApiPlace>,
    pub pages_fetched: u32,
}
