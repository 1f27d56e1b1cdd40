//! Client for the Places "Text Search" v1 API.

pub mod client;
pub mod error;
pub mod place_types;
pub mod types;

pub use client::{GooglePlacesClient, DEFAULT_BASE_URL, ENTERPRISE_FIELD_MASK};
pub use error::PlacesError;
pub use place_types::{all_place_types, is_known_place_type, PLACE_TYPE_CATEGORIES};
pub use types::{
    AddressComponent, ApiPlace, DisplayName, LatLng, PagedSearch, TextSearch, TextSearchResponse,
};
