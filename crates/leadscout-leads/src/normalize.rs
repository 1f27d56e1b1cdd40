//! Conversion from API places to stored [`Place`] records.

use leadscout_core::Place;
use leadscout_places::{AddressComponent, ApiPlace};

const DEFAULT_COUNTRY: &str = "US";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFields {
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

/// Picks short-text address parts by component type. City falls back from
/// `locality` to `postal_town`.
#[must_use]
pub fn extract_address_fields(components: &[AddressComponent]) -> AddressFields {
    let short_text = |kind: &str| {
        components
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
            .and_then(|c| c.short_text.clone())
    };

    AddressFields {
        city: short_text("locality").or_else(|| short_text("postal_town")),
        region: short_text("administrative_area_level_1"),
        country: short_text("country"),
        postal_code: short_text("postal_code"),
    }
}

/// Country defaults to `US` when the API gives none.
#[must_use]
pub fn to_place(api: ApiPlace) -> Place {
    let address = extract_address_fields(&api.address_components);

    Place {
        id: api.id,
        display_name: api.display_name.map(|d| d.text),
        formatted_address: api.formatted_address,
        city: address.city,
        region: address.region,
        country: Some(
            address
                .country
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
        ),
        postal_code: address.postal_code,
        location_lat: api.location.as_ref().map(|l| l.latitude),
        location_lng: api.location.as_ref().map(|l| l.longitude),
        primary_type: api.primary_type,
        types: api.types,
        business_status: api.business_status.and_then(|s| s.parse().ok()),
        google_maps_uri: api.google_maps_uri,
        phone: api.international_phone_number,
        website_uri: api.website_uri,
        rating: api.rating,
        user_rating_count: api.user_rating_count,
        price_level: api.price_level.and_then(|p| p.parse().ok()),
    }
}
