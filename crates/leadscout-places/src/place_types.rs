//! Place types accepted as a search type filter, grouped by vertical.

pub const PLACE_TYPE_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "home_services",
        &[
            "plumber",
            "electrician",
            "roofing_contractor",
            "painter",
            "moving_company",
            "locksmith",
            "general_contractor",
            "hvac_contractor",
        ],
    ),
    (
        "auto",
        &[
            "car_repair",
            "car_wash",
            "auto_body_shop",
            "car_dealer",
            "tire_shop",
        ],
    ),
    (
        "personal",
        &[
            "barber_shop",
            "beauty_salon",
            "hair_salon",
            "nail_salon",
            "spa",
        ],
    ),
    (
        "professional",
        &[
            "lawyer",
            "accounting",
            "insurance_agency",
            "real_estate_agency",
        ],
    ),
    (
        "local",
        &[
            "florist",
            "tailor",
            "pet_store",
            "veterinary_care",
            "dry_cleaning",
            "laundry",
            "funeral_home",
            "storage",
        ],
    ),
    ("food", &["restaurant", "cafe", "bakery", "bar", "coffee_shop"]),
    ("health", &["dentist", "doctor", "pharmacy", "physiotherapist"]),
    ("fitness", &["gym", "yoga_studio"]),
    (
        "lodging",
        &["hotel", "motel", "bed_and_breakfast", "campground"],
    ),
];

pub fn all_place_types() -> impl Iterator<Item = &'static str> {
    PLACE_TYPE_CATEGORIES
        .iter()
        .flat_map(|(_, types)| types.iter().copied())
}

/// Exact, case-sensitive match against the catalogue.
#[must_use]
pub fn is_known_place_type(candidate: &str) -> bool {
    all_place_types().any(|t| t == candidate)
}
