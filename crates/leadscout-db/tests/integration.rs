//! Offline tests for leadscout-db pool configuration and row conversions.
//! These tests do not require a live database connection.

use std::collections::BTreeMap;

use chrono::Utc;
use leadscout_core::{AppConfig, BusinessStatus, Environment, Place, PriceLevel, ScrapeResult};
use leadscout_db::{PlaceFilter, PlaceRow, PoolConfig, SiteAuditRow};
use sqlx::types::Json;

fn app_config() -> AppConfig {
    AppConfig {
        database_url: Some("postgres://example".to_string()),
        env: Environment::Test,
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        google_maps_api_key: None,
        places_timeout_secs: 30,
        places_page_size: 20,
        audit_timeout_secs: 10,
        audit_followup_timeout_secs: 5,
        audit_user_agent: "ua".to_string(),
        audit_lists_path: None,
        search_delay_ms: 150,
        search_error_delay_ms: 500,
        audit_delay_ms: 1000,
    }
}

fn place_row(id: &str) -> PlaceRow {
    let now = Utc::now();
    PlaceRow {
        id: id.to_string(),
        display_name: Some("Acme Plumbing".to_string()),
        formatted_address: Some("1 Main St, Boulder, CO 80302, USA".to_string()),
        city: Some("Boulder".to_string()),
        region: Some("CO".to_string()),
        country: Some("US".to_string()),
        postal_code: Some("80302".to_string()),
        location_lat: Some(40.01),
        location_lng: Some(-105.27),
        primary_type: Some("plumber".to_string()),
        types: vec!["plumber".to_string(), "point_of_interest".to_string()],
        business_status: Some("OPERATIONAL".to_string()),
        google_maps_uri: None,
        phone: Some("+1 303-555-0100".to_string()),
        website_uri: None,
        rating: Some(4.6),
        user_rating_count: Some(87),
        price_level: Some("PRICE_LEVEL_INEXPENSIVE".to_string()),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config());
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn place_row_converts_enum_text() {
    let place: Place = place_row("p1").into();
    assert_eq!(place.id, "p1");
    assert_eq!(place.business_status, Some(BusinessStatus::Operational));
    assert_eq!(place.price_level, Some(PriceLevel::Inexpensive));
    assert_eq!(place.types.len(), 2);
    assert!(!place.has_website());
}

#[test]
fn place_row_drops_unknown_enum_text() {
    let mut row = place_row("p1");
    row.business_status = Some("SOMETHING_NEW".to_string());
    row.price_level = Some("PRICE_LEVEL_UNSPECIFIED".to_string());
    let place: Place = row.into();
    assert!(place.business_status.is_none());
    assert!(place.price_level.is_none());
}

#[test]
fn site_audit_row_converts_to_scrape_result() {
    let mut social = BTreeMap::new();
    social.insert("facebook".to_string(), "https://facebook.com/acme".to_string());

    let row = SiteAuditRow {
        id: 1,
        place_id: Some("p1".to_string()),
        url: "acme.com".to_string(),
        success: true,
        error: None,
        emails: vec!["owner@acme.com".to_string()],
        phone_numbers: vec![],
        social_links: Json(social),
        https: true,
        has_viewport: false,
        generator: Some("WordPress 6.4".to_string()),
        free_subdomain: false,
        copyright_year: Some(2019),
        server_header: Some("nginx".to_string()),
        has_sitemap: true,
        has_structured_data: false,
        load_time_ms: Some(420),
        page_size: Some(18_000),
        scraped_at: Utc::now(),
    };

    let result: ScrapeResult = row.into();
    assert_eq!(result.url, "acme.com");
    assert_eq!(result.social_links["facebook"], "https://facebook.com/acme");
    assert_eq!(result.flags(2023), vec!["NO-VIEWPORT", "©2019", "1 emails"]);
}

#[test]
fn place_filter_default_is_unconstrained() {
    let filter = PlaceFilter::default();
    assert!(filter.country.is_none());
    assert!(filter.has_website.is_none());
    assert!(filter.limit.is_none());
}
