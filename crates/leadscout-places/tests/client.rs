//! Integration tests for `GooglePlacesClient` using wiremock HTTP mocks.

use leadscout_core::LocationBias;
use leadscout_places::{GooglePlacesClient, PlacesError, TextSearch};
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GooglePlacesClient {
    GooglePlacesClient::with_base_url(Some("test-key"), 30, base_url)
        .expect("client construction should not fail")
}

fn place_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "displayName": { "text": format!("Business {id}"), "languageCode": "en" },
        "formattedAddress": "1 Main St, Boulder, CO 80302, USA",
        "addressComponents": [
            { "longText": "Boulder", "shortText": "Boulder", "types": ["locality", "political"] },
            { "longText": "Colorado", "shortText": "CO", "types": ["administrative_area_level_1"] }
        ],
        "internationalPhoneNumber": "+1 303-555-0100",
        "rating": 4.6,
        "userRatingCount": 87,
        "businessStatus": "OPERATIONAL",
        "location": { "latitude": 40.01, "longitude": -105.27 }
    })
}

#[tokio::test]
async fn search_text_sends_key_mask_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/places:searchText"))
        .and(header("X-Goog-Api-Key", "test-key"))
        .and(header_exists("X-Goog-FieldMask"))
        .and(body_partial_json(serde_json::json!({
            "textQuery": "plumber in Boulder, CO",
            "maxResultCount": 20,
            "includedType": "plumber",
            "locationBias": {
                "circle": {
                    "center": { "latitude": 40.01, "longitude": -105.27 },
                    "radius": 50000.0
                }
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "places": [place_json("p1")] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut search = TextSearch::new("plumber in Boulder, CO");
    search.included_type = Some("plumber".to_string());
    search.location_bias = Some(LocationBias {
        latitude: 40.01,
        longitude: -105.27,
        radius: 50_000.0,
    });

    let response = test_client(&server.uri())
        .search_text(&search, None)
        .await
        .expect("search should succeed");

    assert_eq!(response.places.len(), 1);
    let place = &response.places[0];
    assert_eq!(place.id, "p1");
    assert_eq!(
        place.display_name.as_ref().map(|d| d.text.as_str()),
        Some("Business p1")
    );
    assert_eq!(place.address_components.len(), 2);
    assert_eq!(place.user_rating_count, Some(87));
    assert!(response.next_page_token.is_none());
}

#[tokio::test]
async fn api_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/places:searchText"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .search_text(&TextSearch::new("cafe in Davis, CA"), None)
        .await
        .unwrap_err();

    match &err {
        PlacesError::Api { status, body } => {
            assert_eq!(*status, 403);
            assert_eq!(body, "API key not valid");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Places API error: 403 - API key not valid");
}

#[tokio::test]
async fn search_text_all_follows_tokens_until_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({ "pageToken": "page-2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "places": [place_json("p3")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "places": [place_json("p1"), place_json("p2")],
            "nextPageToken": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let paged = test_client(&server.uri())
        .search_text_all(&TextSearch::new("bakery in Boise, ID"), 3)
        .await
        .expect("pagination should succeed");

    assert_eq!(paged.pages_fetched, 2);
    let ids: Vec<&str> = paged.places.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);
}

#[tokio::test]
async fn search_text_all_stops_at_page_cap() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "places": [place_json("p1")],
            "nextPageToken": "always-more"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let paged = test_client(&server.uri())
        .search_text_all(&TextSearch::new("gym in Provo, UT"), 2)
        .await
        .unwrap();

    assert_eq!(paged.pages_fetched, 2);
    assert_eq!(paged.places.len(), 2);
}

#[tokio::test]
async fn search_text_all_propagates_mid_pagination_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({ "pageToken": "page-2" })))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "places": [place_json("p1")],
            "nextPageToken": "page-2"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .search_text_all(&TextSearch::new("spa in Reno, NV"), 3)
        .await
        .unwrap_err();

    assert!(matches!(err, PlacesError::Api { status: 429, .. }));
}

#[tokio::test]
async fn malformed_json_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .search_text(&TextSearch::new("florist in Bend, OR"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, PlacesError::Deserialize { .. }));
}
