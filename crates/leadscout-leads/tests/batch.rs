//! Batch driver behavior: per-item error isolation and persistence.

mod common;

use common::MemoryStore;
use leadscout_audit::{AuditorConfig, SiteAuditor};
use leadscout_core::{AuditLists, LocationBias, Place, PopulateQuery};
use leadscout_leads::{run_bulk_audit, run_search_batch, BatchPacing, LeadService};
use leadscout_places::GooglePlacesClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn populate_query(text: &str) -> PopulateQuery {
    PopulateQuery {
        business_type: "plumber".to_string(),
        city: "Denver".to_string(),
        state_code: "CO".to_string(),
        text_query: text.to_string(),
        included_type: Some("plumber".to_string()),
        location_bias: LocationBias {
            latitude: 39.74,
            longitude: -104.99,
            radius: 50_000.0,
        },
    }
}

fn auditor() -> SiteAuditor {
    let config = AuditorConfig {
        timeout_secs: 5,
        followup_timeout_secs: 2,
        user_agent: "leadscout-test".to_string(),
    };
    SiteAuditor::new(&config, AuditLists::default()).expect("auditor construction should not fail")
}

#[tokio::test]
async fn search_batch_counts_errors_and_keeps_going() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "textQuery": "broken query" })))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "places": [{ "id": "p1" }] })),
        )
        .mount(&server)
        .await;

    let client = GooglePlacesClient::with_base_url(Some("k"), 5, &server.uri()).unwrap();
    let service = LeadService::new(MemoryStore::default(), client);
    let queries = vec![
        populate_query("plumber in Denver, CO"),
        populate_query("broken query"),
        populate_query("plumber in Denver, CO"),
    ];

    let summary = run_search_batch(&service, &queries, BatchPacing::none(), true).await;

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.cached, 1);
    assert_eq!(summary.places, 2);

    let searches = service.store().searches();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].included_type.as_deref(), Some("plumber"));
    assert_eq!(
        searches[0].location_bias.map(|b| b.radius),
        Some(50_000.0)
    );
}

#[tokio::test]
async fn bulk_audit_persists_successes_and_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/good"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<meta name="viewport" content="width=device-width"><a href="mailto:owner@acmeplumbing.com">x</a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut good = Place::bare("a-good");
    good.website_uri = Some(format!("{}/good", server.uri()));
    let mut gone = Place::bare("b-gone");
    gone.website_uri = Some(format!("{}/gone", server.uri()));
    let mut no_site = Place::bare("c-none");
    no_site.website_uri = Some(String::new());

    let store = MemoryStore::with_places([good, gone, no_site]);
    let summary = run_bulk_audit(&store, &auditor(), None, BatchPacing::none(), true)
        .await
        .expect("bulk audit");

    assert_eq!(summary.audited, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.with_emails, 1);

    let audits = store.audits();
    assert_eq!(audits.len(), 2);
    let failed = audits
        .iter()
        .find(|(id, _)| id == "b-gone")
        .map(|(_, r)| r)
        .expect("failed audit stored");
    assert_eq!(failed.error.as_deref(), Some("HTTP 404"));

    let rerun = run_bulk_audit(&store, &auditor(), None, BatchPacing::none(), true)
        .await
        .expect("second bulk audit");
    assert_eq!(rerun.audited, 0);
}

#[tokio::test]
async fn bulk_audit_respects_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>ok</p>"))
        .mount(&server)
        .await;

    let places = ["a", "b", "c"].map(|id| {
        let mut place = Place::bare(id);
        place.website_uri = Some(format!("{}/{id}", server.uri()));
        place
    });
    let store = MemoryStore::with_places(places);

    let summary = run_bulk_audit(&store, &auditor(), Some(2), BatchPacing::none(), true)
        .await
        .expect("bulk audit");
    assert_eq!(summary.audited, 2);
    assert_eq!(store.audits().len(), 2);
}
