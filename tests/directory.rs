//! Integration tests for doctor discovery using a mocked directory
//! and a MockClock for deterministic availability text.

use chrono::{NaiveDate, NaiveDateTime};
use clinic_locator::{
    DoctorDirectory, DoctorListing, LatLng, MockClock, PlacesApiClient,
    config::{NetworkConfig, SearchConfig},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Wednesday 2024-02-14 at the given time.
fn wednesday_at(hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 14)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

fn directory_for(server: &MockServer, clock: MockClock) -> DoctorDirectory<MockClock> {
    let network = NetworkConfig {
        request_timeout_secs: 10,
        connect_timeout_secs: 5,
    };
    let client = PlacesApiClient::new(server.uri(), "test-key".to_string(), &network).unwrap();
    DoctorDirectory::new(client, SearchConfig::default(), clock)
}

async fn mount_details(server: &MockServer, place_id: &str, result: &str) {
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", place_id))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(format!(r#"{{"status": "OK", "result": {result}}}"#)),
        )
        .mount(server)
        .await;
}

async fn mount_nearby(server: &MockServer) {
    let body = r#"{
        "status": "OK",
        "results": [
            {"place_id": "gyn", "name": "Bloom Women's Clinic", "types": ["doctor"], "vicinity": "12 Park Ave"},
            {"place_id": "er", "name": "St. Mary's", "types": ["hospital", "establishment"]},
            {"place_id": "gone", "name": "Closed Down Clinic"},
            {"name": "No Id Clinic"}
        ]
    }"#;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("radius", "5000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;

    mount_details(
        server,
        "gyn",
        r#"{
            "name": "Bloom Women's Clinic",
            "rating": 4.8,
            "user_ratings_total": 210,
            "opening_hours": {
                "periods": [
                    {"open": {"day": 3, "time": "0900"}, "close": {"day": 3, "time": "1700"}},
                    {"open": {"day": 4, "time": "0900"}, "close": {"day": 4, "time": "1700"}}
                ]
            }
        }"#,
    )
    .await;

    mount_details(
        server,
        "er",
        r#"{"name": "St. Mary's", "opening_hours": {"periods": [{"open": {"day": 0, "time": "0000"}}]}}"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "gone"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status": "NOT_FOUND"}"#))
        .mount(server)
        .await;
}

fn names(listings: &[DoctorListing]) -> Vec<&str> {
    listings.iter().map(|l| l.name.as_str()).collect()
}

// ==================== Nearby Tests ====================

#[tokio::test]
async fn test_nearby_annotates_in_search_order() {
    let server = MockServer::start().await;
    mount_nearby(&server).await;

    let directory = directory_for(&server, MockClock::new(wednesday_at(10, 30)));
    let listings = directory.nearby(LatLng::new(40.7128, -74.006)).await.unwrap();

    // failed and id-less lookups are skipped
    assert_eq!(names(&listings), vec!["Bloom Women's Clinic", "St. Mary's"]);

    let bloom = &listings[0];
    assert_eq!(bloom.specialties, vec!["General Medicine", "Gynecology"]);
    assert_eq!(bloom.availability, "Open now • 9:00 AM - 5:00 PM");
    assert_eq!(bloom.reviews, 210);
    assert_eq!(bloom.vicinity.as_deref(), Some("12 Park Ave"));

    let hospital = &listings[1];
    assert_eq!(hospital.specialties, vec!["Multi-specialty Hospital"]);
    assert_eq!(hospital.availability, "Open 24/7");
}

#[tokio::test]
async fn test_nearby_availability_follows_clock() {
    let server = MockServer::start().await;
    mount_nearby(&server).await;

    let directory = directory_for(&server, MockClock::new(wednesday_at(18, 0)));
    let listings = directory.nearby(LatLng::new(40.7128, -74.006)).await.unwrap();

    assert_eq!(listings[0].availability, "Closed • Opens at 9:00 AM");
}

#[tokio::test]
async fn test_nearby_propagates_directory_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"status": "OVER_QUERY_LIMIT", "error_message": "Slow down"}"#,
        ))
        .mount(&server)
        .await;

    let directory = directory_for(&server, MockClock::new(wednesday_at(9, 0)));
    let err = directory.nearby(LatLng::new(0.0, 0.0)).await.unwrap_err();
    assert!(err.to_string().contains("OVER_QUERY_LIMIT"));
}

// ==================== Search Tests ====================

#[tokio::test]
async fn test_specialty_search_filters_locally() {
    let server = MockServer::start().await;
    mount_nearby(&server).await;

    // no text search mock: a specialty term must not hit the directory
    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let directory = directory_for(&server, MockClock::new(wednesday_at(10, 0)));
    let nearby = directory.nearby(LatLng::new(40.7128, -74.006)).await.unwrap();

    let found = directory.search("gynecology", &nearby).await;
    assert_eq!(names(&found), vec!["Bloom Women's Clinic"]);

    let found = directory.search("hospital", &nearby).await;
    assert_eq!(names(&found), vec!["St. Mary's"]);
}

#[tokio::test]
async fn test_blank_search_returns_nearby() {
    let server = MockServer::start().await;
    mount_nearby(&server).await;

    let directory = directory_for(&server, MockClock::new(wednesday_at(10, 0)));
    let nearby = directory.nearby(LatLng::new(40.7128, -74.006)).await.unwrap();

    assert_eq!(directory.search("   ", &nearby).await, nearby);
}

#[tokio::test]
async fn test_name_search_uses_text_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("query", "Mayo clinic hospital doctor medical"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"status": "OK", "results": [{"place_id": "mayo", "name": "Mayo Clinic", "types": ["hospital"]}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    mount_details(&server, "mayo", r#"{"name": "Mayo Clinic", "rating": 4.9}"#).await;

    let directory = directory_for(&server, MockClock::new(wednesday_at(10, 0)));
    let found = directory.search("Mayo", &[]).await;

    assert_eq!(names(&found), vec!["Mayo Clinic"]);
    assert_eq!(found[0].specialties, vec!["Multi-specialty Hospital"]);
    assert_eq!(found[0].availability, "Hours not available");
}

#[tokio::test]
async fn test_text_search_limits_results() {
    let server = MockServer::start().await;

    let results: Vec<String> = (0..15)
        .map(|i| format!(r#"{{"place_id": "p{i}", "name": "Greenwood Rooms {i}"}}"#))
        .collect();
    let body = format!(r#"{{"status": "OK", "results": [{}]}}"#, results.join(","));

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status": "OK", "result": {}}"#))
        .expect(10)
        .mount(&server)
        .await;

    let directory = directory_for(&server, MockClock::new(wednesday_at(10, 0)));
    let found = directory.search("Greenwood", &[]).await;

    assert_eq!(found.len(), 10);
    assert_eq!(found[0].name, "Greenwood Rooms 0");
    assert_eq!(found[9].name, "Greenwood Rooms 9");
}

#[tokio::test]
async fn test_name_search_falls_back_to_nearby_names() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let nearby = vec![
        DoctorListing {
            name: "Greenwood Rooms".into(),
            ..DoctorListing::default()
        },
        DoctorListing {
            name: "Lakeside Practice".into(),
            ..DoctorListing::default()
        },
    ];

    let directory = directory_for(&server, MockClock::new(wednesday_at(10, 0)));
    let found = directory.search("greenwood", &nearby).await;

    assert_eq!(names(&found), vec!["Greenwood Rooms"]);
}
