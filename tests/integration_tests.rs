use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Local, NaiveDate};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use neows_gateway::config::GatewayConfig;
use neows_gateway::error::NeoError;
use neows_gateway::fetch::BasicClient;
use neows_gateway::http::error::UPSTREAM_FAILURE_MESSAGE;
use neows_gateway::http::{AppState, RouterOptions, create_router};
use neows_gateway::neows::{Upstream, aggregate_range};

const API_KEY: &str = "integration-key";

fn config_for(server: &MockServer) -> GatewayConfig {
    GatewayConfig::with_base_url(API_KEY, server.uri().parse().unwrap())
}

fn app(config: GatewayConfig) -> Router {
    let client = Arc::new(config.http_client().unwrap());
    create_router(AppState::new(client, config), RouterOptions::default())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn neo(name: &str, diameter: f64, kmh: &str) -> Value {
    json!({
        "id": name,
        "name": name,
        "estimated_diameter": {
            "kilometers": {
                "estimated_diameter_min": diameter,
                "estimated_diameter_max": diameter * 2.0
            }
        },
        "close_approach_data": [
            { "relative_velocity": { "kilometers_per_hour": kmh } }
        ]
    })
}

#[tokio::test]
async fn test_single_day_two_objects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/neo/rest/v1/feed"))
        .and(query_param("start_date", "2024-01-01"))
        .and(query_param("end_date", "2024-01-01"))
        .and(query_param("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "element_count": 2,
            "near_earth_objects": {
                "2024-01-01": [neo("small-slow", 0.2, "5000"), neo("large-fast", 1.2, "32000")]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(
        app(config_for(&server)),
        "/api/neows?start_date=2024-01-01&end_date=2024-01-01",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body,
        json!({
            "sizes": {
                "labels": ["Small (<0.5km)", "Medium (0.5-1km)", "Large (>=1km)"],
                "values": [1, 0, 1]
            },
            "speeds": {
                "labels": ["Slow (<10k km/h)", "Moderate (10k-30k km/h)", "Fast (>=30k km/h)"],
                "values": [1, 0, 1]
            }
        })
    );
}

#[tokio::test]
async fn test_empty_range_is_zero_filled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/neo/rest/v1/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "element_count": 0,
            "near_earth_objects": { "2024-01-01": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(
        app(config_for(&server)),
        "/api/neows?start_date=2024-01-01&end_date=2024-01-01",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["sizes"]["values"], json!([0, 0, 0]));
    assert_eq!(body["speeds"]["values"], json!([0, 0, 0]));
    assert_eq!(body["sizes"]["labels"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let tomorrow = Local::now().date_naive().succ_opt().unwrap();
    let future = format!(
        "/api/neows?start_date=2024-01-01&end_date={}",
        tomorrow.format("%Y-%m-%d")
    );

    let cases = [
        ("/api/neows?start_date=2024-02-01&end_date=2024-01-01", "INVALID_RANGE"),
        ("/api/neows?start_date=2024-1-01&end_date=2024-01-02", "INVALID_DATE_FORMAT"),
        ("/api/neows?start_date=yesterday&end_date=2024-01-02", "INVALID_DATE_FORMAT"),
        ("/api/neows?end_date=2024-01-02", "MISSING_PARAMETER"),
        (future.as_str(), "FUTURE_DATE_NOT_ALLOWED"),
    ];

    for (uri, code) in cases {
        let (status, body) = get(app(config_for(&server)), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], code, "{uri}");
    }
    // `expect(0)` is verified when `server` drops.
}

#[tokio::test]
async fn test_missing_grouping_key_is_not_echoed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/neo/rest/v1/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 500,
            "error_message": "internal upstream detail",
            "request": "api_key=integration-key"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(
        app(config_for(&server)),
        "/api/neows?start_date=2024-01-01&end_date=2024-01-02",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("UPSTREAM_INVALID_RESPONSE"));
    assert!(!text.contains("internal upstream detail"));
    assert!(!text.contains(API_KEY));
}

#[tokio::test]
async fn test_upstream_rate_limit_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/neo/rest/v1/feed"))
        .respond_with(ResponseTemplate::new(429).set_body_string("OVER_RATE_LIMIT"))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(
        app(config_for(&server)),
        "/api/neows?start_date=2024-01-01&end_date=2024-01-02",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_record_without_approach_fails_whole_request() {
    let server = MockServer::start().await;
    let mut broken = neo("broken", 0.3, "1000");
    broken["close_approach_data"] = json!([]);

    Mock::given(method("GET"))
        .and(path("/neo/rest/v1/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "near_earth_objects": {
                "2024-01-01": [neo("fine", 0.2, "5000"), broken]
            }
        })))
        .mount(&server)
        .await;

    let (status, body) = get(
        app(config_for(&server)),
        "/api/neows?start_date=2024-01-01&end_date=2024-01-01",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["code"], "AGGREGATION_FAILED");
    assert!(body.get("sizes").is_none());
}

#[tokio::test]
async fn test_fetch_deadline_elapses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/neo/rest/v1/feed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "near_earth_objects": {} }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = config.http_client().unwrap();
    let upstream = Upstream {
        client: &client,
        base_url: &config.nasa_base_url,
        api_key: &config.api_key,
        deadline: Duration::from_millis(100),
    };
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let err = aggregate_range(&upstream, "2024-01-01", "2024-01-02", today)
        .await
        .unwrap_err();
    assert!(matches!(err, NeoError::UpstreamTimeout(_)));
}

#[tokio::test]
async fn test_multiple_dates_are_flattened() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/neo/rest/v1/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "near_earth_objects": {
                "2024-01-01": [neo("a", 0.5, "10000")],
                "2024-01-02": [neo("b", 0.99, "29999"), neo("c", 1.0, "30000")],
                "2024-01-03": [neo("d", 0.4, "9999")]
            }
        })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = config.http_client().unwrap();
    let upstream = Upstream {
        client: &client,
        base_url: &config.nasa_base_url,
        api_key: &config.api_key,
        deadline: config.upstream_timeout(),
    };
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let result = aggregate_range(&upstream, "2024-01-01", "2024-01-03", today)
        .await
        .unwrap();

    assert_eq!(result.sizes.values, vec![1, 2, 1]);
    assert_eq!(result.speeds.values, vec![1, 2, 1]);
}

#[tokio::test]
async fn test_passthrough_returns_body_verbatim() {
    let server = MockServer::start().await;
    let apod = r#"{"title":"Pillars","url":"https://apod.example/img.jpg"}"#;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .and(query_param("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_raw(apod, "application/json"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mars-photos/api/v1/rovers/curiosity/photos"))
        .and(query_param("sol", "1000"))
        .and(query_param("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"photos\":[]}", "application/json"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/iss-now.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"message\":\"success\"}", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(app(config_for(&server)), "/api/astronomy-picture").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, apod.as_bytes());

    let (status, body) = get(app(config_for(&server)), "/api/mars-rover").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"{\"photos\":[]}");

    let (status, body) = get(app(config_for(&server)), "/api/iss-location").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"{\"message\":\"success\"}");
}

#[tokio::test]
async fn test_passthrough_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/EPIC/api/natural/images"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(app(config_for(&server)), "/api/earth-image").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!String::from_utf8(body).unwrap().contains("maintenance"));
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    // Nothing listens on port 9 on the loopback interface.
    let config = GatewayConfig::with_base_url(API_KEY, "http://127.0.0.1:9".parse().unwrap());

    let (status, body) = get(
        app(config),
        "/api/neows?start_date=2024-01-01&end_date=2024-01-02",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
    assert_eq!(body["message"], UPSTREAM_FAILURE_MESSAGE);
    assert!(!body.to_string().contains(API_KEY));
}

#[tokio::test]
async fn test_client_timeout_is_gateway_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/neo/rest/v1/feed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "near_earth_objects": {} }))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(1)
        .mount(&server)
        .await;

    // The pooled client gives up long before the 30 s request deadline.
    let config = config_for(&server);
    let client = Arc::new(
        BasicClient::new(Duration::from_millis(100), Duration::from_secs(1)).unwrap(),
    );
    let app = create_router(AppState::new(client, config), RouterOptions::default());

    let (status, body) = get(app, "/api/neows?start_date=2024-01-01&end_date=2024-01-02").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
    assert_eq!(body["message"], UPSTREAM_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_dropped_request_cancels_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/neo/rest/v1/feed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "near_earth_objects": {} }))
                .set_delay(Duration::from_secs(5)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/neows?start_date=2024-01-01&end_date=2024-01-02")
        .body(Body::empty())
        .unwrap();

    // The caller gives up while the upstream is still answering; the handler
    // future is dropped with it.
    let started = std::time::Instant::now();
    let outcome = tokio::time::timeout(
        Duration::from_millis(300),
        app(config_for(&server)).oneshot(request),
    )
    .await;

    assert!(outcome.is_err());
    assert!(started.elapsed() < Duration::from_secs(5));

    // The single upstream call was issued and nothing retried it after the drop.
    tokio::time::sleep(Duration::from_millis(200)).await;
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}
