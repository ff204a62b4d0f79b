use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use title_search::{
    config::{Config, ProviderKind},
    error::AppResult,
    routes::{create_router, AppState},
    services::{
        aggregator_from_config,
        transport::{HttpRequest, HttpResponse, HttpTransport},
    },
};

/// Answers every request from a page-number keyed table and records requests
struct FixtureTransport {
    pages: Vec<(u16, String)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FixtureTransport {
    fn new(pages: Vec<(u16, Value)>) -> Arc<Self> {
        Arc::new(Self {
            pages: pages
                .into_iter()
                .map(|(status, body)| (status, body.to_string()))
                .collect(),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl HttpTransport for FixtureTransport {
    async fn get(&self, request: HttpRequest) -> AppResult<HttpResponse> {
        let page: usize = request
            .query_param("page")
            .and_then(|p| p.parse().ok())
            .unwrap_or(1);
        self.requests.lock().unwrap().push(request);

        let (status, body) = self
            .pages
            .get(page - 1)
            .cloned()
            .unwrap_or((200, json!({ "results": [], "total_pages": 0 }).to_string()));
        Ok(HttpResponse::new(status, body))
    }
}

fn test_config(provider: ProviderKind) -> Config {
    envy::from_iter::<_, Config>(vec![
        (
            "search_provider".to_string(),
            match provider {
                ProviderKind::Tmdb => "tmdb".to_string(),
                ProviderKind::Omdb => "omdb".to_string(),
            },
        ),
        ("tmdb_api_key".to_string(), "testkey".to_string()),
        ("omdb_api_key".to_string(), "testkey".to_string()),
        ("search_default_limit".to_string(), "3".to_string()),
    ])
    .unwrap()
}

fn create_test_app(provider: ProviderKind, transport: Arc<FixtureTransport>) -> Router {
    let config = test_config(provider);
    let aggregator = aggregator_from_config(&config, transport);
    let state = Arc::new(AppState::new(Arc::new(aggregator), &config));
    create_router(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value, Option<String>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let request_id = response
        .headers()
        .get("x-request-id")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body, request_id)
}

fn tmdb_page(titles: &[&str], total_pages: u32) -> Value {
    let results: Vec<Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            json!({
                "id": i + 1,
                "title": title,
                "release_date": "2001-01-01",
                "media_type": "movie"
            })
        })
        .collect();
    json!({ "results": results, "total_pages": total_pages })
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(ProviderKind::Tmdb, FixtureTransport::new(vec![]));
    let (status, body, request_id) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(request_id.is_some());
}

#[tokio::test]
async fn test_search_paginates_to_limit() {
    let transport = FixtureTransport::new(vec![
        (200, tmdb_page(&["A", "B", "C"], 2)),
        (200, tmdb_page(&["D", "E", "F"], 2)),
    ]);
    let app = create_test_app(ProviderKind::Tmdb, transport.clone());

    let (status, body, _) = get(app, "/api/v1/titles/search?q=Test&limit=5").await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["A", "B", "C", "D", "E"]);
    assert_eq!(body[0]["type"], "movie");
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_search_uses_default_limit() {
    let transport = FixtureTransport::new(vec![(200, tmdb_page(&["A", "B", "C", "D"], 1))]);
    let app = create_test_app(ProviderKind::Tmdb, transport);

    let (status, body, _) = get(app, "/api/v1/titles/search?q=Test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_rejects_non_positive_limit() {
    for limit in ["0", "-4"] {
        let transport = FixtureTransport::new(vec![]);
        let app = create_test_app(ProviderKind::Tmdb, transport.clone());

        let (status, body, _) =
            get(app, &format!("/api/v1/titles/search?q=Test&limit={}", limit)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("maxResults"));
        assert_eq!(transport.request_count(), 0);
    }
}

#[tokio::test]
async fn test_search_rejects_blank_query() {
    let transport = FixtureTransport::new(vec![]);
    let app = create_test_app(ProviderKind::Tmdb, transport.clone());

    let (status, _, _) = get(app, "/api/v1/titles/search?q=%20%20").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_omdb_not_found_is_empty_list() {
    let transport = FixtureTransport::new(vec![(
        200,
        json!({ "Response": "False", "Error": "Movie not found!" }),
    )]);
    let app = create_test_app(ProviderKind::Omdb, transport);

    let (status, body, _) = get(app, "/api/v1/titles/search?q=Unknown").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_provider_failure_maps_to_bad_gateway() {
    let transport = FixtureTransport::new(vec![(
        401,
        json!({ "Response": "False", "Error": "Invalid API key!" }),
    )]);
    let app = create_test_app(ProviderKind::Omdb, transport);

    let (status, body, _) = get(app, "/api/v1/titles/search?q=Test").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("Invalid API key!"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = create_test_app(ProviderKind::Tmdb, FixtureTransport::new(vec![]));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "trace-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-42"
    );
}
