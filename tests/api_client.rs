use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use vendorsearch::core::api::{ApiClient, SearchRequest};
use vendorsearch::core::config::AppConfig;
use vendorsearch::core::error::SearchError;
use vendorsearch::search::ScorePolicy;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config_for(base_url: String) -> AppConfig {
    AppConfig {
        backend_url: base_url,
        timeout_secs: 5,
        ..AppConfig::default()
    }
}

fn pcts(outcome: &vendorsearch::core::api::SearchOutcome) -> Vec<f64> {
    outcome.results.iter().map(|r| r.score_pct).collect()
}

#[tokio::test]
async fn search_results_shape_absolute() {
    let app = Router::new().route(
        "/search",
        post(|| async {
            Json(json!({ "results": [
                { "text": "Globex", "score": 0.5, "metadata": { "status": "poc" } },
                { "text": "Acme", "score": 0.832 },
                { "text": "Initech", "score": 0.5 }
            ]}))
        }),
    );
    let config = config_for(serve(app).await);
    let client = ApiClient::new(&config);

    let outcome = client
        .search_hits(&SearchRequest::new("contracts", &config), ScorePolicy::Absolute, None)
        .await
        .unwrap();

    assert_eq!(pcts(&outcome), vec![83.2, 50.0, 50.0]);
    let titles: Vec<&str> = outcome.results.iter().map(|r| r.hit.title.as_str()).collect();
    assert_eq!(titles, vec!["Acme", "Globex", "Initech"]);
    assert_eq!(outcome.results[1].hit.metadata["status"], "poc");
    assert_eq!(outcome.results[1].hit.id, "hit-0");
}

#[tokio::test]
async fn search_nested_data_shape_min_max() {
    let app = Router::new().route(
        "/search",
        post(|| async {
            Json(json!({ "data": {
                "hits": [
                    { "id": "a", "title": "A", "score": 0.2, "snippet": "" },
                    { "id": "b", "title": "B", "score": 0.6, "snippet": "" },
                    { "id": "c", "title": "C", "score": 1.0, "snippet": "" }
                ],
                "metadata": { "took_ms": 7 }
            }}))
        }),
    );
    let config = config_for(serve(app).await);
    let client = ApiClient::new(&config);

    let outcome = client
        .search_hits(&SearchRequest::new("erp", &config), ScorePolicy::MinMax, None)
        .await
        .unwrap();

    assert_eq!(pcts(&outcome), vec![100.0, 50.0, 0.0]);
    assert_eq!(outcome.metadata.unwrap()["took_ms"], 7);
}

#[tokio::test]
async fn unknown_shape_is_empty_not_error() {
    let app = Router::new().route("/search", post(|| async { Json(json!({ "message": "ok" })) }));
    let config = config_for(serve(app).await);
    let client = ApiClient::new(&config);

    let outcome = client
        .search_hits(&SearchRequest::new("anything", &config), ScorePolicy::Absolute, None)
        .await
        .unwrap();
    assert!(outcome.results.is_empty());
}

#[tokio::test]
async fn request_body_is_clamped_and_trimmed() {
    let app = Router::new().route(
        "/search",
        post(|Json(body): Json<Value>| async move {
            Json(json!({ "hits": [{
                "id": "echo",
                "title": body["query"],
                "score": 1.0,
                "k": body["k"],
                "use_mmr": body["use_mmr"]
            }]}))
        }),
    );
    let config = config_for(serve(app).await);
    let client = ApiClient::new(&config);

    let request = SearchRequest {
        query: "  invoice OCR ".to_string(),
        top_k: 500,
        use_mmr: true,
    };
    let raw = client.search(&request).await.unwrap();
    let hit = &raw["hits"][0];
    assert_eq!(hit["title"], "invoice OCR");
    assert_eq!(hit["k"], 50);
    assert_eq!(hit["use_mmr"], true);
}

#[tokio::test]
async fn min_score_threshold_hides_low_results() {
    let app = Router::new().route(
        "/search",
        post(|| async { Json(json!([{ "id": "hi", "score": 0.9 }, { "id": "lo", "score": 0.1 }])) }),
    );
    let config = config_for(serve(app).await);
    let client = ApiClient::new(&config);

    let outcome = client
        .search_hits(&SearchRequest::new("q", &config), ScorePolicy::Absolute, Some(50.0))
        .await
        .unwrap();
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].hit.id, "hi");
}

#[tokio::test]
async fn non_success_status_is_protocol_error() {
    let app = Router::new().route(
        "/search",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, r#"{"detail":"Vector store not loaded"}"#) }),
    );
    let config = config_for(serve(app).await);
    let client = ApiClient::new(&config);

    let err = client
        .search(&SearchRequest::new("q", &config))
        .await
        .unwrap_err();
    match err {
        SearchError::Protocol { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("Vector store not loaded"));
        }
        other => panic!("expected protocol error, got {:?}", other),
    }
}

#[tokio::test]
async fn non_json_body_is_parse_error() {
    let page = format!("<html>{}</html>", "x".repeat(1000));
    let app = Router::new().route("/search", post(move || async move { page }));
    let config = config_for(serve(app).await);
    let client = ApiClient::new(&config);

    let err = client
        .search(&SearchRequest::new("q", &config))
        .await
        .unwrap_err();
    match err {
        SearchError::Parse { status, snippet, .. } => {
            assert_eq!(status, 200);
            assert!(snippet.starts_with("<html>"));
            assert!(snippet.chars().count() <= 201);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = config_for(format!("http://{}", addr));
    let client = ApiClient::new(&config);

    let err = client
        .search(&SearchRequest::new("q", &config))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Transport { .. }));
}

#[tokio::test]
async fn slow_backend_hits_configured_timeout() {
    let app = Router::new().route(
        "/search",
        post(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            Json(json!({ "hits": [] }))
        }),
    );
    let config = AppConfig {
        timeout_secs: 1,
        ..config_for(serve(app).await)
    };
    let client = ApiClient::new(&config);

    let started = std::time::Instant::now();
    let err = client
        .search(&SearchRequest::new("q", &config))
        .await
        .unwrap_err();
    assert!(started.elapsed() < std::time::Duration::from_secs(4));
    match err {
        SearchError::Transport { source, .. } => assert!(source.is_timeout()),
        other => panic!("expected transport timeout, got {:?}", other),
    }
}
