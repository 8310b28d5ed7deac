//! Integration tests for URL loading and the on-disk cache.

use axum::{Router, routing::get};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use toolgen_accessor::config::AccessorConfig;
use toolgen_accessor::loader::DocumentAccessor;
use toolgen_core::document::Dialect;

async fn serve(app: Router) -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

#[tokio::test]
async fn second_load_hits_the_cache() {
    let hits = Arc::new(AtomicUsize::new(0));
    let handler_hits = Arc::clone(&hits);
    let app = Router::new().route(
        "/openapi.json",
        get(move || {
            let hits = Arc::clone(&handler_hits);
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                axum::Json(serde_json::json!({
                    "openapi": "3.0.0",
                    "paths": {"/pets": {"get": {}}}
                }))
            }
        }),
    );
    let addr = serve(app).await;

    let cache_dir = tempfile::tempdir().unwrap();
    let accessor = DocumentAccessor::new(AccessorConfig {
        source: Some(format!("http://{addr}/openapi.json")),
        cache_dir: cache_dir.path().to_path_buf(),
    });

    let first = accessor.load().await.unwrap();
    assert_eq!(first.dialect, Dialect::V3);
    let second = accessor.load().await.unwrap();
    assert_eq!(second.dialect, Dialect::V3);
    assert_eq!(hits.load(Ordering::SeqCst), 1, "second load must not fetch");

    // One cache entry, keyed by the URL hash.
    let entries: Vec<_> = std::fs::read_dir(cache_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].ends_with(".json"));
}

#[tokio::test]
async fn yaml_documents_cache_with_a_yaml_extension() {
    let app = Router::new().route(
        "/openapi.yaml",
        get(|| async { "openapi: \"3.0.0\"\npaths:\n  /tasks:\n    get: {}\n" }),
    );
    let addr = serve(app).await;

    let cache_dir = tempfile::tempdir().unwrap();
    let accessor = DocumentAccessor::new(AccessorConfig {
        source: Some(format!("http://{addr}/openapi.yaml")),
        cache_dir: cache_dir.path().to_path_buf(),
    });

    let document = accessor.load().await.unwrap();
    assert_eq!(document.dialect, Dialect::V3);

    let entries: Vec<_> = std::fs::read_dir(cache_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].ends_with(".yaml"));
}

#[tokio::test]
async fn invalid_payloads_never_land_in_the_cache() {
    let app = Router::new().route(
        "/not-a-spec.json",
        get(|| async { axum::Json(serde_json::json!({"message": "hello"})) }),
    );
    let addr = serve(app).await;

    let cache_dir = tempfile::tempdir().unwrap();
    let accessor = DocumentAccessor::new(AccessorConfig {
        source: Some(format!("http://{addr}/not-a-spec.json")),
        cache_dir: cache_dir.path().to_path_buf(),
    });

    accessor.load().await.unwrap_err();
    assert!(
        std::fs::read_dir(cache_dir.path())
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(true)
    );
}
