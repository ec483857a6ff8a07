/// Common test utilities for integration tests
///
/// Builds the real router over an injected store, so the full HTTP stack
/// (extractors, error mapping, middleware) runs without a database.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use printshop_api::{
    app::{build_router, AppState},
    config::{ApiConfig, AuthConfig, Config, DatabaseConfig},
};
use printshop_shared::{
    auth::password::HashParams,
    models::user::{CreateUser, UserRecord},
    store::{InMemoryUserStore, StoreError, UserStore},
};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tower::Service as _;

/// Test context containing the router and its store
pub struct TestContext {
    pub app: Router,
    pub store: Arc<InMemoryUserStore>,
}

/// Response parts the tests look at
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 1,
        },
        auth: AuthConfig {
            operation_timeout: Duration::from_secs(5),
            hash_params: HashParams {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
        },
    }
}

/// Router over an arbitrary store
pub fn app_with_store(store: Arc<dyn UserStore>) -> Router {
    app_with_config(store, test_config())
}

/// Router over an arbitrary store and configuration
pub fn app_with_config(store: Arc<dyn UserStore>, config: Config) -> Router {
    let state = AppState::new(store, config).expect("valid test config");
    build_router(state)
}

impl TestContext {
    /// Creates a context with an empty in-memory store
    pub fn new() -> Self {
        let store = Arc::new(InMemoryUserStore::new());
        let app = app_with_store(store.clone());
        Self { app, store }
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        send(
            &self.app,
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        send(
            &self.app,
            Request::builder().uri(uri).body(Body::empty()).unwrap(),
        )
        .await
    }
}

/// Sends a request through the router and parses the JSON body
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().call(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Store whose every call fails like a lost database connection
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn find_by_email(&self, _: &str) -> Result<Option<UserRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused (db.internal:5432)".to_string()))
    }

    async fn email_exists(&self, _: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused (db.internal:5432)".to_string()))
    }

    async fn insert(&self, _: CreateUser) -> Result<UserRecord, StoreError> {
        Err(StoreError::Unavailable("connection refused (db.internal:5432)".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused (db.internal:5432)".to_string()))
    }
}
