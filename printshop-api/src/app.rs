/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use printshop_api::{app::{build_router, AppState}, config::Config};
/// use printshop_shared::{db::pool::create_pool, store::PgUserStore};
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.pool_config()).await?;
/// let state = AppState::new(Arc::new(PgUserStore::new(pool)), config)?;
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::security::{security_headers, SecurityPolicy},
    routes,
};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use printshop_shared::{
    auth::{password::CredentialHasher, service::AuthService},
    store::UserStore,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The store
/// is injected here rather than reached through a global so tests can run
/// the full router against an in-memory or failing store.
#[derive(Clone)]
pub struct AppState {
    /// Signup and login
    pub auth: AuthService,

    /// Credential store, also probed by `/health`
    pub store: Arc<dyn UserStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state around a store
    ///
    /// # Errors
    ///
    /// Fails if the configured Argon2 parameters are rejected.
    pub fn new(store: Arc<dyn UserStore>, config: Config) -> anyhow::Result<Self> {
        let hasher = CredentialHasher::new(config.auth.hash_params)?;
        let auth = AuthService::new(store.clone(), hasher, config.auth.operation_timeout);

        Ok(Self {
            auth,
            store,
            config: Arc::new(config),
        })
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /health
/// └── /api/
///     ├── /auth/
///     │   ├── POST /signup
///     │   └── POST /login
///     └── /catalog/
///         ├── GET /categories
///         └── GET /categories/:slug
/// ```
///
/// Unknown paths get a JSON 404 and unsupported methods a JSON 405, both in
/// the usual error envelope.
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route(
            "/signup",
            post(routes::auth::signup).fallback(routes::method_not_allowed),
        )
        .route(
            "/login",
            post(routes::auth::login).fallback(routes::method_not_allowed),
        );

    let catalog_routes = Router::new()
        .route(
            "/categories",
            get(routes::catalog::list_categories).fallback(routes::method_not_allowed),
        )
        .route(
            "/categories/:slug",
            get(routes::catalog::get_category).fallback(routes::method_not_allowed),
        );

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/catalog", catalog_routes);

    Router::new()
        .route(
            "/health",
            get(routes::health::health_check).fallback(routes::method_not_allowed),
        )
        .nest("/api", api_routes)
        .fallback(routes::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config.api.cors_origins))
        .layer(axum::middleware::from_fn_with_state(
            SecurityPolicy {
                hsts: state.config.api.production,
            },
            security_headers,
        ))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
