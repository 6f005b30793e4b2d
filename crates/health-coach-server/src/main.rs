use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware, Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use health_coach::{CacheStore, CompletionProvider, ContextStore};

mod adapters;
mod application;
mod auth;
mod config;
mod routes;
mod telemetry;

use adapters::{OpenAiCompletionClient, PgCacheStore, PgContextStore};
use application::{CoachService, ResponseCache};
use config::AppConfig;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub coach: Arc<CoachService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire the coaching service from its ports
    pub fn new(
        config: AppConfig,
        cache_store: Arc<dyn CacheStore>,
        context_store: Arc<dyn ContextStore>,
        completions: Arc<dyn CompletionProvider>,
    ) -> Self {
        let cache = ResponseCache::new(cache_store, config.cache_ttl);
        let coach = CoachService::new(
            cache,
            context_store,
            completions,
            config.persistence_policy,
        );
        Self {
            coach: Arc::new(coach),
            config: Arc::new(config),
        }
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Skipping unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Full HTTP surface: health, coaching API, OpenAPI docs
pub fn build_router(state: AppState) -> Router {
    // Identity is resolved before any handler touches storage
    let api_routes =
        routes::coach::router().layer(middleware::from_fn(auth::identity_middleware));

    let openapi = routes::swagger::ApiDoc::openapi();
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(routes::health::router())
        .merge(api_routes)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(cors)
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    telemetry::init_tracing();
    tracing::info!("Health Coach API initializing...");

    // Secrets first, then the process environment (after .env)
    dotenvy::dotenv().ok();
    let config =
        AppConfig::from_lookup(|key| secrets.get(key).or_else(|| std::env::var(key).ok()))
            .context("Invalid configuration")?;
    tracing::info!(?config, "Configuration loaded");

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let completions =
        OpenAiCompletionClient::new(&config).context("Failed to initialize LLM client")?;
    tracing::info!(
        provider = completions.provider_name(),
        model = completions.model_id(),
        "LLM client initialized"
    );

    let state = AppState::new(
        config,
        Arc::new(PgCacheStore::new(pool.clone())),
        Arc::new(PgContextStore::new(pool)),
        Arc::new(completions),
    );

    let router = build_router(state);

    tracing::info!("Swagger UI: /swagger-ui");
    tracing::info!("Health Coach API ready");

    Ok(router.into())
}
