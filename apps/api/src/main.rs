mod applications;
mod auth;
mod config;
mod db;
mod documents;
mod errors;
mod models;
mod pipeline;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::{Authenticator, RedisSessionAuthenticator};
use crate::config::Config;
use crate::db::create_pool;
use crate::pipeline::extractor::PdfTextExtractor;
use crate::pipeline::generation::OpenAiGenerationClient;
use crate::pipeline::Pipeline;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{DocumentStore, ObjectStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ApplyTrack API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis session lookup
    let redis = redis::Client::open(config.redis_url.clone())?;
    let authenticator: Arc<dyn Authenticator> = Arc::new(RedisSessionAuthenticator::new(redis));
    info!("Session authenticator initialized");

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    let storage: Arc<dyn DocumentStore> =
        Arc::new(ObjectStore::new(s3, config.s3_bucket.clone()));
    info!("S3 client initialized");

    // Initialize generation client
    let generator = OpenAiGenerationClient::new(
        config.openai_api_key.clone(),
        &config.openai_base_url,
        config.openai_model.clone(),
        Duration::from_secs(config.generation_timeout_secs),
    )?;
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; AI endpoints will report a missing credential");
    }
    info!("Generation client initialized (model: {})", generator.model());

    let pipeline = Pipeline::new(
        authenticator.clone(),
        Arc::new(PdfTextExtractor),
        Arc::new(generator),
    );

    // Build app state
    let state = AppState {
        db,
        storage,
        authenticator,
        pipeline,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "applytrack-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
