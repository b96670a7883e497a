use anyhow::Result;
use axum::{
    http::HeaderValue,
    response::{IntoResponse, Response},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Settings;
use crate::domain::EstimationRates;
use crate::error::ApiError;
use crate::middleware::request_id_layer;
use crate::routes;
use crate::services::{AiClient, BlueprintProvider, EstimationPipeline, InsightProvider};

/// Shared application state. Immutable; nothing is kept between requests.
pub struct AppState {
    pub settings: Settings,
    pub pipeline: EstimationPipeline,
    pub insights: InsightProvider,
    pub blueprints: BlueprintProvider,
}

impl AppState {
    pub fn new(settings: Settings, rates: EstimationRates) -> Result<Arc<Self>> {
        let ai_client = AiClient::new(
            &settings.ollama_api_url,
            &settings.ollama_model,
            settings.ai_enabled,
        )?;

        Ok(Arc::new(Self {
            pipeline: EstimationPipeline::new(rates),
            insights: InsightProvider::new(
                ai_client.clone(),
                Duration::from_secs(settings.ai_analysis_timeout_seconds),
            ),
            blueprints: BlueprintProvider::new(
                ai_client,
                Duration::from_secs(settings.ai_blueprint_timeout_seconds),
            ),
            settings,
        }))
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.settings);

    // Build trace layer (use DEBUG for spans to reduce overhead at INFO level)
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    let (set_request_id, propagate_request_id) = request_id_layer();

    Router::new()
        .merge(routes::api_router())
        // Middleware stack (applied bottom-up)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state)
}

/// A panicking handler still answers with the standard error envelope.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unexpected failure while estimating".to_string()
    };

    ApiError::Internal(anyhow::anyhow!(message)).into_response()
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    // No configured origins means the frontend may be served from anywhere
    let allow_origin = if settings.cors_allow_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = settings
            .cors_allow_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    let max_age = if settings.env.is_dev() {
        Duration::from_secs(86400)
    } else {
        Duration::from_secs(3600)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static("x-request-id"),
        ]))
        .max_age(max_age)
}
