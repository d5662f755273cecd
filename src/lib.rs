pub mod api;
pub mod config;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;

use crate::config::AppConfig;
use crate::services::listing::ListingService;
use crate::services::storage::StorageService;
use crate::services::upload_service::UploadService;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::upload::upload_file,
        api::handlers::files::list_files_json,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::upload::UploadForm,
            api::handlers::health::HealthResponse,
            models::StoredFile,
            models::StatsSummary,
            models::FileListing,
            services::classifier::Category,
        )
    ),
    tags(
        (name = "files", description = "Upload and listing endpoints"),
        (name = "system", description = "Service status")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageService>,
    pub upload_service: Arc<UploadService>,
    pub listing_service: Arc<ListingService>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(storage: Arc<dyn StorageService>, config: AppConfig) -> Self {
        Self {
            upload_service: Arc::new(UploadService::new(
                storage.clone(),
                config.max_upload_bytes,
            )),
            listing_service: Arc::new(ListingService::new(storage.clone())),
            storage,
            config,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    // Document root: general assets first, then stylesheets
    let static_files =
        ServeDir::new(&state.config.public_dir).fallback(ServeDir::new(&state.config.styling_dir));
    let body_limit = state.config.request_body_limit();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route(
            "/upload",
            post(api::handlers::upload::upload_file).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/files", get(api::handlers::files::list_files))
        .route("/api/files", get(api::handlers::files::list_files_json))
        .route("/uploads/:filename", get(api::handlers::files::download_file))
        .fallback_service(static_files)
        .layer(from_fn(api::middleware::metrics::metrics_middleware))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .with_state(state)
}
