use crate::AppState;
use crate::api::error::AppError;
use crate::models::FileListing;
use crate::utils::validation::is_servable_name;
use crate::views::FilesPage;
use askama::Template;
use axum::{
    Json,
    extract::{Path, Request, State},
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// Renders the file-card listing with the statistics sidebar.
pub async fn list_files(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let listing = state.listing_service.list().await?;
    let page = FilesPage::new(&listing, &state.config.site_title, Utc::now().date_naive());
    Ok(Html(page.render()?))
}

#[utoipa::path(
    get,
    path = "/api/files",
    responses(
        (status = 200, description = "Stored files with per-bucket counts", body = FileListing),
        (status = 500, description = "Storage directory could not be read")
    ),
    tag = "files"
)]
pub async fn list_files_json(
    State(state): State<AppState>,
) -> Result<Json<FileListing>, AppError> {
    Ok(Json(state.listing_service.list().await?))
}

/// Serves a stored file by its exact name.
pub async fn download_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    request: Request,
) -> Result<Response, AppError> {
    if !is_servable_name(&filename) {
        return Err(AppError::NotFound(format!("No such file: {}", filename)));
    }

    let path = state.storage.file_path(&filename);
    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(never) => match never {},
    }
}
