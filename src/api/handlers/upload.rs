use crate::AppState;
use crate::api::error::AppError;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Redirect,
};
use futures::TryStreamExt;
use tokio_util::io::StreamReader;
use utoipa::ToSchema;

/// Shape of the `multipart/form-data` body accepted by `POST /upload`
#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: String,
}

/// Stores the first `file` field under its sanitized name.
///
/// Client mistakes are not reported as 500: an oversized file is rejected with
/// 413 and a malformed body, missing `file` field or unusable filename with 400.
/// Only storage failures answer 500.
#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "File stored, redirecting to the listing page"),
        (status = 400, description = "Malformed multipart body, no `file` field, or a filename that sanitizes to nothing or starts with '.'"),
        (status = 413, description = "File exceeds the configured upload limit; nothing is stored"),
        (status = 500, description = "Error moving file: the upload could not be written to storage")
    ),
    tag = "files"
)]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut stored = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge("Request body exceeds the maximum allowed limit".to_string())
        } else {
            AppError::BadRequest(e.body_text())
        }
    })? {
        if field.name() != Some("file") {
            continue;
        }

        if stored.is_some() {
            tracing::warn!("Ignoring extra file field in upload request");
            continue;
        }

        let original_filename = field.file_name().unwrap_or_default().to_string();
        let reader = StreamReader::new(field.map_err(std::io::Error::other));

        stored = Some(
            state
                .upload_service
                .accept(reader, &original_filename)
                .await?,
        );
    }

    let file = stored.ok_or(AppError::BadRequest("No file provided".to_string()))?;
    tracing::debug!("Upload of {} complete, redirecting to listing", file.name);

    Ok(Redirect::to("/files"))
}
