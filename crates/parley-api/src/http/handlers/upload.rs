//! POST /upload_file - multipart file upload.
//!
//! Accepts a single `file` field, classifies it by extension, and returns
//! its metadata as JSON. The file itself is never written to disk; images
//! come back as a base64 data URI, code files as decoded text.

use axum::extract::Multipart;
use axum::Json;

use parley_infra::files::inspect_upload;
use parley_types::upload::UploadedFile;

use crate::http::error::AppError;

pub async fn upload_file(mut multipart: Multipart) -> Result<Json<UploadedFile>, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Multipart(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Multipart(e.to_string()))?;
        file = Some((name, bytes.to_vec()));
        break;
    }

    let Some((name, bytes)) = file else {
        return Err(AppError::Upload("No file part"));
    };
    if name.is_empty() {
        return Err(AppError::Upload("No selected file"));
    }

    let uploaded = inspect_upload(&name, &bytes)?;
    Ok(Json(uploaded))
}
