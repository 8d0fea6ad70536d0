//! HTTP request handlers.
//!
//! Uploads arrive as multipart/form-data with the document name in a
//! `pdfName` query parameter; notes travel as JSON bodies. Every handler
//! validates at the boundary before touching storage, so a rejected request
//! never mutates the filesystem.

use axum::extract::{Multipart, Path as AxumPath, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{ApiError, AppState};

/// Maximum accepted audio payload: 10 MB.
pub const MAX_AUDIO_BYTES: usize = 10 * 1024 * 1024;

/// Maximum accepted image payload: 5 MB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted by the image endpoint.
const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub timestamp: String,
}

/// Successful upload response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadRes {
    /// Public-facing relative URL of the stored file.
    pub url: String,
}

/// Query parameters shared by both upload endpoints.
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    #[serde(rename = "pdfName")]
    pub pdf_name: Option<String>,
}

/// Request body for saving notes.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveNotesReq {
    #[serde(rename = "pdfName")]
    pub pdf_name: Option<String>,
    /// Opaque annotation state; the structure is owned by the caller.
    #[schema(value_type = Object)]
    pub notes: Option<Value>,
}

/// Response after saving notes.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveNotesRes {
    pub success: bool,
}

/// One file field pulled out of a multipart body.
struct MediaField {
    file_name: Option<String>,
    content_type: Option<String>,
    data: axum::body::Bytes,
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is alive", body = HealthRes)
    )
)]
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        status: "ok".into(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Upload an audio recording for a document.
///
/// Accepts multipart/form-data with the recording in an `audio` field and
/// the document name as the `pdfName` query parameter. Any `audio/*` MIME
/// type up to 10 MB is accepted; the stored file always gets a `.wav`
/// extension.
///
/// # Errors
/// - 400 if `pdfName` is missing, the multipart body is malformed, no file
///   field is present, or the MIME type is not audio
/// - 413 if the recording exceeds 10 MB
/// - 500 if persisting the file fails
#[utoipa::path(
    post,
    path = "/upload",
    responses(
        (status = 200, description = "Audio stored", body = UploadRes),
        (status = 400, description = "Missing document name or unsupported upload"),
        (status = 413, description = "Recording exceeds the size limit"),
        (status = 500, description = "Storage failure")
    )
)]
#[axum::debug_handler]
pub async fn upload_audio(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    multipart: Multipart,
) -> Result<Json<UploadRes>, ApiError> {
    let pdf_name = require_pdf_name(query.pdf_name)?;
    let upload = read_file_field(multipart, "audio").await?;

    let content_type = upload.content_type.as_deref().unwrap_or_default();
    if !content_type.starts_with("audio/") {
        return Err(ApiError::UnsupportedType(format!(
            "Unsupported file type: {}",
            if content_type.is_empty() { "unknown" } else { content_type }
        )));
    }
    if upload.data.len() > MAX_AUDIO_BYTES {
        return Err(ApiError::PayloadTooLarge(format!(
            "Audio exceeds the {} MB limit",
            MAX_AUDIO_BYTES / (1024 * 1024)
        )));
    }

    let stored = state.store.store_audio(&pdf_name, &upload.data)?;
    Ok(Json(UploadRes { url: stored.url }))
}

/// Upload an image for a document.
///
/// Accepts multipart/form-data with the image in an `image` field and the
/// document name as the `pdfName` query parameter. JPEG, PNG, GIF and WebP
/// up to 5 MB are accepted; the original filename's extension is kept
/// verbatim.
///
/// # Errors
/// - 400 if `pdfName` is missing, the multipart body is malformed, no file
///   field is present, or the MIME type is not allow-listed
/// - 413 if the image exceeds 5 MB
/// - 500 if persisting the file fails
#[utoipa::path(
    post,
    path = "/upload-image",
    responses(
        (status = 200, description = "Image stored", body = UploadRes),
        (status = 400, description = "Missing document name or unsupported upload"),
        (status = 413, description = "Image exceeds the size limit"),
        (status = 500, description = "Storage failure")
    )
)]
#[axum::debug_handler]
pub async fn upload_image(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    multipart: Multipart,
) -> Result<Json<UploadRes>, ApiError> {
    let pdf_name = require_pdf_name(query.pdf_name)?;
    let upload = read_file_field(multipart, "image").await?;

    let content_type = upload.content_type.as_deref().unwrap_or_default();
    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(ApiError::UnsupportedType(format!(
            "Unsupported image format: {}",
            if content_type.is_empty() { "unknown" } else { content_type }
        )));
    }
    if upload.data.len() > MAX_IMAGE_BYTES {
        return Err(ApiError::PayloadTooLarge(format!(
            "Image exceeds the {} MB limit",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )));
    }

    let original_filename = upload.file_name.as_deref().unwrap_or_default();
    let stored = state
        .store
        .store_image(&pdf_name, original_filename, &upload.data)?;
    Ok(Json(UploadRes { url: stored.url }))
}

/// Save the full notes blob for a document.
///
/// The body carries `pdfName` and the opaque `notes` value; the previous
/// blob is replaced in full.
///
/// # Errors
/// - 400 if `pdfName` or `notes` is absent
/// - 500 if the write fails
#[utoipa::path(
    post,
    path = "/save-notes",
    request_body = SaveNotesReq,
    responses(
        (status = 200, description = "Notes saved", body = SaveNotesRes),
        (status = 400, description = "Missing required parameters"),
        (status = 500, description = "Storage failure")
    )
)]
#[axum::debug_handler]
pub async fn save_notes(
    State(state): State<AppState>,
    Json(req): Json<SaveNotesReq>,
) -> Result<Json<SaveNotesRes>, ApiError> {
    let pdf_name = require_pdf_name(req.pdf_name)?;
    let notes = req
        .notes
        .ok_or_else(|| ApiError::MissingParameter("Missing notes".into()))?;

    state.store.save_notes(&pdf_name, &notes)?;
    Ok(Json(SaveNotesRes { success: true }))
}

/// Fetch the notes blob for a document.
///
/// Returns the raw stored JSON value, or `{}` for a document that has no
/// notes yet.
///
/// # Errors
/// - 500 if the notes file cannot be read, or exists but is not valid JSON
#[utoipa::path(
    get,
    path = "/get-notes/{pdfName}",
    params(
        ("pdfName" = String, Path, description = "Document name")
    ),
    responses(
        (status = 200, description = "Stored notes value"),
        (status = 500, description = "Storage failure or corrupted notes")
    )
)]
#[axum::debug_handler]
pub async fn get_notes(
    State(state): State<AppState>,
    AxumPath(pdf_name): AxumPath<String>,
) -> Result<Json<Value>, ApiError> {
    let notes = state.store.load_notes(&pdf_name)?;
    Ok(Json(notes))
}

/// Browsers ask for this constantly; answer without content.
#[axum::debug_handler]
pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// JSON 404 for anything outside the routing table.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not Found" })),
    )
}

fn require_pdf_name(pdf_name: Option<String>) -> Result<String, ApiError> {
    match pdf_name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(ApiError::MissingParameter("Missing PDF file name".into())),
    }
}

/// Reads the multipart body until the named file field is found.
///
/// Other fields are skipped; a body that ends without the expected field is
/// a bad request.
async fn read_file_field(mut multipart: Multipart, field_name: &str) -> Result<MediaField, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let file_name = field.file_name().map(|n| n.to_string());
        let content_type = field.content_type().map(|c| c.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?;

        return Ok(MediaField {
            file_name,
            content_type,
            data,
        });
    }

    Err(ApiError::BadRequest("No file was uploaded".into()))
}
