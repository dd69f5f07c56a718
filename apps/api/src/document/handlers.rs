//! Axum route handlers for editing, saving, and loading the document.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::patch::{FieldPath, Patch, TextField};
use crate::document::{Document, Education, Experience};
use crate::errors::AppError;
use crate::layout::{layout_options, LayoutOption};
use crate::persistence::{SaveReceipt, SnapshotStore};
use crate::state::AppState;
use crate::style::themes::{self, Theme, PRESET_THEMES};

/// Multipart field carrying the uploaded CV.
const CV_UPLOAD_FIELD: &str = "cv";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PatchRequest {
    pub patches: Vec<Patch>,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct OnboardingResponse {
    pub seen: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResponse {
    pub document: Document,
    pub restored: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Json<Document> {
    Json(state.store.snapshot().await)
}

/// PATCH /api/v1/document
///
/// Applies a batch of field patches atomically. Manual edits are never refused
/// for staleness; they are what stamps are compared against.
pub async fn handle_patch_document(
    State(state): State<AppState>,
    Json(req): Json<PatchRequest>,
) -> Result<Json<Document>, AppError> {
    if req.patches.is_empty() {
        return Err(AppError::Validation("patches cannot be empty".to_string()));
    }
    let doc = state.store.apply(&req.patches).await?;
    Ok(Json(doc))
}

/// POST /api/v1/document/reset
///
/// Restores the built-in template and forgets the saved snapshot and the
/// onboarding flag. Requires `{"confirm": true}`.
pub async fn handle_reset(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<Document>, AppError> {
    if !req.confirm {
        return Err(AppError::Validation(
            "Reset discards all your data; send confirm=true to proceed".to_string(),
        ));
    }
    with_snapshots(&state, |snapshots| snapshots.clear()).await??;
    let doc = Document::default();
    state.store.replace(doc.clone()).await;
    info!("Document reset to the default template");
    Ok(Json(doc))
}

/// POST /api/v1/document/experience
pub async fn handle_add_experience(
    State(state): State<AppState>,
) -> (StatusCode, Json<Experience>) {
    (StatusCode::CREATED, Json(state.store.add_experience().await))
}

/// DELETE /api/v1/document/experience/:id
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.remove_experience(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/document/education
pub async fn handle_add_education(State(state): State<AppState>) -> (StatusCode, Json<Education>) {
    (StatusCode::CREATED, Json(state.store.add_education().await))
}

/// DELETE /api/v1/document/education/:id
pub async fn handle_remove_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.remove_education(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/themes
pub async fn handle_list_themes() -> Json<&'static [Theme]> {
    Json(PRESET_THEMES)
}

/// POST /api/v1/document/theme
pub async fn handle_apply_theme(
    State(state): State<AppState>,
    Json(req): Json<ThemeRequest>,
) -> Result<Json<Document>, AppError> {
    let theme = themes::find(&req.name)
        .ok_or_else(|| AppError::NotFound(format!("No theme named '{}'", req.name)))?;
    let doc = state.store.apply(&theme.patches()).await?;
    Ok(Json(doc))
}

/// GET /api/v1/layouts
pub async fn handle_list_layouts() -> Json<&'static [LayoutOption]> {
    Json(layout_options())
}

// ────────────────────────────────────────────────────────────────────────────
// Save / load
// ────────────────────────────────────────────────────────────────────────────

/// Runs snapshot file I/O on the blocking pool.
async fn with_snapshots<T, F>(state: &AppState, op: F) -> Result<T, AppError>
where
    F: FnOnce(SnapshotStore) -> T + Send + 'static,
    T: Send + 'static,
{
    let snapshots = state.snapshots.clone();
    tokio::task::spawn_blocking(move || op(snapshots))
        .await
        .map_err(|e| AppError::Internal(e.into()))
}

/// POST /api/v1/document/save
pub async fn handle_save(State(state): State<AppState>) -> Result<Json<SaveReceipt>, AppError> {
    let doc = state.store.snapshot().await;
    let receipt = with_snapshots(&state, move |snapshots| snapshots.save(&doc)).await??;
    info!(bytes = receipt.bytes, "Document saved");
    Ok(Json(receipt))
}

/// POST /api/v1/document/load
///
/// Replaces the live document with the saved snapshot. Nothing saved, or an
/// unreadable snapshot, keeps the live document and reports `restored: false`.
pub async fn handle_load(State(state): State<AppState>) -> Result<Json<LoadResponse>, AppError> {
    let response = match with_snapshots(&state, |snapshots| snapshots.load()).await? {
        Some(doc) => {
            state.store.replace(doc.clone()).await;
            LoadResponse {
                document: doc,
                restored: true,
            }
        }
        None => LoadResponse {
            document: state.store.snapshot().await,
            restored: false,
        },
    };
    Ok(Json(response))
}

/// GET /api/v1/onboarding
pub async fn handle_onboarding(
    State(state): State<AppState>,
) -> Result<Json<OnboardingResponse>, AppError> {
    let seen = with_snapshots(&state, |snapshots| snapshots.seen_onboarding()).await?;
    Ok(Json(OnboardingResponse { seen }))
}

/// POST /api/v1/onboarding/seen
pub async fn handle_onboarding_seen(
    State(state): State<AppState>,
) -> Result<Json<OnboardingResponse>, AppError> {
    with_snapshots(&state, |snapshots| snapshots.mark_onboarding_seen()).await??;
    Ok(Json(OnboardingResponse { seen: true }))
}

// ────────────────────────────────────────────────────────────────────────────
// CV upload
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/document/cv-upload
///
/// Accepts a PDF in the `cv` multipart field and stores its text as the pasted CV.
pub async fn handle_cv_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Document>, AppError> {
    let mut pdf: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() == Some(CV_UPLOAD_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
            pdf = Some(bytes.to_vec());
        }
    }
    let pdf = pdf.ok_or_else(|| {
        AppError::Validation(format!("Upload a PDF in the '{CV_UPLOAD_FIELD}' field"))
    })?;

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
        .map_err(|e| {
            warn!("PDF text extraction failed: {e}");
            AppError::Validation("The uploaded file could not be read as a PDF".to_string())
        })?;

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation(
            "The PDF contains no extractable text".to_string(),
        ));
    }
    info!("Extracted {} chars from uploaded CV", text.len());
    let doc = state
        .store
        .apply(&[Patch::text(FieldPath::Text(TextField::CvInput), text)])
        .await?;
    Ok(Json(doc))
}
