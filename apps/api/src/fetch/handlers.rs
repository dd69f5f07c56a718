//! Axum route handlers for URL import and image search.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::document::patch::{FieldPath, Patch, TextField};
use crate::document::Document;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FetchRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct ImagesResponse {
    pub images: Vec<String>,
}

/// `job` fills the job description, `cv` the pasted CV.
fn targets(source: &str) -> Result<(FieldPath, FieldPath), AppError> {
    match source {
        "job" => Ok((
            FieldPath::Text(TextField::JobDescriptionUrl),
            FieldPath::Text(TextField::JobDescription),
        )),
        "cv" => Ok((
            FieldPath::Text(TextField::CvInputUrl),
            FieldPath::Text(TextField::CvInput),
        )),
        other => Err(AppError::NotFound(format!("Unknown fetch source '{other}'"))),
    }
}

/// POST /api/v1/fetch/:source
///
/// Records the URL, fetches the page, and stores its text. An empty page or a
/// failed fetch leaves the text field as it was.
pub async fn handle_fetch(
    State(state): State<AppState>,
    Path(source): Path<String>,
    Json(req): Json<FetchRequest>,
) -> Result<Json<Document>, AppError> {
    let (url_path, text_path) = targets(&source)?;
    let url = req.url.trim().to_string();
    if !url.starts_with("http") {
        return Err(AppError::Validation("Please enter a valid http(s) URL.".to_string()));
    }

    state.store.apply(&[Patch::text(url_path, url.clone())]).await?;
    let (_, stamps) = state.store.stamp(&[text_path]).await;

    let text = state.fetcher.fetch_text(&url).await;
    if text.is_empty() {
        return Err(AppError::Fetch(
            "Could not read the content of that URL. The site may block automated access; \
             paste the text manually instead."
                .to_string(),
        ));
    }

    info!("Imported {} chars into {text_path}", text.len());
    let doc = state
        .store
        .apply_stamped(&stamps, &[Patch::text(text_path, text)])
        .await?;
    Ok(Json(doc))
}

/// GET /api/v1/images?q=
pub async fn handle_search_images(
    State(state): State<AppState>,
    Query(params): Query<ImageQuery>,
) -> Json<ImagesResponse> {
    let images = state.images.search_images(&params.q).await;
    Json(ImagesResponse { images })
}
