//! Axum route handlers for preview, export, print, and clipboard copy.

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assist;
use crate::document::Document;
use crate::errors::AppError;
use crate::export::clipboard::{copy_pages, Representation};
use crate::export::{build_artifact, svg_defs, Artifact, ExportMeta, ExportShape, CV_PREFIX, TRANSLATED_PREFIX};
use crate::layout::select;
use crate::render::{pages_html, render_compatibility, render_pages, Page, RenderOptions};
use crate::state::AppState;
use crate::style::resolve;

fn include_by_default() -> bool {
    true
}

/// Page selection shared by preview and clipboard copy.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagesQuery {
    /// `false` leaves the cover letter out even when one is written.
    #[serde(default = "include_by_default")]
    pub include_cover_letter: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    /// `en` exports an English translation of the document.
    pub lang: Option<String>,
    #[serde(default = "include_by_default")]
    pub include_cover_letter: bool,
}

#[derive(Debug, Serialize)]
pub struct ClipboardResponse {
    pub representation: Representation,
}

fn pages_for(doc: &Document, include_cover_letter: bool) -> Vec<Page> {
    render_pages(
        doc,
        &resolve(&doc.style),
        select(&doc.style.layout),
        RenderOptions {
            include_cover_letter,
        },
    )
}

/// Renders the live document, or a translated copy of it, into an artifact.
/// The stored document is never modified.
async fn export_artifact(
    state: &AppState,
    query: &ExportQuery,
    shape: ExportShape,
) -> Result<Artifact, AppError> {
    let doc = state.store.snapshot().await;
    let (doc, prefix) = match query.lang.as_deref().map(str::trim) {
        None | Some("") => (doc, CV_PREFIX),
        Some(lang) if lang.eq_ignore_ascii_case("en") => {
            let translated = assist::translate(state.assistant.as_ref(), &doc).await?;
            (translated, TRANSLATED_PREFIX)
        }
        Some(other) => {
            return Err(AppError::Validation(format!(
                "Unsupported export language '{other}'; only 'en' is available"
            )))
        }
    };

    let meta = ExportMeta {
        prefix,
        name: doc.personal.name.clone(),
        title: doc.personal.title.clone(),
    };
    let artifact = build_artifact(&pages_for(&doc, query.include_cover_letter), &meta, shape);
    info!(file = %artifact.file_name, ?shape, "Built export artifact");
    Ok(artifact)
}

/// `Content-Disposition` with an ASCII fallback name and the exact UTF-8 name.
fn content_disposition(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    )
}

/// GET /api/v1/preview
///
/// The résumé pages as an HTML fragment, followed by the compatibility panel
/// when an analysis exists.
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(query): Query<PagesQuery>,
) -> Html<String> {
    let doc = state.store.snapshot().await;
    let mut html = svg_defs();
    html.push_str(&pages_html(&pages_for(&doc, query.include_cover_letter)));
    if let Some(analysis) = &doc.ai_analysis {
        html.push_str(&render_compatibility(analysis).to_html());
    }
    Html(html)
}

/// GET /api/v1/export
pub async fn handle_export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let artifact = export_artifact(&state, &query, ExportShape::Download).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&artifact.file_name)),
        ],
        artifact.html,
    )
        .into_response())
}

/// GET /api/v1/export/print
///
/// Same document as the download, opening the print dialog once loaded.
pub async fn handle_print(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Html<String>, AppError> {
    let artifact = export_artifact(&state, &query, ExportShape::Print).await?;
    Ok(Html(artifact.html))
}

/// POST /api/v1/export/clipboard
pub async fn handle_copy(
    State(state): State<AppState>,
    Query(query): Query<PagesQuery>,
) -> Result<Json<ClipboardResponse>, AppError> {
    let doc = state.store.snapshot().await;
    let pages = pages_for(&doc, query.include_cover_letter);
    let sink = state.clipboard.clone();
    let representation = tokio::task::spawn_blocking(move || copy_pages(&pages, sink.as_ref()))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;
    info!(?representation, "Copied document to clipboard");
    Ok(Json(ClipboardResponse { representation }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    #[test]
    fn test_cover_letter_included_unless_turned_off() {
        let uri: Uri = "/api/v1/export?lang=en".parse().unwrap();
        let Query(export) = Query::<ExportQuery>::try_from_uri(&uri).unwrap();
        assert!(export.include_cover_letter);

        let uri: Uri = "/api/v1/preview?includeCoverLetter=false".parse().unwrap();
        let Query(preview) = Query::<PagesQuery>::try_from_uri(&uri).unwrap();
        assert!(!preview.include_cover_letter);
    }

    #[test]
    fn test_content_disposition_keeps_utf8_name() {
        let value = content_disposition("CV_-_José_Núñez.html");
        assert!(value.starts_with("attachment; filename=\"CV_-_Jos__N__ez.html\""));
        assert!(value.ends_with("filename*=UTF-8''CV_-_Jos%C3%A9_N%C3%BA%C3%B1ez.html"));
    }
}
