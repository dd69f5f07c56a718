//! Axum route handlers for the writing assistant.
//!
//! Each handler stamps the fields it will write, releases the store, awaits the
//! model, and applies the result against the stamps. A field edited in the
//! meantime turns the reply into a 409 instead of overwriting the edit.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::assist::{self, CvAnalysis, EditAction, GeneratedContent};
use crate::document::patch::{read_text, ExperienceField, FieldPath, Patch, PersonalField, TextField};
use crate::document::{AiAnalysis, Document};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub document: Document,
    pub analysis: AiAnalysis,
}

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub path: FieldPath,
    #[serde(flatten)]
    pub action: EditAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateTarget {
    Title,
    DefiningPhrase,
    Cta,
    CoverLetter,
    All,
}

impl GenerateTarget {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "title" => Some(Self::Title),
            "defining-phrase" => Some(Self::DefiningPhrase),
            "cta" => Some(Self::Cta),
            "cover-letter" => Some(Self::CoverLetter),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    fn paths(self) -> Vec<FieldPath> {
        match self {
            Self::Title => vec![FieldPath::Personal(PersonalField::Title)],
            Self::DefiningPhrase => vec![FieldPath::Personal(PersonalField::DefiningPhrase)],
            Self::Cta => vec![FieldPath::Text(TextField::Cta)],
            Self::CoverLetter => vec![FieldPath::Text(TextField::CoverLetter)],
            Self::All => GeneratedContent::PATHS.to_vec(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/assist/analyze
///
/// Extracts profile data from the pasted CV, scores it against the job
/// description, and fills the document with both.
pub async fn handle_analyze(
    State(state): State<AppState>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let (doc, stamps) = state.store.stamp(&CvAnalysis::PATHS).await;
    let result = assist::analyze(state.assistant.as_ref(), &doc.cv_input, &doc.job_description).await?;
    let document = state.store.apply_stamped(&stamps, &result.patches()).await?;
    info!(
        qualified = result.analysis.qualification.qualified_percentage,
        "CV analysis applied"
    );
    Ok(Json(AnalyzeResponse {
        document,
        analysis: result.analysis,
    }))
}

/// POST /api/v1/assist/compatibility
pub async fn handle_recalculate(State(state): State<AppState>) -> Result<Json<Document>, AppError> {
    let (doc, stamps) = state.store.stamp(&[FieldPath::Qualification]).await;
    let qualification = assist::recalculate_compatibility(state.assistant.as_ref(), &doc).await?;
    let value = serde_json::to_value(&qualification).map_err(|e| AppError::Internal(e.into()))?;
    let document = state
        .store
        .apply_stamped(&stamps, &[Patch::new(FieldPath::Qualification, value)])
        .await?;
    Ok(Json(document))
}

/// POST /api/v1/assist/generate/:target
///
/// `target` is one of `title`, `defining-phrase`, `cta`, `cover-letter`, `all`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(target): Path<String>,
) -> Result<Json<Document>, AppError> {
    let target = GenerateTarget::parse(&target)
        .ok_or_else(|| AppError::NotFound(format!("Unknown generation target '{target}'")))?;
    let paths = target.paths();
    let (doc, stamps) = state.store.stamp(&paths).await;
    let model = state.assistant.as_ref();

    let patches = match target {
        GenerateTarget::All => assist::generate_all(model, &doc).await?.patches(),
        single => {
            let text = match single {
                GenerateTarget::Title => assist::generate_title(model, &doc).await?,
                GenerateTarget::DefiningPhrase => assist::generate_defining_phrase(model, &doc).await?,
                GenerateTarget::Cta => assist::generate_cta(model, &doc).await?,
                _ => assist::generate_cover_letter(model, &doc).await?,
            };
            vec![Patch::text(paths[0], text)]
        }
    };

    let document = state.store.apply_stamped(&stamps, &patches).await?;
    Ok(Json(document))
}

/// POST /api/v1/assist/experience/:id
pub async fn handle_generate_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>, AppError> {
    let path = FieldPath::Experience(id, ExperienceField::Description);
    let (doc, stamps) = state.store.stamp(&[path]).await;
    let entry = doc
        .experience(id)
        .ok_or_else(|| AppError::NotFound(format!("No experience entry with id {id}")))?;

    let text = assist::generate_experience_description(state.assistant.as_ref(), &doc, entry).await?;
    let document = state
        .store
        .apply_stamped(&stamps, &[Patch::text(path, text)])
        .await?;
    Ok(Json(document))
}

/// POST /api/v1/assist/edit
///
/// Rewrites the text currently stored at `path` and writes the result back.
pub async fn handle_edit(
    State(state): State<AppState>,
    Json(req): Json<EditRequest>,
) -> Result<Json<Document>, AppError> {
    let (doc, stamps) = state.store.stamp(&[req.path]).await;
    let original = read_text(&doc, &req.path)?;
    let text = assist::edit_text(state.assistant.as_ref(), &doc, &original, &req.action).await?;
    let document = state
        .store
        .apply_stamped(&stamps, &[Patch::text(req.path, text)])
        .await?;
    Ok(Json(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_targets() {
        assert_eq!(GenerateTarget::parse("defining-phrase"), Some(GenerateTarget::DefiningPhrase));
        assert_eq!(GenerateTarget::parse("summary"), None);
        assert_eq!(GenerateTarget::All.paths().len(), 5);
    }

    #[test]
    fn test_edit_request_flattens_action() {
        let req: EditRequest = serde_json::from_value(json!({
            "path": "summary",
            "action": "tone",
            "tone": "Enthusiastic"
        }))
        .unwrap();
        assert_eq!(req.path, FieldPath::Text(TextField::Summary));
        assert_eq!(
            req.action,
            EditAction::Tone {
                tone: assist::Tone::Enthusiastic
            }
        );
    }
}
