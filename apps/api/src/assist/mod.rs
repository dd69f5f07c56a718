//! Writing assistant: stateless operations over a [`TextModel`].
//!
//! Every operation takes the document by reference and returns text or a typed
//! struct; none of them writes to the store. Callers turn results into patches
//! and apply them against the stamps captured when the request started.
//!
//! Failures reach the user as one readable sentence (see [`describe_failure`]).

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::document::patch::{ContactPart, ContactSlot, FieldPath, Patch, PersonalField, TextField};
use crate::document::{
    AiAnalysis, Document, Education, EducationDraft, Experience, ExperienceDraft,
    QualificationAnalysis,
};
use crate::llm_client::{generate_json, GenerationRequest, LlmError, TextModel};

#[derive(Debug, Error, PartialEq)]
pub enum AssistError {
    /// Required input is absent; no request was made.
    #[error("{0}")]
    MissingInput(&'static str),

    /// The model call failed; the message is ready to show.
    #[error("{0}")]
    Failed(String),
}

impl From<LlmError> for AssistError {
    fn from(err: LlmError) -> Self {
        error!("Assistant call failed: {err}");
        AssistError::Failed(describe_failure(&err))
    }
}

/// Maps a model failure to the message shown to the user.
pub fn describe_failure(err: &LlmError) -> String {
    match err {
        LlmError::RateLimited { .. } => QUOTA_EXCEEDED.to_string(),
        LlmError::Api { status: 429, .. } => QUOTA_EXCEEDED.to_string(),
        LlmError::Api { message, .. } if message.contains("RESOURCE_EXHAUSTED") => {
            QUOTA_EXCEEDED.to_string()
        }
        LlmError::Api { message, .. } if message.contains("API key not valid") => {
            INVALID_KEY.to_string()
        }
        LlmError::MissingApiKey => INVALID_KEY.to_string(),
        LlmError::Api { status, .. } if *status >= 500 => UNAVAILABLE.to_string(),
        LlmError::Http(_) => UNAVAILABLE.to_string(),
        LlmError::Parse(_) | LlmError::EmptyContent => MALFORMED.to_string(),
        other => format!("Error: {other}"),
    }
}

const QUOTA_EXCEEDED: &str = "Error: You have exceeded your API usage quota (error 429). \
    Check your plan and billing in Google AI Studio and try again later.";
const UNAVAILABLE: &str = "Error: There was a problem communicating with the AI server (error 500). \
    This may be temporary; please try again in a few minutes.";
const INVALID_KEY: &str = "Error: The configured API key is not valid. Check GEMINI_API_KEY.";
const MALFORMED: &str = "Error: The AI returned a reply that could not be read. Please try again.";

// ────────────────────────────────────────────────────────────────────────────
// Edit actions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Professional,
    Enthusiastic,
    Formal,
    Concise,
}

impl Tone {
    fn adjective(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Enthusiastic => "enthusiastic",
            Tone::Formal => "formal",
            Tone::Concise => "concise",
        }
    }
}

/// `{"action": "tone", "tone": "Formal"}` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum EditAction {
    Rephrase,
    Shorten,
    Expand,
    Tone { tone: Tone },
    Grammar,
}

impl EditAction {
    pub fn instruction(&self) -> String {
        match self {
            EditAction::Rephrase => "Rephrase the following text to make it more impactful and professional. \
                Improve clarity and flow, but keep the core meaning and approximate length."
                .to_string(),
            EditAction::Shorten => "Shorten the following text, making it more concise and direct. \
                Remove redundant words and phrases without losing key information or achievements."
                .to_string(),
            EditAction::Expand => "Expand the following text. Add more detail, context or examples while \
                keeping a professional tone aligned with the job description and candidate profile."
                .to_string(),
            EditAction::Tone { tone } => format!(
                "Rewrite the following text so it has a {} tone. Adapt vocabulary and sentence structure accordingly.",
                tone.adjective()
            ),
            EditAction::Grammar => "Fix any spelling, grammar and punctuation errors in the following text. \
                Make sure it is clean and professional."
                .to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Structured results
// ────────────────────────────────────────────────────────────────────────────

/// Profile data pulled out of a pasted CV. Every field is optional; absent or
/// blank values leave the document alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractedCvData {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub summary: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<Vec<ExperienceDraft>>,
    pub education: Option<Vec<EducationDraft>>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ExtractedCvData {
    pub fn patches(&self) -> Vec<Patch> {
        let text_fields = [
            (FieldPath::Personal(PersonalField::Name), &self.name),
            (FieldPath::Personal(PersonalField::Title), &self.title),
            (FieldPath::Contact(ContactSlot::Email, ContactPart::Value), &self.email),
            (FieldPath::Contact(ContactSlot::Phone, ContactPart::Value), &self.phone),
            (FieldPath::Contact(ContactSlot::Linkedin, ContactPart::Value), &self.linkedin),
            (FieldPath::Text(TextField::Summary), &self.summary),
            (FieldPath::Text(TextField::Skills), &self.skills),
        ];
        let mut patches: Vec<Patch> = text_fields
            .into_iter()
            .filter_map(|(path, value)| present(value).map(|v| Patch::text(path, v)))
            .collect();

        if let Some(experience) = &self.experience {
            patches.push(Patch::new(FieldPath::ExperienceList, to_value(experience)));
        }
        if let Some(education) = &self.education {
            patches.push(Patch::new(FieldPath::EducationList, to_value(education)));
        }
        patches
    }
}

fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvAnalysis {
    #[serde(default)]
    pub extracted_data: ExtractedCvData,
    #[serde(default)]
    pub analysis: AiAnalysis,
}

impl CvAnalysis {
    /// Every path an analysis may write, for stamping before the call.
    /// Writing a contact value also rewrites its link, so both are stamped.
    pub const PATHS: [FieldPath; 13] = [
        FieldPath::Personal(PersonalField::Name),
        FieldPath::Personal(PersonalField::Title),
        FieldPath::Contact(ContactSlot::Email, ContactPart::Value),
        FieldPath::Contact(ContactSlot::Email, ContactPart::Link),
        FieldPath::Contact(ContactSlot::Phone, ContactPart::Value),
        FieldPath::Contact(ContactSlot::Phone, ContactPart::Link),
        FieldPath::Contact(ContactSlot::Linkedin, ContactPart::Value),
        FieldPath::Contact(ContactSlot::Linkedin, ContactPart::Link),
        FieldPath::Text(TextField::Summary),
        FieldPath::Text(TextField::Skills),
        FieldPath::ExperienceList,
        FieldPath::EducationList,
        FieldPath::AiAnalysis,
    ];

    pub fn patches(&self) -> Vec<Patch> {
        let mut patches = self.extracted_data.patches();
        patches.push(Patch::new(FieldPath::AiAnalysis, to_value(&self.analysis)));
        patches
    }
}

/// Bulk section content from a single generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedContent {
    pub summary: String,
    pub achievements: String,
    pub strengths: String,
    pub skills: String,
    pub cta: String,
}

impl GeneratedContent {
    pub const PATHS: [FieldPath; 5] = [
        FieldPath::Text(TextField::Summary),
        FieldPath::Text(TextField::Achievements),
        FieldPath::Text(TextField::Strengths),
        FieldPath::Text(TextField::Skills),
        FieldPath::Text(TextField::Cta),
    ];

    /// Blank sections are skipped so a partial reply never erases content.
    pub fn patches(&self) -> Vec<Patch> {
        let values = [
            &self.summary,
            &self.achievements,
            &self.strengths,
            &self.skills,
            &self.cta,
        ];
        Self::PATHS
            .into_iter()
            .zip(values)
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(path, v)| Patch::text(path, v.trim()))
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

async fn generate_text(model: &dyn TextModel, prompt: String) -> Result<String, AssistError> {
    Ok(model.generate(&GenerationRequest::text(prompt)).await?)
}

/// Extracts profile data from `cv_text` and scores it against the job description.
pub async fn analyze(
    model: &dyn TextModel,
    cv_text: &str,
    job_description: &str,
) -> Result<CvAnalysis, AssistError> {
    if cv_text.trim().is_empty() {
        return Err(AssistError::MissingInput(
            "Paste your CV text (or fetch it from a URL) before running the analysis.",
        ));
    }
    if job_description.trim().is_empty() {
        return Err(AssistError::MissingInput(
            "Add a job description before running the analysis.",
        ));
    }
    info!(
        cv_chars = cv_text.len(),
        job_chars = job_description.len(),
        "Analyzing CV against job description"
    );
    let analysis = generate_json(
        model,
        prompts::analyze(cv_text, job_description),
        prompts::analyze_schema(),
    )
    .await?;
    Ok(analysis)
}

/// CV text used for re-scoring: the pasted CV if any, otherwise a digest of the
/// summary, skills and experience.
pub fn compatibility_cv_text(doc: &Document) -> String {
    if !doc.cv_input.trim().is_empty() {
        return doc.cv_input.clone();
    }
    let experience = doc
        .experience
        .iter()
        .map(|e| format!("{} at {}: {}", e.title, e.company, e.description))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Summary: {}\nSkills: {}\nExperience: {}",
        doc.summary, doc.skills, experience
    )
}

pub async fn recalculate_compatibility(
    model: &dyn TextModel,
    doc: &Document,
) -> Result<QualificationAnalysis, AssistError> {
    if doc.cv_input.trim().is_empty() && doc.summary.trim().is_empty() {
        return Err(AssistError::MissingInput(
            "Compatibility cannot be recalculated without CV data.",
        ));
    }
    if doc.job_description.trim().is_empty() {
        return Err(AssistError::MissingInput(
            "Compatibility cannot be recalculated without a job description.",
        ));
    }
    let qualification = generate_json(
        model,
        prompts::recalculate(&compatibility_cv_text(doc), &doc.job_description),
        prompts::qualification_schema(),
    )
    .await?;
    Ok(qualification)
}

pub async fn generate_title(model: &dyn TextModel, doc: &Document) -> Result<String, AssistError> {
    generate_text(model, prompts::title(doc)).await
}

pub async fn generate_defining_phrase(
    model: &dyn TextModel,
    doc: &Document,
) -> Result<String, AssistError> {
    generate_text(model, prompts::defining_phrase(doc)).await
}

pub async fn generate_experience_description(
    model: &dyn TextModel,
    doc: &Document,
    entry: &Experience,
) -> Result<String, AssistError> {
    generate_text(model, prompts::experience_description(doc, &entry.title)).await
}

pub async fn generate_cta(model: &dyn TextModel, doc: &Document) -> Result<String, AssistError> {
    generate_text(model, prompts::cta(doc)).await
}

pub async fn generate_cover_letter(
    model: &dyn TextModel,
    doc: &Document,
) -> Result<String, AssistError> {
    generate_text(model, prompts::cover_letter(doc)).await
}

pub async fn generate_all(
    model: &dyn TextModel,
    doc: &Document,
) -> Result<GeneratedContent, AssistError> {
    let content = generate_json(model, prompts::all_content(doc), prompts::all_content_schema()).await?;
    Ok(content)
}

pub async fn edit_text(
    model: &dyn TextModel,
    doc: &Document,
    text: &str,
    action: &EditAction,
) -> Result<String, AssistError> {
    if text.trim().is_empty() {
        return Err(AssistError::MissingInput("There is no text to edit."));
    }
    generate_text(model, prompts::edit(doc, &action.instruction(), text)).await
}

// ────────────────────────────────────────────────────────────────────────────
// Translation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TranslatablePersonal {
    name: String,
    title: String,
    defining_phrase: String,
}

/// The text-bearing subset of a document, without ids or style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TranslatableDocument {
    personal: TranslatablePersonal,
    summary: String,
    achievements: String,
    strengths: String,
    skills: String,
    experience: Vec<ExperienceDraft>,
    education: Vec<EducationDraft>,
    cover_letter: String,
    cta: String,
}

impl From<&Document> for TranslatableDocument {
    fn from(doc: &Document) -> Self {
        Self {
            personal: TranslatablePersonal {
                name: doc.personal.name.clone(),
                title: doc.personal.title.clone(),
                defining_phrase: doc.personal.defining_phrase.clone(),
            },
            summary: doc.summary.clone(),
            achievements: doc.achievements.clone(),
            strengths: doc.strengths.clone(),
            skills: doc.skills.clone(),
            experience: doc
                .experience
                .iter()
                .map(|e| ExperienceDraft {
                    title: e.title.clone(),
                    company: e.company.clone(),
                    date: e.date.clone(),
                    description: e.description.clone(),
                })
                .collect(),
            education: doc
                .education
                .iter()
                .map(|e| EducationDraft {
                    degree: e.degree.clone(),
                    school: e.school.clone(),
                    date: e.date.clone(),
                })
                .collect(),
            cover_letter: doc.cover_letter.clone(),
            cta: doc.cta.clone(),
        }
    }
}

/// Keeps `original` when the translation came back blank.
fn merge(original: &mut String, translated: String) {
    if !translated.trim().is_empty() {
        *original = translated;
    }
}

fn merge_experience(entry: &mut Experience, translated: ExperienceDraft) {
    merge(&mut entry.title, translated.title);
    merge(&mut entry.company, translated.company);
    merge(&mut entry.date, translated.date);
    merge(&mut entry.description, translated.description);
}

fn merge_education(entry: &mut Education, translated: EducationDraft) {
    merge(&mut entry.degree, translated.degree);
    merge(&mut entry.school, translated.school);
    merge(&mut entry.date, translated.date);
}

/// Returns an English copy of `doc`. Ids, style, contacts and analysis are kept;
/// entries are matched by position and untranslated fields fall back to the original.
pub async fn translate(model: &dyn TextModel, doc: &Document) -> Result<Document, AssistError> {
    let payload = serde_json::to_string_pretty(&TranslatableDocument::from(doc))
        .map_err(|e| AssistError::Failed(format!("Error: {e}")))?;
    let translated: TranslatableDocument =
        generate_json(model, prompts::translate(&payload), prompts::translation_schema()).await?;

    let mut result = doc.clone();
    merge(&mut result.personal.name, translated.personal.name);
    merge(&mut result.personal.title, translated.personal.title);
    merge(&mut result.personal.defining_phrase, translated.personal.defining_phrase);
    merge(&mut result.summary, translated.summary);
    merge(&mut result.achievements, translated.achievements);
    merge(&mut result.strengths, translated.strengths);
    merge(&mut result.skills, translated.skills);
    merge(&mut result.cover_letter, translated.cover_letter);
    merge(&mut result.cta, translated.cta);
    for (entry, draft) in result.experience.iter_mut().zip(translated.experience) {
        merge_experience(entry, draft);
    }
    for (entry, draft) in result.education.iter_mut().zip(translated.education) {
        merge_education(entry, draft);
    }
    info!("Translated document copy");
    Ok(result)
}
