//! Document model: the single résumé + cover-letter + style aggregate for a session.
//!
//! Wire format is camelCase JSON. The same shape is used for the persisted snapshot,
//! so a snapshot written by an older build still loads field-for-field.

pub mod handlers;
pub mod patch;
pub mod store;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Personal details
// ────────────────────────────────────────────────────────────────────────────

/// A contact entry: what is shown, and where it navigates to.
///
/// `link` is independent of `value` so that an address can carry its own
/// `mailto:` target. An empty `value` means the contact is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub value: String,
    pub link: String,
}

impl ContactInfo {
    pub fn new(value: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            link: link.into(),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.value.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalDetails {
    pub name: String,
    pub title: String,
    pub email: ContactInfo,
    pub email2: ContactInfo,
    pub phone: ContactInfo,
    pub phone2: ContactInfo,
    pub linkedin: ContactInfo,
    pub defining_phrase: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Ordered entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
}

impl Experience {
    /// A blank entry with a freshly generated identifier.
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            company: String::new(),
            date: String::new(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub date: String,
}

impl Education {
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            degree: String::new(),
            school: String::new(),
            date: String::new(),
        }
    }
}

/// Experience as returned by extraction/translation, before it is given an identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceDraft {
    pub title: String,
    pub company: String,
    pub date: String,
    pub description: String,
}

impl From<ExperienceDraft> for Experience {
    fn from(draft: ExperienceDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            company: draft.company,
            date: draft.date,
            description: draft.description,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationDraft {
    pub degree: String,
    pub school: String,
    pub date: String,
}

impl From<EducationDraft> for Education {
    fn from(draft: EducationDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            degree: draft.degree,
            school: draft.school,
            date: draft.date,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Style configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderBackgroundType {
    #[default]
    Color,
    Image,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PictureShape {
    #[default]
    Circle,
    Square,
    Brush,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PicturePosition {
    Left,
    #[default]
    Center,
    Right,
}

/// Résumé presentation configuration.
///
/// Only user-chosen values live here. Anything derivable (contrast colors, clip
/// rules, alignment classes) is computed by [`crate::style::resolve`].
/// `layout` is kept as a free string: an identifier outside the known set is
/// stored as-is and degrades to the default family at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleSettings {
    pub layout: String,
    pub sheet_color: String,
    pub text_color: String,
    pub border_color: String,
    pub header_background_type: HeaderBackgroundType,
    pub header_color: String,
    pub header_image_url: String,
    pub profile_picture_url: String,
    pub profile_picture_shape: PictureShape,
    pub profile_picture_position: PicturePosition,
    pub profile_picture_size: u32,
    pub font_family: String,
    pub section_title_color: String,
    pub skill_background_color: String,
    pub skill_text_color: String,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            layout: "modern".to_string(),
            sheet_color: "#FFFFFF".to_string(),
            text_color: "#1F2937".to_string(),
            border_color: "#0EA5E9".to_string(),
            header_background_type: HeaderBackgroundType::Color,
            header_color: "#1E293B".to_string(),
            header_image_url: String::new(),
            profile_picture_url: String::new(),
            profile_picture_shape: PictureShape::Circle,
            profile_picture_position: PicturePosition::Center,
            profile_picture_size: 128,
            font_family: "Inter".to_string(),
            section_title_color: "#0F172A".to_string(),
            skill_background_color: "#E0F2FE".to_string(),
            skill_text_color: "#075985".to_string(),
        }
    }
}

/// Cover-letter presentation, independent of the résumé style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoverLetterStyle {
    pub font_family: String,
    /// Body size in points.
    pub font_size: u32,
    pub text_color: String,
}

impl Default for CoverLetterStyle {
    fn default() -> Self {
        Self {
            font_family: "Lora".to_string(),
            font_size: 11,
            text_color: "#1F2937".to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// AI analysis
// ────────────────────────────────────────────────────────────────────────────

/// Three-way fit breakdown produced by the assistant.
///
/// The percentages are stored exactly as received. They are expected to sum
/// to 100 but are never re-normalized here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualificationAnalysis {
    pub qualified_percentage: f64,
    pub not_qualified_percentage: f64,
    pub overqualified_percentage: f64,
    pub summary: String,
    pub qualified_argument: String,
    pub not_qualified_argument: String,
    pub overqualified_argument: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiAnalysis {
    /// Position sought and how the candidate fits it.
    pub question1: String,
    /// Concrete results that prove the fit.
    pub question2: String,
    /// Most relevant strengths for the offer.
    pub question3: String,
    /// Achievements that indicate future potential.
    pub question4: String,
    pub qualification: QualificationAnalysis,
}

// ────────────────────────────────────────────────────────────────────────────
// Root aggregate
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub personal: PersonalDetails,
    pub summary: String,
    /// Line-oriented: `"- "` prefixed lines are bullets.
    pub achievements: String,
    /// Line-oriented: `"- "` prefixed lines are bullets.
    pub strengths: String,
    /// Comma-separated.
    pub skills: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub style: StyleSettings,
    pub job_description: String,
    pub job_description_url: String,
    pub cv_input: String,
    pub cv_input_url: String,
    pub ai_analysis: Option<AiAnalysis>,
    pub cover_letter: String,
    pub cover_letter_style: CoverLetterStyle,
    pub cta: String,
}

impl Default for Document {
    /// The built-in starting template.
    fn default() -> Self {
        Self {
            personal: PersonalDetails {
                name: "Alex Morgan".to_string(),
                title: "Product Engineer".to_string(),
                email: ContactInfo::new("alex.morgan@example.com", "mailto:alex.morgan@example.com"),
                email2: ContactInfo::default(),
                phone: ContactInfo::new("+1 555 010 2030", "tel:+1 555 010 2030"),
                phone2: ContactInfo::default(),
                linkedin: ContactInfo::new(
                    "https://www.linkedin.com/in/alex-morgan",
                    "https://www.linkedin.com/in/alex-morgan",
                ),
                defining_phrase: "Turning rough ideas into dependable products".to_string(),
            },
            summary: "Engineer with eight years of experience shipping customer-facing products, \
                      from first prototype to stable operation."
                .to_string(),
            achievements: "- Cut checkout latency by 40% across three markets\n\
                           - Led the migration of 120 services to a shared deployment pipeline"
                .to_string(),
            strengths: "- Clear written communication\n- Pragmatic technical leadership".to_string(),
            skills: "Rust, TypeScript, PostgreSQL, System Design, Mentoring".to_string(),
            experience: vec![Experience {
                id: Uuid::new_v4(),
                title: "Senior Product Engineer".to_string(),
                company: "Northwind Labs".to_string(),
                date: "2020 - Present".to_string(),
                description: "- Owned the payments surface end to end\n\
                              - Mentored four engineers through their first launches"
                    .to_string(),
            }],
            education: vec![Education {
                id: Uuid::new_v4(),
                degree: "BSc Computer Science".to_string(),
                school: "State University".to_string(),
                date: "2012 - 2016".to_string(),
            }],
            style: StyleSettings::default(),
            job_description: String::new(),
            job_description_url: String::new(),
            cv_input: String::new(),
            cv_input_url: String::new(),
            ai_analysis: None,
            cover_letter: String::new(),
            cover_letter_style: CoverLetterStyle::default(),
            cta: String::new(),
        }
    }
}

impl Document {
    pub fn experience(&self, id: Uuid) -> Option<&Experience> {
        self.experience.iter().find(|e| e.id == id)
    }

    pub fn education(&self, id: Uuid) -> Option<&Education> {
        self.education.iter().find(|e| e.id == id)
    }

    pub fn has_cover_letter(&self) -> bool {
        !self.cover_letter.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_has_unique_entry_ids() {
        let doc = Document::default();
        let exp_id = doc.experience[0].id;
        let edu_id = doc.education[0].id;
        assert_ne!(exp_id, edu_id);
    }

    #[test]
    fn test_style_enums_use_lowercase_wire_names() {
        let json = serde_json::to_value(StyleSettings::default()).unwrap();
        assert_eq!(json["headerBackgroundType"], "color");
        assert_eq!(json["profilePictureShape"], "circle");
        assert_eq!(json["profilePicturePosition"], "center");
        assert_eq!(json["profilePictureSize"], 128);
    }

    #[test]
    fn test_document_serializes_camel_case_keys() {
        let json = serde_json::to_value(Document::default()).unwrap();
        assert!(json.get("jobDescriptionUrl").is_some());
        assert!(json.get("coverLetterStyle").is_some());
        assert!(json["personal"].get("definingPhrase").is_some());
        assert!(json["aiAnalysis"].is_null());
    }

    #[test]
    fn test_partial_snapshot_fills_missing_fields_with_defaults() {
        let json = r##"{ "summary": "Only a summary", "style": { "layout": "retro-wave" } }"##;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.summary, "Only a summary");
        assert_eq!(doc.style.layout, "retro-wave", "unknown layout kept verbatim");
        assert_eq!(doc.style.sheet_color, StyleSettings::default().sheet_color);
    }

    #[test]
    fn test_qualification_deserializes_from_camel_case() {
        let json = r#"{
            "qualifiedPercentage": 70,
            "notQualifiedPercentage": 20,
            "overqualifiedPercentage": 10,
            "summary": "Solid fit",
            "qualifiedArgument": "a",
            "notQualifiedArgument": "b",
            "overqualifiedArgument": "c"
        }"#;
        let q: QualificationAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(q.qualified_percentage, 70.0);
        assert_eq!(q.overqualified_percentage, 10.0);
        assert_eq!(q.not_qualified_argument, "b");
    }

    #[test]
    fn test_draft_conversion_assigns_fresh_ids() {
        let a: Experience = ExperienceDraft::default().into();
        let b: Experience = ExperienceDraft::default().into();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_blank_contact_is_absent() {
        assert!(ContactInfo::new("  ", "mailto:x").is_absent());
        assert!(!ContactInfo::new("x@y.z", "").is_absent());
    }
}
