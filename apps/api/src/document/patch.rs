//! Field-path patches: the one shape every document write takes.
//!
//! User edits, theme presets, and assistant results all become `Patch` values and
//! go through `apply_patch`, so validation is identical regardless of origin.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::document::{
    AiAnalysis, ContactInfo, Document, Education, EducationDraft, Experience, ExperienceDraft,
    QualificationAnalysis,
};

#[derive(Debug, Error, PartialEq)]
pub enum PatchError {
    #[error("Unknown field path '{0}'")]
    UnknownPath(String),

    #[error("Invalid value for '{path}': expected {expected}")]
    InvalidValue { path: String, expected: &'static str },

    #[error("No entry matches '{0}'")]
    EntryNotFound(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Field paths
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Summary,
    Achievements,
    Strengths,
    Skills,
    Cta,
    CoverLetter,
    JobDescription,
    JobDescriptionUrl,
    CvInput,
    CvInputUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonalField {
    Name,
    Title,
    DefiningPhrase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactSlot {
    Email,
    Email2,
    Phone,
    Phone2,
    Linkedin,
}

impl ContactSlot {
    /// Protocol used when the contact has no explicit link.
    pub fn default_protocol(self) -> Option<&'static str> {
        match self {
            ContactSlot::Email | ContactSlot::Email2 => Some("mailto"),
            ContactSlot::Phone | ContactSlot::Phone2 => Some("tel"),
            ContactSlot::Linkedin => None,
        }
    }

    fn key(self) -> &'static str {
        match self {
            ContactSlot::Email => "email",
            ContactSlot::Email2 => "email2",
            ContactSlot::Phone => "phone",
            ContactSlot::Phone2 => "phone2",
            ContactSlot::Linkedin => "linkedin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactPart {
    Value,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleField {
    Layout,
    SheetColor,
    TextColor,
    BorderColor,
    HeaderBackgroundType,
    HeaderColor,
    HeaderImageUrl,
    ProfilePictureUrl,
    ProfilePictureShape,
    ProfilePicturePosition,
    ProfilePictureSize,
    FontFamily,
    SectionTitleColor,
    SkillBackgroundColor,
    SkillTextColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverLetterField {
    FontFamily,
    FontSize,
    TextColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceField {
    Title,
    Company,
    Date,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EducationField {
    Degree,
    School,
    Date,
}

/// Addressable location inside a [`Document`].
///
/// Parsed from dotted strings such as `personal.email.value`,
/// `style.profilePictureSize`, or `experience.<uuid>.description`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Text(TextField),
    Personal(PersonalField),
    Contact(ContactSlot, ContactPart),
    Style(StyleField),
    CoverLetterStyle(CoverLetterField),
    Experience(Uuid, ExperienceField),
    Education(Uuid, EducationField),
    /// Whole-list import: every entry receives a fresh identifier.
    ExperienceList,
    EducationList,
    AiAnalysis,
    Qualification,
}

const TEXT_FIELDS: &[(&str, TextField)] = &[
    ("summary", TextField::Summary),
    ("achievements", TextField::Achievements),
    ("strengths", TextField::Strengths),
    ("skills", TextField::Skills),
    ("cta", TextField::Cta),
    ("coverLetter", TextField::CoverLetter),
    ("jobDescription", TextField::JobDescription),
    ("jobDescriptionUrl", TextField::JobDescriptionUrl),
    ("cvInput", TextField::CvInput),
    ("cvInputUrl", TextField::CvInputUrl),
];

const STYLE_FIELDS: &[(&str, StyleField)] = &[
    ("layout", StyleField::Layout),
    ("sheetColor", StyleField::SheetColor),
    ("textColor", StyleField::TextColor),
    ("borderColor", StyleField::BorderColor),
    ("headerBackgroundType", StyleField::HeaderBackgroundType),
    ("headerColor", StyleField::HeaderColor),
    ("headerImageUrl", StyleField::HeaderImageUrl),
    ("profilePictureUrl", StyleField::ProfilePictureUrl),
    ("profilePictureShape", StyleField::ProfilePictureShape),
    ("profilePicturePosition", StyleField::ProfilePicturePosition),
    ("profilePictureSize", StyleField::ProfilePictureSize),
    ("fontFamily", StyleField::FontFamily),
    ("sectionTitleColor", StyleField::SectionTitleColor),
    ("skillBackgroundColor", StyleField::SkillBackgroundColor),
    ("skillTextColor", StyleField::SkillTextColor),
];

const CONTACT_SLOTS: &[ContactSlot] = &[
    ContactSlot::Email,
    ContactSlot::Email2,
    ContactSlot::Phone,
    ContactSlot::Phone2,
    ContactSlot::Linkedin,
];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn reverse<T: Copy + PartialEq>(table: &[(&'static str, T)], value: T) -> &'static str {
    table
        .iter()
        .find(|(_, v)| *v == value)
        .map(|(k, _)| *k)
        .unwrap_or_default()
}

impl FromStr for FieldPath {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || PatchError::UnknownPath(s.to_string());
        let parts: Vec<&str> = s.split('.').collect();

        let path = match parts.as_slice() {
            [single] => match *single {
                "experience" => FieldPath::ExperienceList,
                "education" => FieldPath::EducationList,
                "aiAnalysis" => FieldPath::AiAnalysis,
                other => FieldPath::Text(lookup(TEXT_FIELDS, other).ok_or_else(unknown)?),
            },
            ["aiAnalysis", "qualification"] => FieldPath::Qualification,
            ["personal", "name"] => FieldPath::Personal(PersonalField::Name),
            ["personal", "title"] => FieldPath::Personal(PersonalField::Title),
            ["personal", "definingPhrase"] => FieldPath::Personal(PersonalField::DefiningPhrase),
            ["personal", slot, part] => {
                let slot = CONTACT_SLOTS
                    .iter()
                    .copied()
                    .find(|c| c.key() == *slot)
                    .ok_or_else(unknown)?;
                let part = match *part {
                    "value" => ContactPart::Value,
                    "link" => ContactPart::Link,
                    _ => return Err(unknown()),
                };
                FieldPath::Contact(slot, part)
            }
            ["style", field] => FieldPath::Style(lookup(STYLE_FIELDS, field).ok_or_else(unknown)?),
            ["coverLetterStyle", field] => FieldPath::CoverLetterStyle(match *field {
                "fontFamily" => CoverLetterField::FontFamily,
                "fontSize" => CoverLetterField::FontSize,
                "textColor" => CoverLetterField::TextColor,
                _ => return Err(unknown()),
            }),
            ["experience", id, field] => {
                let id = Uuid::parse_str(id).map_err(|_| unknown())?;
                FieldPath::Experience(
                    id,
                    match *field {
                        "title" => ExperienceField::Title,
                        "company" => ExperienceField::Company,
                        "date" => ExperienceField::Date,
                        "description" => ExperienceField::Description,
                        _ => return Err(unknown()),
                    },
                )
            }
            ["education", id, field] => {
                let id = Uuid::parse_str(id).map_err(|_| unknown())?;
                FieldPath::Education(
                    id,
                    match *field {
                        "degree" => EducationField::Degree,
                        "school" => EducationField::School,
                        "date" => EducationField::Date,
                        _ => return Err(unknown()),
                    },
                )
            }
            _ => return Err(unknown()),
        };
        Ok(path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Text(t) => write!(f, "{}", reverse(TEXT_FIELDS, *t)),
            FieldPath::Personal(p) => write!(
                f,
                "personal.{}",
                match p {
                    PersonalField::Name => "name",
                    PersonalField::Title => "title",
                    PersonalField::DefiningPhrase => "definingPhrase",
                }
            ),
            FieldPath::Contact(slot, part) => write!(
                f,
                "personal.{}.{}",
                slot.key(),
                match part {
                    ContactPart::Value => "value",
                    ContactPart::Link => "link",
                }
            ),
            FieldPath::Style(s) => write!(f, "style.{}", reverse(STYLE_FIELDS, *s)),
            FieldPath::CoverLetterStyle(c) => write!(
                f,
                "coverLetterStyle.{}",
                match c {
                    CoverLetterField::FontFamily => "fontFamily",
                    CoverLetterField::FontSize => "fontSize",
                    CoverLetterField::TextColor => "textColor",
                }
            ),
            FieldPath::Experience(id, field) => write!(
                f,
                "experience.{id}.{}",
                match field {
                    ExperienceField::Title => "title",
                    ExperienceField::Company => "company",
                    ExperienceField::Date => "date",
                    ExperienceField::Description => "description",
                }
            ),
            FieldPath::Education(id, field) => write!(
                f,
                "education.{id}.{}",
                match field {
                    EducationField::Degree => "degree",
                    EducationField::School => "school",
                    EducationField::Date => "date",
                }
            ),
            FieldPath::ExperienceList => write!(f, "experience"),
            FieldPath::EducationList => write!(f, "education"),
            FieldPath::AiAnalysis => write!(f, "aiAnalysis"),
            FieldPath::Qualification => write!(f, "aiAnalysis.qualification"),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Patches
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub path: FieldPath,
    pub value: Value,
}

impl Patch {
    pub fn new(path: FieldPath, value: impl Into<Value>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }

    pub fn text(path: FieldPath, value: impl Into<String>) -> Self {
        Self::new(path, Value::String(value.into()))
    }
}

fn expect_string(path: &FieldPath, value: &Value) -> Result<String, PatchError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PatchError::InvalidValue {
            path: path.to_string(),
            expected: "a string",
        })
}

fn expect_u32(path: &FieldPath, value: &Value) -> Result<u32, PatchError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| PatchError::InvalidValue {
            path: path.to_string(),
            expected: "a non-negative integer",
        })
}

fn expect<T: DeserializeOwned>(
    path: &FieldPath,
    value: &Value,
    expected: &'static str,
) -> Result<T, PatchError> {
    serde_json::from_value(value.clone()).map_err(|_| PatchError::InvalidValue {
        path: path.to_string(),
        expected,
    })
}

fn contact_mut(doc: &mut Document, slot: ContactSlot) -> &mut ContactInfo {
    let p = &mut doc.personal;
    match slot {
        ContactSlot::Email => &mut p.email,
        ContactSlot::Email2 => &mut p.email2,
        ContactSlot::Phone => &mut p.phone,
        ContactSlot::Phone2 => &mut p.phone2,
        ContactSlot::Linkedin => &mut p.linkedin,
    }
}

fn experience_mut<'a>(doc: &'a mut Document, path: &FieldPath, id: Uuid) -> Result<&'a mut Experience, PatchError> {
    doc.experience
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| PatchError::EntryNotFound(path.to_string()))
}

fn education_mut<'a>(doc: &'a mut Document, path: &FieldPath, id: Uuid) -> Result<&'a mut Education, PatchError> {
    doc.education
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| PatchError::EntryNotFound(path.to_string()))
}

/// Writes exactly the field named by `patch.path`.
///
/// Setting a contact's display value also points its link at the slot's default
/// protocol (`mailto:` / `tel:`) or, for the profile link, at the value itself.
/// Patch `.link` afterwards to set an independent target.
pub fn apply_patch(doc: &mut Document, patch: &Patch) -> Result<(), PatchError> {
    let path = &patch.path;
    let value = &patch.value;

    match *path {
        FieldPath::Text(field) => {
            let s = expect_string(path, value)?;
            let target = match field {
                TextField::Summary => &mut doc.summary,
                TextField::Achievements => &mut doc.achievements,
                TextField::Strengths => &mut doc.strengths,
                TextField::Skills => &mut doc.skills,
                TextField::Cta => &mut doc.cta,
                TextField::CoverLetter => &mut doc.cover_letter,
                TextField::JobDescription => &mut doc.job_description,
                TextField::JobDescriptionUrl => &mut doc.job_description_url,
                TextField::CvInput => &mut doc.cv_input,
                TextField::CvInputUrl => &mut doc.cv_input_url,
            };
            *target = s;
        }
        FieldPath::Personal(field) => {
            let s = expect_string(path, value)?;
            match field {
                PersonalField::Name => doc.personal.name = s,
                PersonalField::Title => doc.personal.title = s,
                PersonalField::DefiningPhrase => doc.personal.defining_phrase = s,
            }
        }
        FieldPath::Contact(slot, ContactPart::Value) => {
            let s = expect_string(path, value)?;
            let contact = contact_mut(doc, slot);
            contact.link = match slot.default_protocol() {
                Some(proto) => format!("{proto}:{s}"),
                None => s.clone(),
            };
            contact.value = s;
        }
        FieldPath::Contact(slot, ContactPart::Link) => {
            contact_mut(doc, slot).link = expect_string(path, value)?;
        }
        FieldPath::Style(field) => {
            let style = &mut doc.style;
            match field {
                StyleField::Layout => style.layout = expect_string(path, value)?,
                StyleField::SheetColor => style.sheet_color = expect_string(path, value)?,
                StyleField::TextColor => style.text_color = expect_string(path, value)?,
                StyleField::BorderColor => style.border_color = expect_string(path, value)?,
                StyleField::HeaderBackgroundType => {
                    style.header_background_type = expect(path, value, "\"color\" or \"image\"")?
                }
                StyleField::HeaderColor => style.header_color = expect_string(path, value)?,
                StyleField::HeaderImageUrl => style.header_image_url = expect_string(path, value)?,
                StyleField::ProfilePictureUrl => {
                    style.profile_picture_url = expect_string(path, value)?
                }
                StyleField::ProfilePictureShape => {
                    style.profile_picture_shape =
                        expect(path, value, "\"circle\", \"square\" or \"brush\"")?
                }
                StyleField::ProfilePicturePosition => {
                    style.profile_picture_position =
                        expect(path, value, "\"left\", \"center\" or \"right\"")?
                }
                StyleField::ProfilePictureSize => {
                    style.profile_picture_size = expect_u32(path, value)?
                }
                StyleField::FontFamily => style.font_family = expect_string(path, value)?,
                StyleField::SectionTitleColor => {
                    style.section_title_color = expect_string(path, value)?
                }
                StyleField::SkillBackgroundColor => {
                    style.skill_background_color = expect_string(path, value)?
                }
                StyleField::SkillTextColor => style.skill_text_color = expect_string(path, value)?,
            }
        }
        FieldPath::CoverLetterStyle(field) => {
            let cl = &mut doc.cover_letter_style;
            match field {
                CoverLetterField::FontFamily => cl.font_family = expect_string(path, value)?,
                CoverLetterField::FontSize => cl.font_size = expect_u32(path, value)?,
                CoverLetterField::TextColor => cl.text_color = expect_string(path, value)?,
            }
        }
        FieldPath::Experience(id, field) => {
            let s = expect_string(path, value)?;
            let entry = experience_mut(doc, path, id)?;
            match field {
                ExperienceField::Title => entry.title = s,
                ExperienceField::Company => entry.company = s,
                ExperienceField::Date => entry.date = s,
                ExperienceField::Description => entry.description = s,
            }
        }
        FieldPath::Education(id, field) => {
            let s = expect_string(path, value)?;
            let entry = education_mut(doc, path, id)?;
            match field {
                EducationField::Degree => entry.degree = s,
                EducationField::School => entry.school = s,
                EducationField::Date => entry.date = s,
            }
        }
        FieldPath::ExperienceList => {
            let drafts: Vec<ExperienceDraft> = expect(path, value, "a list of experience entries")?;
            doc.experience = drafts.into_iter().map(Experience::from).collect();
        }
        FieldPath::EducationList => {
            let drafts: Vec<EducationDraft> = expect(path, value, "a list of education entries")?;
            doc.education = drafts.into_iter().map(Education::from).collect();
        }
        FieldPath::AiAnalysis => {
            doc.ai_analysis = expect::<Option<AiAnalysis>>(path, value, "an analysis object or null")?;
        }
        FieldPath::Qualification => {
            let qualification: QualificationAnalysis =
                expect(path, value, "a qualification analysis object")?;
            doc.ai_analysis
                .get_or_insert_with(AiAnalysis::default)
                .qualification = qualification;
        }
    }
    Ok(())
}

/// Current value of a free-text field. Structured paths (style, lists, analysis)
/// are not text and yield `InvalidValue`.
pub fn read_text(doc: &Document, path: &FieldPath) -> Result<String, PatchError> {
    let text = match *path {
        FieldPath::Text(field) => match field {
            TextField::Summary => &doc.summary,
            TextField::Achievements => &doc.achievements,
            TextField::Strengths => &doc.strengths,
            TextField::Skills => &doc.skills,
            TextField::Cta => &doc.cta,
            TextField::CoverLetter => &doc.cover_letter,
            TextField::JobDescription => &doc.job_description,
            TextField::JobDescriptionUrl => &doc.job_description_url,
            TextField::CvInput => &doc.cv_input,
            TextField::CvInputUrl => &doc.cv_input_url,
        },
        FieldPath::Personal(field) => match field {
            PersonalField::Name => &doc.personal.name,
            PersonalField::Title => &doc.personal.title,
            PersonalField::DefiningPhrase => &doc.personal.defining_phrase,
        },
        FieldPath::Experience(id, field) => {
            let entry = doc
                .experience(id)
                .ok_or_else(|| PatchError::EntryNotFound(path.to_string()))?;
            match field {
                ExperienceField::Title => &entry.title,
                ExperienceField::Company => &entry.company,
                ExperienceField::Date => &entry.date,
                ExperienceField::Description => &entry.description,
            }
        }
        FieldPath::Education(id, field) => {
            let entry = doc
                .education(id)
                .ok_or_else(|| PatchError::EntryNotFound(path.to_string()))?;
            match field {
                EducationField::Degree => &entry.degree,
                EducationField::School => &entry.school,
                EducationField::Date => &entry.date,
            }
        }
        _ => {
            return Err(PatchError::InvalidValue {
                path: path.to_string(),
                expected: "a free-text field",
            })
        }
    };
    Ok(text.clone())
}

/// Applies a batch all-or-nothing: on any failure `doc` is left untouched.
pub fn apply_all(doc: &mut Document, patches: &[Patch]) -> Result<(), PatchError> {
    let mut draft = doc.clone();
    for patch in patches {
        apply_patch(&mut draft, patch)?;
    }
    *doc = draft;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{PictureShape, PicturePosition};
    use serde_json::json;

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    #[test]
    fn test_paths_round_trip_through_display() {
        let id = Uuid::new_v4();
        for raw in [
            "summary".to_string(),
            "coverLetter".to_string(),
            "personal.definingPhrase".to_string(),
            "personal.email2.link".to_string(),
            "style.profilePictureSize".to_string(),
            "coverLetterStyle.fontSize".to_string(),
            format!("experience.{id}.description"),
            format!("education.{id}.school"),
            "experience".to_string(),
            "aiAnalysis.qualification".to_string(),
        ] {
            assert_eq!(path(&raw).to_string(), raw);
        }
    }

    #[test]
    fn test_unknown_paths_are_rejected() {
        for raw in ["", "nope", "style.glitter", "personal.fax.value", "experience.not-a-uuid.title"] {
            assert_eq!(
                raw.parse::<FieldPath>(),
                Err(PatchError::UnknownPath(raw.to_string())),
                "{raw} should not parse"
            );
        }
    }

    #[test]
    fn test_text_patch_writes_only_that_field() {
        let mut doc = Document::default();
        let before = doc.clone();
        apply_patch(&mut doc, &Patch::text(path("summary"), "New summary")).unwrap();
        assert_eq!(doc.summary, "New summary");
        doc.summary = before.summary.clone();
        assert_eq!(doc, before);
    }

    #[test]
    fn test_contact_value_mirrors_default_protocol_link() {
        let mut doc = Document::default();
        apply_patch(&mut doc, &Patch::text(path("personal.email2.value"), "me@example.org")).unwrap();
        assert_eq!(doc.personal.email2.link, "mailto:me@example.org");

        apply_patch(&mut doc, &Patch::text(path("personal.phone2.value"), "+34 600")).unwrap();
        assert_eq!(doc.personal.phone2.link, "tel:+34 600");

        apply_patch(&mut doc, &Patch::text(path("personal.linkedin.value"), "https://l.in/x")).unwrap();
        assert_eq!(doc.personal.linkedin.link, "https://l.in/x");
    }

    #[test]
    fn test_explicit_link_overrides_mirror() {
        let mut doc = Document::default();
        apply_all(
            &mut doc,
            &[
                Patch::text(path("personal.email.value"), "a@b.c"),
                Patch::text(path("personal.email.link"), "mailto:inbox@b.c"),
            ],
        )
        .unwrap();
        assert_eq!(doc.personal.email.value, "a@b.c");
        assert_eq!(doc.personal.email.link, "mailto:inbox@b.c");
    }

    #[test]
    fn test_style_enums_and_numbers_validated() {
        let mut doc = Document::default();
        apply_patch(&mut doc, &Patch::new(path("style.profilePictureShape"), "brush")).unwrap();
        apply_patch(&mut doc, &Patch::new(path("style.profilePicturePosition"), "right")).unwrap();
        apply_patch(&mut doc, &Patch::new(path("style.profilePictureSize"), 192)).unwrap();
        assert_eq!(doc.style.profile_picture_shape, PictureShape::Brush);
        assert_eq!(doc.style.profile_picture_position, PicturePosition::Right);
        assert_eq!(doc.style.profile_picture_size, 192);

        let err = apply_patch(&mut doc, &Patch::new(path("style.profilePictureShape"), "hexagon"));
        assert!(matches!(err, Err(PatchError::InvalidValue { .. })));
        let err = apply_patch(&mut doc, &Patch::new(path("coverLetterStyle.fontSize"), "16"));
        assert!(matches!(err, Err(PatchError::InvalidValue { .. })));
    }

    #[test]
    fn test_entry_patch_targets_by_id() {
        let mut doc = Document::default();
        let id = doc.experience[0].id;
        apply_patch(
            &mut doc,
            &Patch::text(path(&format!("experience.{id}.company")), "Contoso"),
        )
        .unwrap();
        assert_eq!(doc.experience[0].company, "Contoso");
        assert_eq!(doc.experience[0].id, id, "identity untouched");

        let missing = format!("education.{}.degree", Uuid::new_v4());
        let err = apply_patch(&mut doc, &Patch::text(path(&missing), "MSc"));
        assert_eq!(err, Err(PatchError::EntryNotFound(missing)));
    }

    #[test]
    fn test_list_import_assigns_fresh_ids_in_order() {
        let mut doc = Document::default();
        let old_id = doc.experience[0].id;
        let value = json!([
            { "title": "A", "company": "X", "date": "2020", "description": "" },
            { "title": "B", "company": "Y", "date": "2021", "description": "" }
        ]);
        apply_patch(&mut doc, &Patch::new(FieldPath::ExperienceList, value)).unwrap();
        let titles: Vec<_> = doc.experience.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
        assert!(doc.experience.iter().all(|e| e.id != old_id));
        assert_ne!(doc.experience[0].id, doc.experience[1].id);
    }

    #[test]
    fn test_qualification_patch_creates_analysis_when_absent() {
        let mut doc = Document::default();
        assert!(doc.ai_analysis.is_none());
        let value = json!({
            "qualifiedPercentage": 8, "notQualifiedPercentage": 82, "overqualifiedPercentage": 10,
            "summary": "s", "qualifiedArgument": "", "notQualifiedArgument": "", "overqualifiedArgument": ""
        });
        apply_patch(&mut doc, &Patch::new(FieldPath::Qualification, value)).unwrap();
        let analysis = doc.ai_analysis.expect("analysis created");
        assert_eq!(analysis.qualification.not_qualified_percentage, 82.0);
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let mut doc = Document::default();
        let before = doc.clone();
        let result = apply_all(
            &mut doc,
            &[
                Patch::text(path("summary"), "changed"),
                Patch::new(path("style.profilePictureSize"), "huge"),
            ],
        );
        assert!(result.is_err());
        assert_eq!(doc, before, "failed batch must not leave partial writes");
    }

    #[test]
    fn test_patch_deserializes_from_json() {
        let raw = r#"{ "path": "personal.title", "value": "Staff Engineer" }"#;
        let patch: Patch = serde_json::from_str(raw).unwrap();
        assert_eq!(patch.path, FieldPath::Personal(PersonalField::Title));

        let bad = r#"{ "path": "personal.age", "value": 3 }"#;
        assert!(serde_json::from_str::<Patch>(bad).is_err());
    }

    #[test]
    fn test_read_text_follows_entry_ids() {
        let doc = Document::default();
        let entry = &doc.experience[0];
        let text = read_text(&doc, &FieldPath::Experience(entry.id, ExperienceField::Description)).unwrap();
        assert_eq!(text, entry.description);
        assert_eq!(read_text(&doc, &path("summary")).unwrap(), doc.summary);

        let missing = FieldPath::Experience(Uuid::new_v4(), ExperienceField::Title);
        assert!(matches!(read_text(&doc, &missing), Err(PatchError::EntryNotFound(_))));
        assert!(read_text(&doc, &path("style.layout")).is_err());
    }
}
