//! Predefined style presets.
//!
//! A theme only names the fields it changes. Applying one produces ordinary
//! patches, so layout, picture, and font choices outside the preset survive.

use serde::Serialize;

use crate::document::patch::{FieldPath, Patch, StyleField};

#[derive(Debug, Clone, Serialize)]
pub struct Theme {
    pub name: &'static str,
    #[serde(skip)]
    pub fields: &'static [(StyleField, &'static str)],
}

pub const PRESET_THEMES: &[Theme] = &[
    Theme {
        name: "Ocean",
        fields: &[
            (StyleField::HeaderColor, "#0C4A6E"),
            (StyleField::BorderColor, "#0EA5E9"),
            (StyleField::SectionTitleColor, "#0C4A6E"),
            (StyleField::SkillBackgroundColor, "#E0F2FE"),
            (StyleField::SkillTextColor, "#075985"),
        ],
    },
    Theme {
        name: "Forest",
        fields: &[
            (StyleField::HeaderColor, "#14532D"),
            (StyleField::BorderColor, "#22C55E"),
            (StyleField::SectionTitleColor, "#166534"),
            (StyleField::SkillBackgroundColor, "#DCFCE7"),
            (StyleField::SkillTextColor, "#14532D"),
        ],
    },
    Theme {
        name: "Graphite",
        fields: &[
            (StyleField::HeaderColor, "#1F2937"),
            (StyleField::BorderColor, "#6B7280"),
            (StyleField::SectionTitleColor, "#111827"),
            (StyleField::SkillBackgroundColor, "#E5E7EB"),
            (StyleField::SkillTextColor, "#1F2937"),
            (StyleField::FontFamily, "Roboto Slab"),
        ],
    },
    Theme {
        name: "Sunset",
        fields: &[
            (StyleField::HeaderColor, "#9A3412"),
            (StyleField::BorderColor, "#F97316"),
            (StyleField::SectionTitleColor, "#9A3412"),
            (StyleField::SkillBackgroundColor, "#FFEDD5"),
            (StyleField::SkillTextColor, "#9A3412"),
        ],
    },
    Theme {
        name: "Paper",
        fields: &[
            (StyleField::SheetColor, "#FFFDF7"),
            (StyleField::TextColor, "#292524"),
            (StyleField::HeaderColor, "#F5F5F4"),
            (StyleField::BorderColor, "#A8A29E"),
            (StyleField::SectionTitleColor, "#44403C"),
            (StyleField::SkillBackgroundColor, "#E7E5E4"),
            (StyleField::SkillTextColor, "#292524"),
            (StyleField::FontFamily, "Lora"),
        ],
    },
];

pub fn find(name: &str) -> Option<&'static Theme> {
    PRESET_THEMES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

impl Theme {
    pub fn patches(&self) -> Vec<Patch> {
        self.fields
            .iter()
            .map(|(field, value)| Patch::text(FieldPath::Style(*field), *value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::patch::apply_all;
    use crate::document::Document;

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("forest").map(|t| t.name), Some("Forest"));
        assert!(find("neon").is_none());
    }

    #[test]
    fn test_theme_only_touches_its_fields() {
        let mut doc = Document::default();
        doc.style.layout = "banner".to_string();
        doc.style.profile_picture_size = 200;

        let theme = find("Forest").unwrap();
        apply_all(&mut doc, &theme.patches()).unwrap();

        assert_eq!(doc.style.header_color, "#14532D");
        assert_eq!(doc.style.layout, "banner");
        assert_eq!(doc.style.profile_picture_size, 200);
    }

    #[test]
    fn test_every_preset_applies_cleanly() {
        for theme in PRESET_THEMES {
            let mut doc = Document::default();
            assert!(apply_all(&mut doc, &theme.patches()).is_ok(), "{}", theme.name);
        }
    }
}
