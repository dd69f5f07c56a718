//! Banner family: full-width header bar, then sidebar + main column.

use crate::document::Document;
use crate::layout::BannerVariant;
use crate::render::blocks::{
    contact_items, education_list, main_sections, name_block, picture, section, skill_tags,
    CONTACT, EDUCATION, SKILLS,
};
use crate::render::node::{el, Node};
use crate::style::{ResolvedHeader, ResolvedStyle};

pub fn render(doc: &Document, style: &ResolvedStyle, variant: BannerVariant) -> Node {
    let overlap = variant == BannerVariant::Overlap;
    let centered = variant == BannerVariant::Centered;
    let size = style.picture_size_px;
    let justify = if centered {
        "justify-center"
    } else {
        style.picture_alignment.justify_class()
    };

    let header_alignment = if centered {
        "text-center items-center"
    } else {
        "text-left items-start"
    };
    let mut header = el("header")
        .class(format!("flex flex-col {header_alignment}"))
        .style("background", style.header.background_css())
        .style("color", style.header.text_color());
    if matches!(style.header, ResolvedHeader::Image { .. }) {
        header = header.style("aspect-ratio", "4 / 1");
    }

    if overlap {
        if style.picture_url.is_some() {
            header = header.style("padding-bottom", format!("{}px", size / 4));
        }
    } else {
        header = header.child(
            el("div")
                .class("p-[1.5cm]")
                .child_opt(picture(style, &doc.personal.name, justify, &[]))
                .child(name_block(&doc.personal, "", "text-4xl")),
        );
    }

    let mut aside = el("aside").class("md:col-span-1");
    if overlap {
        let lift = [
            ("margin-top", format!("-{}px", size * 3 / 4)),
            ("background-color", "#FFFFFF".to_string()),
        ];
        aside = aside
            .child_opt(picture(style, &doc.personal.name, justify, &lift))
            .child(name_block(&doc.personal, "text-center mb-4", "text-4xl"));
    }
    aside = aside
        .child(section(
            CONTACT,
            style,
            vec![el("div")
                .class("flex flex-col space-y-1")
                .children(contact_items(&doc.personal))
                .into()],
        ))
        .child(section(SKILLS, style, vec![skill_tags(&doc.skills, style)]))
        .child(section(EDUCATION, style, education_list(doc)));

    let (grid, main_span) = if variant == BannerVariant::Infographic {
        ("md:grid-cols-1 gap-4", "md:col-span-1")
    } else {
        ("md:grid-cols-3 gap-8", "md:col-span-2")
    };

    el("div")
        .class("flex flex-col")
        .child(header)
        .child(
            el("div")
                .class(format!("flex-grow grid grid-cols-1 {grid} p-[1.5cm]"))
                .child(aside)
                .child(el("main").class(main_span).children(main_sections(doc, style))),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{HeaderBackgroundType, StyleSettings};
    use crate::style::resolve;

    fn render_with(variant: BannerVariant, style: StyleSettings) -> String {
        let doc = Document {
            style: style.clone(),
            ..Document::default()
        };
        render(&doc, &resolve(&style), variant).to_html()
    }

    #[test]
    fn test_infographic_uses_single_column_grid() {
        let html = render_with(BannerVariant::Infographic, StyleSettings::default());
        assert!(html.contains("md:grid-cols-1"));
        assert!(!html.contains("md:col-span-2"));
    }

    #[test]
    fn test_standard_uses_three_column_grid() {
        let html = render_with(BannerVariant::Standard, StyleSettings::default());
        assert!(html.contains("md:grid-cols-3"));
        assert!(html.contains("md:col-span-2"));
    }

    #[test]
    fn test_overlap_moves_picture_into_sidebar_with_negative_margin() {
        let style = StyleSettings {
            profile_picture_url: "p.png".to_string(),
            profile_picture_size: 128,
            ..StyleSettings::default()
        };
        let html = render_with(BannerVariant::Overlap, style);
        assert!(html.contains("margin-top: -96px"));
        assert!(html.contains("padding-bottom: 32px"));
        let aside_at = html.find("<aside").unwrap();
        assert!(html.find("<img").unwrap() > aside_at, "picture lives in the sidebar");
        assert!(html.find("<h1").unwrap() > aside_at, "name block lives in the sidebar");
    }

    #[test]
    fn test_centered_forces_centered_picture_and_header() {
        let style = StyleSettings {
            profile_picture_url: "p.png".to_string(),
            profile_picture_position: crate::document::PicturePosition::Left,
            ..StyleSettings::default()
        };
        let html = render_with(BannerVariant::Centered, style);
        assert!(html.contains("text-center items-center"));
        assert!(html.contains("w-full flex justify-center"));
    }

    #[test]
    fn test_image_header_has_overlay_and_white_text() {
        let style = StyleSettings {
            header_background_type: HeaderBackgroundType::Image,
            header_image_url: "https://img.example/h.jpg".to_string(),
            ..StyleSettings::default()
        };
        let html = render_with(BannerVariant::Standard, style);
        assert!(html.contains("linear-gradient(rgba(0,0,0,0.5), rgba(0,0,0,0.5))"));
        assert!(html.contains("color: #FFFFFF"));
        assert!(html.contains("aspect-ratio: 4 / 1"));
    }
}
