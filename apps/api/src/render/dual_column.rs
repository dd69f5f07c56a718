//! Dual-column family: colored aside carrying identity, contact, skills and education.

use crate::document::Document;
use crate::layout::{HeaderAlign, SidebarWidth};
use crate::render::blocks::{
    aside_section, contact_items, main_sections, picture, skill_tags, CONTACT, EDUCATION, SKILLS,
};
use crate::render::node::{el, Node};
use crate::style::ResolvedStyle;

pub fn render(
    doc: &Document,
    style: &ResolvedStyle,
    sidebar: SidebarWidth,
    header_align: HeaderAlign,
) -> Node {
    let (aside_width, main_width) = sidebar.classes();
    let align = match header_align {
        HeaderAlign::Left => "text-left",
        HeaderAlign::Center => "text-center",
    };
    let phrase = doc.personal.defining_phrase.trim();

    let identity = el("div")
        .class(format!("{align} mb-6"))
        .child(
            el("h1")
                .class("text-3xl font-bold font-slab uppercase")
                .text(doc.personal.name.clone()),
        )
        .child(
            el("h2")
                .class("text-lg font-light capitalize")
                .text(doc.personal.title.clone()),
        )
        .child_opt((!phrase.is_empty()).then(|| {
            el("p")
                .class("mt-2 italic font-semibold")
                .text(format!("\"{phrase}\""))
        }));

    let education = doc.education.iter().map(|edu| -> Node {
        el("div")
            .class("mb-2 text-sm")
            .child(el("h4").class("font-bold").text(edu.degree.clone()))
            .child(el("p").text(edu.school.clone()))
            .child(el("p").class("text-xs").text(edu.date.clone()))
            .into()
    });

    let aside = el("aside")
        .class(format!("{aside_width} p-[1.5cm]"))
        .style("background-color", style.sidebar_color.clone())
        .style("color", style.sidebar_text_color)
        .child_opt(picture(
            style,
            &doc.personal.name,
            style.picture_alignment.justify_class(),
            &[],
        ))
        .child(identity)
        .child(aside_section(
            CONTACT,
            style,
            vec![el("div")
                .class("flex flex-col space-y-1")
                .children(contact_items(&doc.personal))
                .into()],
        ))
        .child(aside_section(SKILLS, style, vec![skill_tags(&doc.skills, style)]))
        .child(aside_section(EDUCATION, style, education.collect()));

    el("div")
        .class("flex")
        .child(aside)
        .child(
            el("main")
                .class(format!("{main_width} p-[1.5cm]"))
                .children(main_sections(doc, style)),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StyleSettings;
    use crate::style::resolve;

    #[test]
    fn test_aside_uses_header_color_and_contrast_text() {
        let style = StyleSettings {
            header_color: "#FAFAFA".to_string(),
            ..StyleSettings::default()
        };
        let doc = Document::default();
        let html = render(&doc, &resolve(&style), SidebarWidth::Third, HeaderAlign::Center)
            .to_html();
        assert!(html.contains("background-color: #FAFAFA; color: #000000"));
        assert!(html.contains("w-1/3 p-[1.5cm]"));
        assert!(html.contains("w-2/3 p-[1.5cm]"));
    }

    #[test]
    fn test_modern_widths_and_left_header() {
        let doc = Document::default();
        let html = render(
            &doc,
            &resolve(&doc.style),
            SidebarWidth::Quarter,
            HeaderAlign::Left,
        )
        .to_html();
        assert!(html.contains("w-1/4"));
        assert!(html.contains("w-3/4"));
        assert!(html.contains("text-left mb-6"));
    }

    #[test]
    fn test_sections_keep_document_order() {
        let doc = Document::default();
        let html = render(&doc, &resolve(&doc.style), SidebarWidth::Third, HeaderAlign::Center)
            .to_html();
        let summary = html.find("PROFESSIONAL SUMMARY").unwrap();
        let experience = html.find("EXPERIENCE").unwrap();
        let achievements = html.find("KEY ACHIEVEMENTS").unwrap();
        assert!(summary < experience && experience < achievements);
    }
}
