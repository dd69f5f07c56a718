//! Cover-letter page body.

use crate::document::patch::ContactSlot;
use crate::document::Document;
use crate::render::blocks::{contact_item, contact_slots, styled_lines};
use crate::render::node::{el, Node};
use crate::style::font_stack;

/// Header (name, title, contact row) followed by the letter body in the
/// cover-letter font settings.
pub fn render(doc: &Document) -> Node {
    let letter = &doc.cover_letter_style;

    // Phones | emails | profile, separators only between non-empty groups.
    let mut groups: Vec<Vec<Node>> = vec![Vec::new(), Vec::new(), Vec::new()];
    for (slot, info) in contact_slots(&doc.personal) {
        let group = match slot {
            ContactSlot::Phone | ContactSlot::Phone2 => 0,
            ContactSlot::Email | ContactSlot::Email2 => 1,
            ContactSlot::Linkedin => 2,
        };
        groups[group].extend(contact_item(info, slot.default_protocol()));
    }
    let mut contact_row: Vec<Node> = Vec::new();
    for group in groups.into_iter().filter(|g| !g.is_empty()) {
        if !contact_row.is_empty() {
            contact_row.push(el("span").class("text-gray-400").text("|").into());
        }
        contact_row.extend(group);
    }

    el("div")
        .style("color", doc.style.text_color.clone())
        .child(
            el("header")
                .class("text-center mb-10")
                .child(
                    el("h1")
                        .class("text-3xl font-bold font-slab")
                        .text(doc.personal.name.clone()),
                )
                .child(el("p").text(doc.personal.title.clone()))
                .child(
                    el("div")
                        .class("flex justify-center flex-wrap gap-x-4 gap-y-1 text-sm mt-2")
                        .children(contact_row),
                ),
        )
        .child(
            el("main")
                .class("text-left")
                .style("font-family", font_stack(&letter.font_family, "serif"))
                .style("font-size", format!("{}pt", letter.font_size))
                .style("color", letter.text_color.clone())
                .style("line-height", "1.5")
                .children(styled_lines(&doc.cover_letter)),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_uses_cover_letter_style() {
        let mut doc = Document::default();
        doc.cover_letter = "Dear team,\n\nI am writing to apply.".to_string();
        doc.cover_letter_style.font_size = 16;
        doc.cover_letter_style.font_family = "Lora".to_string();
        let html = render(&doc).to_html();
        assert!(html.contains("font-size: 16pt"));
        assert!(html.contains("font-family: 'Lora', serif"));
        assert!(html.contains("line-height: 1.5"));
        assert!(html.contains("class=\"blank-line\""));
    }

    #[test]
    fn test_separators_skip_empty_groups() {
        let mut doc = Document::default();
        doc.personal.linkedin = Default::default();
        let html = render(&doc).to_html();
        assert_eq!(html.matches(">|<").count(), 1);
    }
}
