//! Minimalist family: one centered column, bullet-separated contact row.

use crate::document::Document;
use crate::render::blocks::{
    contact_item, contact_slots, cta_section, education_list, picture, section, skill_tags,
    styled_lines, ACHIEVEMENTS, EDUCATION, EXPERIENCE, ITEM_WRAPPER, SKILLS, STRENGTHS, SUMMARY,
};
use crate::render::node::{el, Node};
use crate::style::ResolvedStyle;

pub fn render(doc: &Document, style: &ResolvedStyle) -> Node {
    let mut contacts: Vec<Node> = Vec::new();
    for (slot, info) in contact_slots(&doc.personal) {
        if let Some(item) = contact_item(info, slot.default_protocol()) {
            if !contacts.is_empty() {
                contacts.push(el("span").class("text-gray-400").text("\u{2022}").into());
            }
            contacts.push(item);
        }
    }

    let experience = doc.experience.iter().map(|exp| -> Node {
        el("div")
            .class(format!("mb-4 {ITEM_WRAPPER}"))
            .child(
                el("div")
                    .class("flex justify-between items-baseline")
                    .child(el("h3").class("font-bold text-base").text(exp.title.clone()))
                    .child(el("p").class("text-sm font-light").text(exp.date.clone())),
            )
            .child(el("p").class("italic text-sm mb-1").text(exp.company.clone()))
            .child(
                el("div")
                    .class("prose prose-sm max-w-none")
                    .children(styled_lines(&exp.description)),
            )
            .into()
    });

    let phrase = doc.personal.defining_phrase.trim();
    let main = el("main")
        .class("w-full max-w-4xl mx-auto mt-8 text-left")
        .child(section(SUMMARY, style, styled_lines(&doc.summary)))
        .child(section(EXPERIENCE, style, experience.collect()))
        .child(section(ACHIEVEMENTS, style, styled_lines(&doc.achievements)))
        .child(section(STRENGTHS, style, styled_lines(&doc.strengths)))
        .child(
            el("div")
                .class("grid grid-cols-1 md:grid-cols-2 gap-x-8")
                .child(section(SKILLS, style, vec![skill_tags(&doc.skills, style)]))
                .child(section(EDUCATION, style, education_list(doc))),
        )
        .child_opt(cta_section(doc, style));

    el("div")
        .class("flex flex-col items-center text-center p-[1.5cm]")
        .child_opt(picture(
            style,
            &doc.personal.name,
            style.picture_alignment.justify_class(),
            &[],
        ))
        .child(
            el("h1")
                .class("text-4xl font-bold font-slab uppercase")
                .text(doc.personal.name.clone()),
        )
        .child(
            el("h2")
                .class("text-xl font-light mt-1 capitalize")
                .text(doc.personal.title.clone()),
        )
        .child_opt((!phrase.is_empty()).then(|| {
            el("p")
                .class("mt-2 italic font-semibold")
                .text(format!("\"{phrase}\""))
        }))
        .child(
            el("div")
                .class("flex gap-x-4 gap-y-1 justify-center flex-wrap text-sm mt-4 text-gray-600")
                .children(contacts),
        )
        .child(main)
        .into()
}
