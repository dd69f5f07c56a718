//! Building blocks shared by every layout family.

use crate::document::patch::ContactSlot;
use crate::document::{ContactInfo, Document, Education, Experience, PersonalDetails};
use crate::render::node::{el, Element, Node};
use crate::style::{ClipRule, ResolvedStyle};

pub const CONTACT: &str = "Contact";
pub const SKILLS: &str = "Skills";
pub const EDUCATION: &str = "Education";
pub const SUMMARY: &str = "Professional Summary";
pub const EXPERIENCE: &str = "Experience";
pub const ACHIEVEMENTS: &str = "Key Achievements";
pub const STRENGTHS: &str = "Key Strengths";
pub const CALL_TO_ACTION: &str = "Call to Action";

/// Page-break-safe wrapper class for entries.
pub const ITEM_WRAPPER: &str = "item-wrapper";

/// Line-oriented text: `"- "` lines become list items (consecutive ones share a
/// list), other lines paragraphs, empty lines a visible paragraph break.
pub fn styled_lines(source: &str) -> Vec<Node> {
    if source.trim().is_empty() {
        return Vec::new();
    }

    let mut nodes: Vec<Node> = Vec::new();
    let mut list: Option<Element> = None;

    for line in source.split('\n').map(str::trim) {
        if let Some(item) = line.strip_prefix("- ") {
            let ul = list.take().unwrap_or_else(|| el("ul").class("ml-4 list-disc"));
            list = Some(ul.child(el("li").text(item)));
            continue;
        }
        if let Some(ul) = list.take() {
            nodes.push(ul.into());
        }
        if line.is_empty() {
            nodes.push(el("p").class("blank-line").text("\u{a0}").into());
        } else {
            nodes.push(el("p").class("mb-2").text(line).into());
        }
    }
    if let Some(ul) = list {
        nodes.push(ul.into());
    }
    nodes
}

/// `None` when the contact has no display value.
pub fn contact_item(contact: &ContactInfo, default_protocol: Option<&str>) -> Option<Node> {
    if contact.is_absent() {
        return None;
    }
    let link = contact.link.trim();
    let href = if !link.is_empty() {
        Some(link.to_string())
    } else {
        default_protocol.map(|proto| format!("{proto}:{}", contact.value))
    };

    let node = match href {
        Some(href) => el("a")
            .attr("href", href)
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
            .class("break-words hover:underline"),
        None => el("p").class("break-words"),
    };
    Some(node.text(contact.value.clone()).into())
}

/// Contacts in display order: phones, emails, profile link.
pub fn contact_items(personal: &PersonalDetails) -> Vec<Node> {
    contact_slots(personal)
        .into_iter()
        .filter_map(|(slot, info)| contact_item(info, slot.default_protocol()))
        .collect()
}

pub fn contact_slots(personal: &PersonalDetails) -> [(ContactSlot, &ContactInfo); 5] {
    [
        (ContactSlot::Phone, &personal.phone),
        (ContactSlot::Phone2, &personal.phone2),
        (ContactSlot::Email, &personal.email),
        (ContactSlot::Email2, &personal.email2),
        (ContactSlot::Linkedin, &personal.linkedin),
    ]
}

pub fn section(title: &str, style: &ResolvedStyle, body: Vec<Node>) -> Node {
    el("div")
        .class("mb-4")
        .child(
            el("h2")
                .class("text-lg font-bold font-slab border-b-2")
                .style("border-color", style.border_color.clone())
                .style("color", style.section_title_color.clone())
                .text(title.to_uppercase()),
        )
        .child(el("div").class("mt-2 text-sm").children(body))
        .into()
}

/// Sidebar heading variant used inside a colored aside (inherits the aside's text color).
pub fn aside_section(title: &str, style: &ResolvedStyle, body: Vec<Node>) -> Node {
    el("div")
        .class("mb-4 text-sm item-wrapper")
        .child(
            el("h3")
                .class("text-lg font-bold font-slab mb-2 border-b-2")
                .style("border-color", style.border_color.clone())
                .text(title.to_uppercase()),
        )
        .children(body)
        .into()
}

pub fn skill_tags(skills: &str, style: &ResolvedStyle) -> Node {
    el("div")
        .class("flex flex-wrap gap-2")
        .children(
            skills
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|skill| {
                    el("span")
                        .class("skill-tag text-xs font-semibold px-2.5 py-0.5 rounded-full")
                        .style("background-color", style.skill_background_color.clone())
                        .style("color", style.skill_text_color.clone())
                        .text(skill)
                }),
        )
        .into()
}

/// Profile picture inside its alignment container, or `None` without a URL.
pub fn picture(
    style: &ResolvedStyle,
    alt: &str,
    justify: &str,
    extra: &[(&'static str, String)],
) -> Option<Node> {
    let url = style.picture_url.as_ref()?;
    let size = format!("{}px", style.picture_size_px);

    let shape_class = match style.picture_clip {
        ClipRule::Round => "rounded-full",
        ClipRule::RoundedRect => "rounded-xl",
        ClipRule::Path(_) => "",
    };
    let mut img = el("img")
        .attr("src", url.clone())
        .attr("alt", alt)
        .class(format!("object-cover border-4 {shape_class}"))
        .style("border-color", style.border_color.clone())
        .style("width", size.clone())
        .style("height", size);
    if let ClipRule::Path(id) = style.picture_clip {
        img = img.style("clip-path", format!("url(#{id})"));
    }
    for (property, value) in extra {
        img = img.style(*property, value.clone());
    }

    Some(
        el("div")
            .class(format!("w-full flex {justify} mb-4"))
            .child(img)
            .into(),
    )
}

pub fn name_block(personal: &PersonalDetails, classes: &str, name_size: &str) -> Node {
    let phrase = personal.defining_phrase.trim();
    el("div")
        .class(classes)
        .child(
            el("h1")
                .class(format!("{name_size} font-bold font-slab uppercase"))
                .text(personal.name.clone()),
        )
        .child(
            el("h2")
                .class("text-xl font-light capitalize")
                .text(personal.title.clone()),
        )
        .child_opt((!phrase.is_empty()).then(|| {
            el("p")
                .class("mt-2 italic font-semibold")
                .text(format!("\"{phrase}\""))
        }))
        .into()
}

pub fn experience_item(entry: &Experience) -> Node {
    el("div")
        .class(format!("mb-4 {ITEM_WRAPPER}"))
        .child(el("h3").class("font-bold").text(entry.title.clone()))
        .child(
            el("p")
                .class("italic text-sm")
                .text(format!("{} | {}", entry.company, entry.date)),
        )
        .child(
            el("div")
                .class("prose prose-sm max-w-none")
                .children(styled_lines(&entry.description)),
        )
        .into()
}

pub fn education_item(entry: &Education) -> Node {
    el("div")
        .class(format!("mb-2 {ITEM_WRAPPER}"))
        .child(el("h3").class("font-bold").text(entry.degree.clone()))
        .child(el("p").class("italic").text(entry.school.clone()))
        .child(el("p").class("text-xs").text(entry.date.clone()))
        .into()
}

pub fn education_list(doc: &Document) -> Vec<Node> {
    doc.education.iter().map(education_item).collect()
}

pub fn experience_list(doc: &Document) -> Vec<Node> {
    doc.experience.iter().map(experience_item).collect()
}

/// The closing call to action; absent when blank.
pub fn cta_section(doc: &Document, style: &ResolvedStyle) -> Option<Node> {
    if doc.cta.trim().is_empty() {
        return None;
    }
    Some(section(
        CALL_TO_ACTION,
        style,
        vec![el("div")
            .class("text-center italic p-3 rounded-md")
            .style("background-color", style.skill_background_color.clone())
            .style("color", style.skill_text_color.clone())
            .children(styled_lines(&doc.cta))
            .into()],
    ))
}

/// Sections common to every main column, in order.
pub fn main_sections(doc: &Document, style: &ResolvedStyle) -> Vec<Node> {
    let mut nodes = vec![
        section(SUMMARY, style, styled_lines(&doc.summary)),
        section(EXPERIENCE, style, experience_list(doc)),
        section(ACHIEVEMENTS, style, styled_lines(&doc.achievements)),
        section(STRENGTHS, style, styled_lines(&doc.strengths)),
    ];
    nodes.extend(cta_section(doc, style));
    nodes
}
