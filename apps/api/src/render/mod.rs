//! Template rendering: document + resolved style + layout → ordered pages.
//!
//! Rendering is pure and deterministic. The same inputs always produce the same
//! tree, so preview, export, and clipboard never disagree.

pub mod banner;
pub mod blocks;
pub mod compatibility;
pub mod cover_letter;
pub mod dual_column;
pub mod minimalist;
pub mod node;

pub use compatibility::render_compatibility;
pub use node::Node;

use serde::Serialize;

use crate::document::Document;
use crate::layout::LayoutRenderer;
use crate::render::node::el;
use crate::style::ResolvedStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    CoverLetter,
    Resume,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub kind: PageKind,
    pub root: Node,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub include_cover_letter: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_cover_letter: true,
        }
    }
}

/// Cover letter first (when present and requested), then the résumé.
pub fn render_pages(
    doc: &Document,
    style: &ResolvedStyle,
    renderer: LayoutRenderer,
    options: RenderOptions,
) -> Vec<Page> {
    let mut pages = Vec::with_capacity(2);
    if options.include_cover_letter && doc.has_cover_letter() {
        pages.push(Page {
            kind: PageKind::CoverLetter,
            root: page_wrapper(style, "1.5cm", cover_letter::render(doc)),
        });
    }
    pages.push(Page {
        kind: PageKind::Resume,
        root: page_wrapper(style, "0", render_resume_body(doc, style, renderer)),
    });
    pages
}

fn render_resume_body(doc: &Document, style: &ResolvedStyle, renderer: LayoutRenderer) -> Node {
    match renderer {
        LayoutRenderer::Banner { variant } => banner::render(doc, style, variant),
        LayoutRenderer::DualColumn {
            sidebar,
            header_align,
        } => dual_column::render(doc, style, sidebar, header_align),
        LayoutRenderer::Minimalist => minimalist::render(doc, style),
    }
}

fn page_wrapper(style: &ResolvedStyle, padding: &str, body: Node) -> Node {
    el("div")
        .class("resume-page")
        .style("background-color", style.sheet_color.clone())
        .style("color", style.text_color.clone())
        .style("font-family", style.font_stack.clone())
        .style("padding", padding)
        .child(body)
        .into()
}

/// Concatenated markup of all pages.
pub fn pages_html(pages: &[Page]) -> String {
    pages.iter().map(|p| p.root.to_html()).collect()
}

/// Plain-text rendition of all pages, separated by a blank line.
pub fn pages_text(pages: &[Page]) -> String {
    pages
        .iter()
        .map(|p| p.root.to_text())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::select;
    use crate::style::resolve;

    fn pages_for(doc: &Document, options: RenderOptions) -> Vec<Page> {
        render_pages(doc, &resolve(&doc.style), select(&doc.style.layout), options)
    }

    #[test]
    fn test_cover_letter_page_comes_first() {
        let mut doc = Document::default();
        doc.cover_letter = "Dear hiring team".to_string();
        doc.cover_letter_style.font_size = 16;
        let pages = pages_for(&doc, RenderOptions::default());
        let kinds: Vec<_> = pages.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, [PageKind::CoverLetter, PageKind::Resume]);
        assert!(pages[0].root.to_html().contains("font-size: 16pt"));
    }

    #[test]
    fn test_blank_or_excluded_cover_letter_is_omitted() {
        let mut doc = Document::default();
        doc.cover_letter = "  \n ".to_string();
        assert_eq!(pages_for(&doc, RenderOptions::default()).len(), 1);

        doc.cover_letter = "Dear team".to_string();
        let options = RenderOptions {
            include_cover_letter: false,
        };
        assert_eq!(pages_for(&doc, options).len(), 1);
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let doc = Document::default();
        let a = pages_for(&doc, RenderOptions::default());
        let b = pages_for(&doc, RenderOptions::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_layout_renders_entries_in_wrappers() {
        for option in crate::layout::layout_options() {
            let mut doc = Document::default();
            doc.style.layout = option.id.to_string();
            let pages = pages_for(&doc, RenderOptions::default());
            let mut wrapped = Vec::new();
            pages[0].root.find_by_class("item-wrapper", &mut wrapped);
            assert!(!wrapped.is_empty(), "{} has no item wrappers", option.id);
        }
    }

    #[test]
    fn test_unknown_layout_renders_like_banner() {
        let mut doc = Document::default();
        doc.style.layout = "retro-wave".to_string();
        let unknown = pages_html(&pages_for(&doc, RenderOptions::default()));
        doc.style.layout = "creative".to_string();
        let creative = pages_html(&pages_for(&doc, RenderOptions::default()));
        assert_eq!(unknown, creative);
    }

    #[test]
    fn test_empty_contact_not_rendered() {
        let mut doc = Document::default();
        doc.personal.email.value = String::new();
        let html = pages_html(&pages_for(&doc, RenderOptions::default()));
        assert!(!html.contains("mailto:alex.morgan@example.com"));
        assert!(html.contains("tel:+1 555 010 2030"));
    }

    #[test]
    fn test_page_wrapper_carries_sheet_style() {
        let doc = Document::default();
        let html = pages_html(&pages_for(&doc, RenderOptions::default()));
        assert!(html.starts_with(
            "<div class=\"resume-page\" style=\"background-color: #FFFFFF; color: #1F2937; \
             font-family: 'Inter', sans-serif; padding: 0\">"
        ));
    }

    #[test]
    fn test_pages_text_contains_section_titles() {
        let doc = Document::default();
        let text = pages_text(&pages_for(&doc, RenderOptions::default()));
        assert!(text.contains("PROFESSIONAL SUMMARY"));
        assert!(text.contains("- Owned the payments surface end to end"));
    }
}
