//! Minimal element tree for rendered pages.
//!
//! Renderers build `Node`s; export and clipboard serialize them. Text and
//! attribute values are escaped on output, never on construction.

use std::fmt::Write as _;

use serde::Serialize;

const VOID_TAGS: &[&str] = &["img", "br", "hr", "meta", "link"];
const BLOCK_TAGS: &[&str] = &[
    "div", "p", "li", "ul", "h1", "h2", "h3", "h4", "header", "main", "aside", "section",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub styles: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

/// Starts an element.
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        styles: Vec::new(),
        children: Vec::new(),
    }
}

pub fn text(value: impl Into<String>) -> Node {
    Node::Text(value.into())
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, classes: impl Into<String>) -> Self {
        let classes: String = classes.into();
        if classes.trim().is_empty() {
            self
        } else {
            self.attr("class", classes.trim().to_string())
        }
    }

    pub fn style(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.styles.push((property, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Appends a child only when present.
    pub fn child_opt(mut self, node: Option<impl Into<Node>>) -> Self {
        if let Some(node) = node {
            self.children.push(node.into());
        }
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(text(value))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attrs
            .iter()
            .any(|(k, v)| *k == "class" && v.split_whitespace().any(|c| c == class))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(value) => out.push_str(&html_escape::encode_text(value)),
            Node::Element(e) => {
                out.push('<');
                out.push_str(e.tag);
                for (name, value) in &e.attrs {
                    let _ = write!(
                        out,
                        " {name}=\"{}\"",
                        html_escape::encode_double_quoted_attribute(value)
                    );
                }
                if !e.styles.is_empty() {
                    let css = e
                        .styles
                        .iter()
                        .map(|(k, v)| format!("{k}: {v}"))
                        .collect::<Vec<_>>()
                        .join("; ");
                    let _ = write!(
                        out,
                        " style=\"{}\"",
                        html_escape::encode_double_quoted_attribute(&css)
                    );
                }
                out.push('>');
                if VOID_TAGS.contains(&e.tag) {
                    return;
                }
                for child in &e.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", e.tag);
            }
        }
    }

    /// Plain-text rendition: block elements end a line, blank runs collapse.
    pub fn to_text(&self) -> String {
        let mut raw = String::new();
        self.write_text(&mut raw);

        let mut out = String::new();
        let mut blank_run = 0;
        for line in raw.lines().map(|l| l.trim_matches(|c: char| c.is_whitespace())) {
            if line.is_empty() {
                blank_run += 1;
                if blank_run > 1 || out.is_empty() {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            out.push_str(line);
            out.push('\n');
        }
        out.trim_end().to_string()
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Text(value) => out.push_str(value),
            Node::Element(e) => {
                if e.tag == "li" {
                    out.push_str("- ");
                }
                for child in &e.children {
                    child.write_text(out);
                }
                if BLOCK_TAGS.contains(&e.tag) && !out.ends_with('\n') {
                    out.push('\n');
                } else if e.tag == "span" || e.tag == "a" {
                    out.push(' ');
                }
            }
        }
    }

    /// Depth-first search for elements carrying `class`.
    pub fn find_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if let Node::Element(e) = self {
            if e.has_class(class) {
                found.push(e);
            }
            for child in &e.children {
                child.find_by_class(class, found);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html_escapes_text_and_attributes() {
        let node: Node = el("a")
            .attr("href", "mailto:a@b.c?x=\"1\"")
            .text("<Tom & Jerry>")
            .into();
        assert_eq!(
            node.to_html(),
            "<a href=\"mailto:a@b.c?x=&quot;1&quot;\">&lt;Tom &amp; Jerry&gt;</a>"
        );
    }

    #[test]
    fn test_styles_serialize_in_insertion_order() {
        let node: Node = el("div")
            .class("x")
            .style("color", "#000")
            .style("font-size", "11pt")
            .into();
        assert_eq!(
            node.to_html(),
            "<div class=\"x\" style=\"color: #000; font-size: 11pt\"></div>"
        );
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let node: Node = el("img").attr("src", "p.png").into();
        assert_eq!(node.to_html(), "<img src=\"p.png\">");
    }

    #[test]
    fn test_blank_class_is_not_emitted() {
        let node: Node = el("p").class("  ").text("x").into();
        assert_eq!(node.to_html(), "<p>x</p>");
    }

    #[test]
    fn test_to_text_breaks_on_blocks_and_marks_list_items() {
        let node: Node = el("div")
            .child(el("h2").text("SKILLS"))
            .child(el("ul").child(el("li").text("Rust")).child(el("li").text("Go")))
            .child(el("p").text("Done"))
            .into();
        assert_eq!(node.to_text(), "SKILLS\n- Rust\n- Go\nDone");
    }

    #[test]
    fn test_find_by_class_matches_whole_tokens() {
        let node: Node = el("div")
            .child(el("div").class("item-wrapper mb-2"))
            .child(el("div").class("item-wrapper-x"))
            .into();
        let mut found = Vec::new();
        node.find_by_class("item-wrapper", &mut found);
        assert_eq!(found.len(), 1);
    }
}
