//! Export pipeline: wraps rendered pages into a standalone HTML artifact.
//!
//! The artifact references its styling and fonts by URL and inlines the brush
//! clip geometry, so it displays the same when opened offline from disk (minus
//! remote fonts). Print and download share one builder and never re-render.

pub mod clipboard;
pub mod handlers;

use serde::Serialize;

use crate::render::{pages_html, Page};
use crate::style::BRUSH_CLIP_ID;

pub const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
pub const GOOGLE_FONTS: &str = "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700\
&family=Roboto+Slab:wght@400;700&family=Lora:ital,wght@0,400;0,700;1,400\
&family=Source+Code+Pro:wght@400;700&display=swap";

pub const CV_PREFIX: &str = "CV";
pub const TRANSLATED_PREFIX: &str = "Resume";

const PAGE_CSS: &str = r#"
        body {
            font-family: 'Inter', sans-serif;
            background-color: #f3f4f6;
            display: flex;
            justify-content: center;
            align-items: flex-start;
            padding: 2rem;
            box-sizing: border-box;
        }
        .font-serif { font-family: 'Lora', serif; }
        .font-slab { font-family: 'Roboto Slab', serif; }
        .font-mono { font-family: 'Source Code Pro', monospace; }
        #page-container { width: 100%; }
        .resume-page {
            box-shadow: 0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1);
            width: 100%;
            max-width: 8.5in;
            min-height: 11in;
            margin: 1rem auto;
            page-break-after: always;
            position: relative;
        }
        @media print {
            body { background-color: white; padding: 0; }
            .resume-page {
                margin: 0;
                box-shadow: none;
                max-width: 100%;
                min-height: 0;
                height: auto;
            }
            .item-wrapper { break-inside: avoid; page-break-inside: avoid; }
            h2, h3, h4 { break-after: avoid; page-break-after: avoid; }
            .resume-page:last-child { page-break-after: auto; }
        }
"#;

/// Brush-stroke outline in object-bounding-box units.
const BRUSH_PATH: &str = "M0.08,0.22 C0.18,0.04 0.42,0.02 0.6,0.05 C0.8,0.08 0.97,0.2 0.96,0.45 \
C0.95,0.68 0.9,0.9 0.66,0.96 C0.44,1.0 0.2,0.95 0.09,0.78 C0.0,0.62 0.0,0.38 0.08,0.22 Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportShape {
    Download,
    /// Same document, opening the print dialog on load.
    Print,
}

#[derive(Debug, Clone)]
pub struct ExportMeta {
    pub prefix: &'static str,
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub file_name: String,
    pub html: String,
}

/// `"{prefix} - {name} - {title}"` with whitespace runs collapsed to `_`.
/// Blank name or title segments are left out.
pub fn artifact_name(prefix: &str, name: &str, title: &str) -> String {
    let stem = [prefix, name, title]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" - ");
    let stem = stem.split_whitespace().collect::<Vec<_>>().join("_");
    // Path separators would escape the download directory.
    let stem = stem.replace(['/', '\\'], "-");
    format!("{stem}.html")
}

pub fn svg_defs() -> String {
    format!(
        "<svg style=\"width:0; height:0; position:absolute;\" aria-hidden=\"true\" focusable=\"false\">\
<defs><clipPath id=\"{BRUSH_CLIP_ID}\" clipPathUnits=\"objectBoundingBox\"><path d=\"{BRUSH_PATH}\"/></clipPath></defs></svg>"
    )
}

pub fn build_artifact(pages: &[Page], meta: &ExportMeta, shape: ExportShape) -> Artifact {
    let file_name = artifact_name(meta.prefix, &meta.name, &meta.title);
    let title = html_escape::encode_text(file_name.trim_end_matches(".html")).into_owned();
    let onload = match shape {
        ExportShape::Download => "",
        ExportShape::Print => " onload=\"window.print()\"",
    };

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{TAILWIND_CDN}"></script>
    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="{fonts}" rel="stylesheet">
    <style>{PAGE_CSS}    </style>
</head>
<body{onload}>
    {defs}
    <div id="page-container">{content}</div>
</body>
</html>
"#,
        fonts = html_escape::encode_double_quoted_attribute(GOOGLE_FONTS),
        defs = svg_defs(),
        content = pages_html(pages),
    );

    Artifact { file_name, html }
}
