//! Style resolution: derives everything renderers need from `StyleSettings`.
//!
//! Pure functions only. Contrast colors, clip rules and alignment are never stored
//! on the document; they are recomputed here on every render.

pub mod themes;

use serde::Serialize;

use crate::document::{HeaderBackgroundType, PictureShape, PicturePosition, StyleSettings};

pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#FFFFFF";
pub const HEADER_IMAGE_OVERLAY: &str = "rgba(0,0,0,0.5)";
/// Identifier of the inline SVG clip path used by the brush picture shape.
pub const BRUSH_CLIP_ID: &str = "brush-stroke-clip";

pub const MIN_PICTURE_SIZE: u32 = 64;
pub const MAX_PICTURE_SIZE: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parses `#rgb` or `#rrggbb` (leading `#` optional, case-insensitive).
pub fn parse_hex(input: &str) -> Option<Rgb> {
    let hex = input.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// Black or white text for the given background.
///
/// Perceived luminance `0.299R + 0.587G + 0.114B` above 186 yields black; 186 and
/// below yields white. Computed in integer thousandths so the boundary is exact.
/// Unparseable input yields black.
pub fn contrast_color(background: &str) -> &'static str {
    match parse_hex(background) {
        Some(Rgb { r, g, b }) => {
            let luminance = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
            if luminance > 186_000 {
                BLACK
            } else {
                WHITE
            }
        }
        None => BLACK,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum ClipRule {
    Round,
    RoundedRect,
    /// References an externally defined clip geometry by id.
    Path(&'static str),
}

impl ClipRule {
    pub fn needs_external_geometry(&self) -> bool {
        matches!(self, ClipRule::Path(_))
    }
}

pub fn clip_rule(shape: PictureShape) -> ClipRule {
    match shape {
        PictureShape::Circle => ClipRule::Round,
        PictureShape::Square => ClipRule::RoundedRect,
        PictureShape::Brush => ClipRule::Path(BRUSH_CLIP_ID),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Start,
    Center,
    End,
}

impl Alignment {
    pub fn justify_class(self) -> &'static str {
        match self {
            Alignment::Start => "justify-start",
            Alignment::Center => "justify-center",
            Alignment::End => "justify-end",
        }
    }
}

pub fn alignment(position: PicturePosition) -> Alignment {
    match position {
        PicturePosition::Left => Alignment::Start,
        PicturePosition::Center => Alignment::Center,
        PicturePosition::Right => Alignment::End,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResolvedHeader {
    Solid {
        color: String,
        text_color: &'static str,
    },
    Image {
        url: String,
        overlay: &'static str,
        text_color: &'static str,
    },
}

impl ResolvedHeader {
    pub fn text_color(&self) -> &'static str {
        match self {
            ResolvedHeader::Solid { text_color, .. } | ResolvedHeader::Image { text_color, .. } => {
                text_color
            }
        }
    }

    /// CSS `background` value for the header bar.
    pub fn background_css(&self) -> String {
        match self {
            ResolvedHeader::Solid { color, .. } => color.clone(),
            ResolvedHeader::Image { url, overlay, .. } => format!(
                "linear-gradient({overlay}, {overlay}), url('{}') center / cover no-repeat",
                css_url(url)
            ),
        }
    }
}

/// Percent-encodes the characters that would end a quoted CSS `url()`.
fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '\'' => out.push_str("%27"),
            '"' => out.push_str("%22"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '\\' => out.push_str("%5C"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

pub fn resolve_header(style: &StyleSettings) -> ResolvedHeader {
    let url = style.header_image_url.trim();
    match style.header_background_type {
        HeaderBackgroundType::Image if !url.is_empty() => ResolvedHeader::Image {
            url: url.to_string(),
            overlay: HEADER_IMAGE_OVERLAY,
            text_color: WHITE,
        },
        _ => ResolvedHeader::Solid {
            color: style.header_color.clone(),
            text_color: contrast_color(&style.header_color),
        },
    }
}

/// Everything a renderer reads about presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub sheet_color: String,
    pub text_color: String,
    pub border_color: String,
    pub section_title_color: String,
    pub skill_background_color: String,
    pub skill_text_color: String,
    pub header: ResolvedHeader,
    /// Text color for a sidebar filled with the header color.
    pub sidebar_text_color: &'static str,
    pub sidebar_color: String,
    pub picture_url: Option<String>,
    pub picture_clip: ClipRule,
    pub picture_alignment: Alignment,
    pub picture_size_px: u32,
    pub font_stack: String,
}

pub fn resolve(style: &StyleSettings) -> ResolvedStyle {
    let picture_url = Some(style.profile_picture_url.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string);

    ResolvedStyle {
        sheet_color: style.sheet_color.clone(),
        text_color: style.text_color.clone(),
        border_color: style.border_color.clone(),
        section_title_color: style.section_title_color.clone(),
        skill_background_color: style.skill_background_color.clone(),
        skill_text_color: if style.skill_text_color.trim().is_empty() {
            contrast_color(&style.skill_background_color).to_string()
        } else {
            style.skill_text_color.clone()
        },
        header: resolve_header(style),
        sidebar_text_color: contrast_color(&style.header_color),
        sidebar_color: style.header_color.clone(),
        picture_url,
        picture_clip: clip_rule(style.profile_picture_shape),
        picture_alignment: alignment(style.profile_picture_position),
        picture_size_px: style
            .profile_picture_size
            .clamp(MIN_PICTURE_SIZE, MAX_PICTURE_SIZE),
        font_stack: font_stack(&style.font_family, "sans-serif"),
    }
}

/// `'Family', fallback`, the quoted form used in inline styles.
pub fn font_stack(family: &str, fallback: &str) -> String {
    let family = family.trim().replace('\'', "");
    if family.is_empty() {
        fallback.to_string()
    } else {
        format!("'{family}', {fallback}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contrast_white_background_gives_black() {
        assert_eq!(contrast_color("#FFFFFF"), BLACK);
        assert_eq!(contrast_color("fff"), BLACK);
    }

    #[test]
    fn test_contrast_dark_background_gives_white() {
        assert_eq!(contrast_color("#1E293B"), WHITE);
        assert_eq!(contrast_color("#000"), WHITE);
    }

    #[test]
    fn test_contrast_boundary_is_exclusive() {
        // 186/186/186 has luminance exactly 186.
        assert_eq!(contrast_color("#BABABA"), WHITE);
        // 187/187/187 is just above.
        assert_eq!(contrast_color("#BBBBBB"), BLACK);
    }

    #[test]
    fn test_contrast_unparseable_falls_back_to_black() {
        assert_eq!(contrast_color(""), BLACK);
        assert_eq!(contrast_color("teal"), BLACK);
        assert_eq!(contrast_color("#12345"), BLACK);
    }

    #[test]
    fn test_parse_hex_expands_short_form() {
        assert_eq!(parse_hex("#0af"), Some(Rgb { r: 0x00, g: 0xAA, b: 0xFF }));
        assert_eq!(parse_hex("0EA5E9"), Some(Rgb { r: 0x0E, g: 0xA5, b: 0xE9 }));
        assert_eq!(parse_hex("#ééé"), None);
    }

    #[test]
    fn test_only_brush_requires_external_geometry() {
        assert!(!clip_rule(PictureShape::Circle).needs_external_geometry());
        assert!(!clip_rule(PictureShape::Square).needs_external_geometry());
        assert_eq!(clip_rule(PictureShape::Brush), ClipRule::Path(BRUSH_CLIP_ID));
    }

    #[test]
    fn test_image_header_uses_overlay_and_white_text() {
        let style = StyleSettings {
            header_background_type: HeaderBackgroundType::Image,
            header_image_url: "https://img.example/x.jpg".to_string(),
            header_color: "#FFFFFF".to_string(),
            ..StyleSettings::default()
        };
        let header = resolve_header(&style);
        assert_eq!(header.text_color(), WHITE);
        assert!(header.background_css().contains(HEADER_IMAGE_OVERLAY));
        assert!(header.background_css().contains("https://img.example/x.jpg"));
    }

    #[test]
    fn test_image_header_url_cannot_break_out_of_css() {
        let header = ResolvedHeader::Image {
            url: "https://img.example/it's (1).jpg".to_string(),
            overlay: HEADER_IMAGE_OVERLAY,
            text_color: WHITE,
        };
        let css = header.background_css();
        assert!(css.contains("url('https://img.example/it%27s %281%29.jpg')"));
        assert_eq!(css.matches('\'').count(), 2);
    }

    #[test]
    fn test_image_header_without_url_degrades_to_solid() {
        let style = StyleSettings {
            header_background_type: HeaderBackgroundType::Image,
            header_image_url: "   ".to_string(),
            header_color: "#FAFAFA".to_string(),
            ..StyleSettings::default()
        };
        assert_eq!(
            resolve_header(&style),
            ResolvedHeader::Solid {
                color: "#FAFAFA".to_string(),
                text_color: BLACK
            }
        );
    }

    #[test]
    fn test_resolve_clamps_picture_size_and_maps_position() {
        let style = StyleSettings {
            profile_picture_size: 999,
            profile_picture_position: PicturePosition::Right,
            ..StyleSettings::default()
        };
        let resolved = resolve(&style);
        assert_eq!(resolved.picture_size_px, MAX_PICTURE_SIZE);
        assert_eq!(resolved.picture_alignment, Alignment::End);
        assert_eq!(resolved.font_stack, "'Inter', sans-serif");
        assert!(resolved.picture_url.is_none());
    }

    #[test]
    fn test_blank_skill_text_color_falls_back_to_contrast() {
        let style = StyleSettings {
            skill_background_color: "#111111".to_string(),
            skill_text_color: String::new(),
            ..StyleSettings::default()
        };
        assert_eq!(resolve(&style).skill_text_color, WHITE);
    }
}
