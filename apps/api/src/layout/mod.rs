//! Layout selection: maps the stored layout identifier to one of three
//! structural renderer families plus the variant knobs each family reads.

use serde::Serialize;

// ────────────────────────────────────────────────────────────────────────────
// Families and variants
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutFamily {
    /// Header bar across the page, sidebar + main column below.
    Banner,
    /// Full-height colored aside next to the main column.
    DualColumn,
    /// Single centered column, no sidebar.
    Minimalist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BannerVariant {
    Standard,
    /// Single content column.
    Infographic,
    /// Centered header text and picture.
    Centered,
    /// Picture overlaps the header bar; name block moves into the sidebar.
    Overlap,
}

/// Fraction of the page width taken by the dual-column aside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SidebarWidth {
    Quarter,
    TwoFifths,
    Third,
}

impl SidebarWidth {
    /// Width classes for (aside, main).
    pub fn classes(self) -> (&'static str, &'static str) {
        match self {
            SidebarWidth::Quarter => ("w-1/4", "w-3/4"),
            SidebarWidth::TwoFifths => ("w-2/5", "w-3/5"),
            SidebarWidth::Third => ("w-1/3", "w-2/3"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum LayoutRenderer {
    Banner {
        variant: BannerVariant,
    },
    DualColumn {
        sidebar: SidebarWidth,
        header_align: HeaderAlign,
    },
    Minimalist,
}

impl LayoutRenderer {
    pub fn family(&self) -> LayoutFamily {
        match self {
            LayoutRenderer::Banner { .. } => LayoutFamily::Banner,
            LayoutRenderer::DualColumn { .. } => LayoutFamily::DualColumn,
            LayoutRenderer::Minimalist => LayoutFamily::Minimalist,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Alias table
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LayoutOption {
    pub id: &'static str,
    pub label: &'static str,
    pub family: LayoutFamily,
}

const LAYOUTS: &[LayoutOption] = &[
    LayoutOption { id: "modern", label: "Modern", family: LayoutFamily::DualColumn },
    LayoutOption { id: "executive", label: "Executive", family: LayoutFamily::DualColumn },
    LayoutOption { id: "technical", label: "Technical", family: LayoutFamily::DualColumn },
    LayoutOption { id: "corporate", label: "Corporate", family: LayoutFamily::DualColumn },
    LayoutOption { id: "dual-column", label: "Dual Column", family: LayoutFamily::DualColumn },
    LayoutOption { id: "academic", label: "Academic", family: LayoutFamily::DualColumn },
    LayoutOption { id: "creative", label: "Creative", family: LayoutFamily::Banner },
    LayoutOption { id: "infographic", label: "Infographic", family: LayoutFamily::Banner },
    LayoutOption { id: "centered", label: "Centered", family: LayoutFamily::Banner },
    LayoutOption { id: "banner", label: "Banner", family: LayoutFamily::Banner },
    LayoutOption { id: "minimalist", label: "Minimalist", family: LayoutFamily::Minimalist },
];

/// The closed set of layout identifiers, in display order.
pub fn layout_options() -> &'static [LayoutOption] {
    LAYOUTS
}

/// Resolves an identifier to its renderer. Unknown identifiers fall back to the
/// standard banner layout and are never rejected.
pub fn select(layout_id: &str) -> LayoutRenderer {
    let id = layout_id.trim();
    let family = LAYOUTS
        .iter()
        .find(|o| o.id == id)
        .map(|o| o.family)
        .unwrap_or(LayoutFamily::Banner);

    match family {
        LayoutFamily::Minimalist => LayoutRenderer::Minimalist,
        LayoutFamily::DualColumn => LayoutRenderer::DualColumn {
            sidebar: match id {
                "modern" => SidebarWidth::Quarter,
                "corporate" => SidebarWidth::TwoFifths,
                _ => SidebarWidth::Third,
            },
            header_align: match id {
                "modern" | "technical" => HeaderAlign::Left,
                _ => HeaderAlign::Center,
            },
        },
        LayoutFamily::Banner => LayoutRenderer::Banner {
            variant: match id {
                "infographic" => BannerVariant::Infographic,
                "centered" => BannerVariant::Centered,
                "banner" => BannerVariant::Overlap,
                _ => BannerVariant::Standard,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_id_maps_to_its_family() {
        for option in layout_options() {
            assert_eq!(select(option.id).family(), option.family, "{}", option.id);
        }
    }

    #[test]
    fn test_unknown_and_empty_ids_fall_back_to_standard_banner() {
        for id in ["", "retro-wave", "MODERN"] {
            assert_eq!(
                select(id),
                LayoutRenderer::Banner {
                    variant: BannerVariant::Standard
                },
                "{id:?}"
            );
        }
    }

    #[test]
    fn test_dual_column_widths_and_alignment() {
        assert_eq!(
            select("modern"),
            LayoutRenderer::DualColumn {
                sidebar: SidebarWidth::Quarter,
                header_align: HeaderAlign::Left
            }
        );
        assert_eq!(
            select("corporate"),
            LayoutRenderer::DualColumn {
                sidebar: SidebarWidth::TwoFifths,
                header_align: HeaderAlign::Center
            }
        );
        assert_eq!(
            select("technical"),
            LayoutRenderer::DualColumn {
                sidebar: SidebarWidth::Third,
                header_align: HeaderAlign::Left
            }
        );
    }

    #[test]
    fn test_banner_variants() {
        assert_eq!(
            select("infographic"),
            LayoutRenderer::Banner { variant: BannerVariant::Infographic }
        );
        assert_eq!(
            select("banner"),
            LayoutRenderer::Banner { variant: BannerVariant::Overlap }
        );
        assert_eq!(
            select("creative"),
            LayoutRenderer::Banner { variant: BannerVariant::Standard }
        );
    }

    #[test]
    fn test_option_ids_are_unique() {
        let mut ids: Vec<_> = layout_options().iter().map(|o| o.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), layout_options().len());
    }
}
