//! Style schema: palette, fonts, size scale, page geometry and per-archetype layout constants.

use serde::{Deserialize, Serialize};

use crate::semantic::vocabulary::SemanticCategory;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// A4 at 96 dpi. Width is fixed; documents only grow downwards.
pub const PAGE_WIDTH: f32 = 794.0;
pub const PAGE_HEIGHT: f32 = 1123.0;
pub const PAGE_MARGIN: f32 = 40.0;

/// Rounds a content extent up to a whole number of pages (at least one).
pub fn page_aligned_height(content_bottom: f32) -> f32 {
    let pages = (content_bottom / PAGE_HEIGHT).ceil().max(1.0);
    pages * PAGE_HEIGHT
}

// ────────────────────────────────────────────────────────────────────────────
// Archetypes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutArchetype {
    #[default]
    SingleColumn,
    SidebarLeft,
    SidebarRight,
    HeaderTwoColumn,
    Minimal,
    ModernSplit,
    /// Interprets `StyleConfig::dynamic` instead of a hardcoded column table.
    Dynamic,
}

impl LayoutArchetype {
    pub const ALL: [LayoutArchetype; 7] = [
        LayoutArchetype::SingleColumn,
        LayoutArchetype::SidebarLeft,
        LayoutArchetype::SidebarRight,
        LayoutArchetype::HeaderTwoColumn,
        LayoutArchetype::Minimal,
        LayoutArchetype::ModernSplit,
        LayoutArchetype::Dynamic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutArchetype::SingleColumn => "single-column",
            LayoutArchetype::SidebarLeft => "sidebar-left",
            LayoutArchetype::SidebarRight => "sidebar-right",
            LayoutArchetype::HeaderTwoColumn => "header-two-column",
            LayoutArchetype::Minimal => "minimal",
            LayoutArchetype::ModernSplit => "modern-split",
            LayoutArchetype::Dynamic => "dynamic",
        }
    }

    pub fn parse(raw: &str) -> Option<LayoutArchetype> {
        LayoutArchetype::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Style config
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    #[serde(default)]
    pub archetype: LayoutArchetype,
    #[serde(default)]
    pub colors: ColorScheme,
    #[serde(default)]
    pub fonts: FontConfig,
    #[serde(default)]
    pub font_sizes: FontSizeScale,
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Section placements, read only by the dynamic archetype.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<DynamicLayout>,
}

/// Eight named color roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub text_light: String,
    pub background: String,
    pub sidebar_background: String,
    pub sidebar_text: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            primary: "#1f3a5f".to_string(),
            secondary: "#4a6fa5".to_string(),
            accent: "#e07a5f".to_string(),
            text: "#222222".to_string(),
            text_light: "#666666".to_string(),
            background: "#ffffff".to_string(),
            sidebar_background: "#1f3a5f".to_string(),
            sidebar_text: "#ffffff".to_string(),
        }
    }
}

impl ColorScheme {
    /// Role colors in a fixed order, used to remap palettes element by element.
    pub fn roles(&self) -> [&str; 8] {
        [
            &self.primary,
            &self.secondary,
            &self.accent,
            &self.text,
            &self.text_light,
            &self.background,
            &self.sidebar_background,
            &self.sidebar_text,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontConfig {
    pub heading: String,
    pub body: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            heading: "Helvetica".to_string(),
            body: "Helvetica".to_string(),
        }
    }
}

/// Six named sizes, in px.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontSizeScale {
    pub name: f32,
    pub title: f32,
    pub section_header: f32,
    pub item_title: f32,
    pub body: f32,
    pub small: f32,
}

impl Default for FontSizeScale {
    fn default() -> Self {
        Self {
            name: 28.0,
            title: 16.0,
            section_header: 14.0,
            item_title: 12.5,
            body: 11.0,
            small: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub header_height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_width: Option<f32>,
    pub section_spacing: f32,
    pub line_height: f32,
    pub item_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_height: 140.0,
            sidebar_width: None,
            section_spacing: 18.0,
            line_height: 1.3,
            item_spacing: 10.0,
        }
    }
}

pub const DEFAULT_SIDEBAR_WIDTH: f32 = 250.0;

impl LayoutConfig {
    pub fn sidebar_width(&self) -> f32 {
        self.sidebar_width
            .filter(|w| *w >= 120.0 && *w <= PAGE_WIDTH / 2.0)
            .unwrap_or(DEFAULT_SIDEBAR_WIDTH)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dynamic layout
// ────────────────────────────────────────────────────────────────────────────

/// Zones a dynamic section can be placed in. Declaration order is render order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PlacementZone {
    Header,
    Sidebar,
    #[default]
    Main,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarSide {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPlacement {
    pub section: SemanticCategory,
    #[serde(default)]
    pub zone: PlacementZone,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DynamicLayout {
    pub sidebar_side: SidebarSide,
    pub sections: Vec<SectionPlacement>,
}

impl Default for DynamicLayout {
    fn default() -> Self {
        let place = |section, zone, order| SectionPlacement {
            section,
            zone,
            order,
        };
        Self {
            sidebar_side: SidebarSide::Left,
            sections: vec![
                place(SemanticCategory::Contact, PlacementZone::Sidebar, 0),
                place(SemanticCategory::Skills, PlacementZone::Sidebar, 1),
                place(SemanticCategory::Languages, PlacementZone::Sidebar, 2),
                place(SemanticCategory::Interests, PlacementZone::Sidebar, 3),
                place(SemanticCategory::Summary, PlacementZone::Main, 0),
                place(SemanticCategory::Experience, PlacementZone::Main, 1),
                place(SemanticCategory::Education, PlacementZone::Main, 2),
                place(SemanticCategory::Projects, PlacementZone::Main, 3),
                place(SemanticCategory::Certifications, PlacementZone::Main, 4),
                place(SemanticCategory::Custom, PlacementZone::Main, 5),
            ],
        }
    }
}

impl DynamicLayout {
    /// Placements sorted by `(zone, order)`; duplicate sections keep their first slot.
    pub fn sorted(&self) -> Vec<SectionPlacement> {
        let mut seen = Vec::new();
        let mut placements: Vec<SectionPlacement> = self
            .sections
            .iter()
            .filter(|p| {
                if seen.contains(&p.section) {
                    false
                } else {
                    seen.push(p.section);
                    true
                }
            })
            .cloned()
            .collect();
        placements.sort_by_key(|p| (p.zone, p.order));
        placements
    }

    pub fn has_zone(&self, zone: PlacementZone) -> bool {
        self.sections.iter().any(|p| p.zone == zone)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Defaults per archetype
// ────────────────────────────────────────────────────────────────────────────

impl StyleConfig {
    /// The canonical style for an archetype, before any palette/font preset.
    pub fn for_archetype(archetype: LayoutArchetype) -> Self {
        let mut layout = LayoutConfig::default();
        let mut font_sizes = FontSizeScale::default();
        match archetype {
            LayoutArchetype::SidebarLeft | LayoutArchetype::SidebarRight => {
                layout.sidebar_width = Some(DEFAULT_SIDEBAR_WIDTH);
            }
            LayoutArchetype::HeaderTwoColumn => {
                layout.header_height = 150.0;
            }
            LayoutArchetype::Minimal => {
                layout.section_spacing = 24.0;
                font_sizes.name = 26.0;
                font_sizes.section_header = 12.0;
            }
            LayoutArchetype::ModernSplit => {
                layout.sidebar_width = Some(230.0);
            }
            LayoutArchetype::Dynamic => {
                layout.sidebar_width = Some(DEFAULT_SIDEBAR_WIDTH);
            }
            LayoutArchetype::SingleColumn => {}
        }
        Self {
            archetype,
            colors: ColorScheme::default(),
            fonts: FontConfig::default(),
            font_sizes,
            layout,
            dynamic: (archetype == LayoutArchetype::Dynamic).then(DynamicLayout::default),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig::for_archetype(LayoutArchetype::SingleColumn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_aligned_height_rounds_up() {
        assert_eq!(page_aligned_height(0.0), PAGE_HEIGHT);
        assert_eq!(page_aligned_height(PAGE_HEIGHT), PAGE_HEIGHT);
        assert_eq!(page_aligned_height(PAGE_HEIGHT + 1.0), PAGE_HEIGHT * 2.0);
    }

    #[test]
    fn test_archetype_parse_kebab_case() {
        assert_eq!(
            LayoutArchetype::parse("sidebar-left"),
            Some(LayoutArchetype::SidebarLeft)
        );
        assert_eq!(LayoutArchetype::parse("nope"), None);
        let json = serde_json::to_string(&LayoutArchetype::HeaderTwoColumn).unwrap();
        assert_eq!(json, "\"header-two-column\"");
    }

    #[test]
    fn test_partial_style_fills_defaults() {
        let style: StyleConfig =
            serde_json::from_str(r##"{"archetype": "minimal", "colors": {"primary": "#000"}}"##)
                .unwrap();
        assert_eq!(style.archetype, LayoutArchetype::Minimal);
        assert_eq!(style.colors.primary, "#000");
        assert_eq!(style.colors.text, ColorScheme::default().text);
        assert_eq!(style.font_sizes.body, 11.0);
    }

    #[test]
    fn test_sidebar_width_is_clamped_to_default() {
        let mut layout = LayoutConfig::default();
        assert_eq!(layout.sidebar_width(), DEFAULT_SIDEBAR_WIDTH);
        layout.sidebar_width = Some(10.0);
        assert_eq!(layout.sidebar_width(), DEFAULT_SIDEBAR_WIDTH);
        layout.sidebar_width = Some(200.0);
        assert_eq!(layout.sidebar_width(), 200.0);
    }

    #[test]
    fn test_dynamic_sorted_by_zone_then_order() {
        let layout = DynamicLayout {
            sidebar_side: SidebarSide::Left,
            sections: vec![
                SectionPlacement {
                    section: SemanticCategory::Experience,
                    zone: PlacementZone::Main,
                    order: 1,
                },
                SectionPlacement {
                    section: SemanticCategory::Skills,
                    zone: PlacementZone::Sidebar,
                    order: 5,
                },
                SectionPlacement {
                    section: SemanticCategory::Summary,
                    zone: PlacementZone::Main,
                    order: 0,
                },
                SectionPlacement {
                    section: SemanticCategory::Summary,
                    zone: PlacementZone::Sidebar,
                    order: 0,
                },
            ],
        };
        let sorted: Vec<_> = layout.sorted().iter().map(|p| p.section).collect();
        assert_eq!(
            sorted,
            vec![
                SemanticCategory::Skills,
                SemanticCategory::Summary,
                SemanticCategory::Experience
            ]
        );
    }
}
