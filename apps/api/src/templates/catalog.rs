//! Named template presets: palettes, font pairings, size presets and layouts.
//!
//! A template is picked by combining one name from each table. Any part left
//! out falls back to the catalog default.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::style::{ColorScheme, FontConfig, FontSizeScale, LayoutArchetype, StyleConfig};

/// Names a template by its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateRef {
    pub layout: Option<String>,
    pub palette: Option<String>,
    pub fonts: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub name: &'static str,
    pub colors: ColorScheme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontCombo {
    pub name: &'static str,
    pub fonts: FontConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizePreset {
    pub name: &'static str,
    pub sizes: FontSizeScale,
    pub line_height: f32,
    pub section_spacing: f32,
}

/// The `GET /api/v1/templates` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogListing<'a> {
    pub default_layout: &'static str,
    pub layouts: Vec<&'static str>,
    pub palettes: &'a [Palette],
    pub fonts: &'a [FontCombo],
    pub sizes: &'a [SizePreset],
}

#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    default_layout: LayoutArchetype,
    palettes: Vec<Palette>,
    fonts: Vec<FontCombo>,
    sizes: Vec<SizePreset>,
}

fn scheme(roles: [&str; 8]) -> ColorScheme {
    let [primary, secondary, accent, text, text_light, background, sidebar_background, sidebar_text] =
        roles.map(str::to_string);
    ColorScheme {
        primary,
        secondary,
        accent,
        text,
        text_light,
        background,
        sidebar_background,
        sidebar_text,
    }
}

fn combo(name: &'static str, heading: &str, body: &str) -> FontCombo {
    FontCombo {
        name,
        fonts: FontConfig {
            heading: heading.to_string(),
            body: body.to_string(),
        },
    }
}

fn builtin_palettes() -> Vec<Palette> {
    vec![
        Palette {
            name: "navy",
            colors: ColorScheme::default(),
        },
        Palette {
            name: "charcoal",
            colors: scheme([
                "#2b2b2b", "#555555", "#c0392b", "#1e1e1e", "#6b6b6b", "#ffffff", "#2b2b2b",
                "#f5f5f5",
            ]),
        },
        Palette {
            name: "forest",
            colors: scheme([
                "#2f5d50", "#5b8a72", "#d9a441", "#1f2a26", "#5f6b66", "#ffffff", "#e8efe9",
                "#1f2a26",
            ]),
        },
        Palette {
            name: "burgundy",
            colors: scheme([
                "#7a1f3d", "#a34a64", "#c9a227", "#2a1f22", "#6e5f63", "#fffdfa", "#7a1f3d",
                "#fff5f7",
            ]),
        },
        Palette {
            name: "slate",
            colors: scheme([
                "#334155", "#64748b", "#0ea5e9", "#0f172a", "#64748b", "#ffffff", "#f1f5f9",
                "#0f172a",
            ]),
        },
    ]
}

fn builtin_fonts() -> Vec<FontCombo> {
    vec![
        combo("classic", "Helvetica", "Helvetica"),
        combo("modern", "Montserrat", "Open Sans"),
        combo("serif", "Georgia", "Georgia"),
        combo("editorial", "Playfair Display", "Lato"),
        combo("technical", "Roboto", "Roboto"),
    ]
}

fn builtin_sizes() -> Vec<SizePreset> {
    let standard = FontSizeScale::default();
    vec![
        SizePreset {
            name: "compact",
            sizes: FontSizeScale {
                name: 24.0,
                title: 14.0,
                section_header: 12.5,
                item_title: 11.5,
                body: 10.0,
                small: 9.0,
            },
            line_height: 1.2,
            section_spacing: 14.0,
        },
        SizePreset {
            name: "standard",
            sizes: standard,
            line_height: 1.3,
            section_spacing: 18.0,
        },
        SizePreset {
            name: "large",
            sizes: FontSizeScale {
                name: 32.0,
                title: 18.0,
                section_header: 15.0,
                item_title: 13.5,
                body: 12.0,
                small: 10.5,
            },
            line_height: 1.4,
            section_spacing: 22.0,
        },
    ]
}

fn find<'a, T>(
    items: &'a [T],
    name: &str,
    kind: &str,
    key: impl Fn(&T) -> &str,
) -> Result<&'a T, AppError> {
    items
        .iter()
        .find(|item| key(item).eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| AppError::NotFound(format!("Unknown {kind} '{name}'")))
}

impl TemplateCatalog {
    pub fn new(default_layout: LayoutArchetype) -> Self {
        TemplateCatalog {
            default_layout,
            palettes: builtin_palettes(),
            fonts: builtin_fonts(),
            sizes: builtin_sizes(),
        }
    }

    /// Builds the style a template names. Unknown names are `NotFound`.
    pub fn resolve(&self, template: &TemplateRef) -> Result<StyleConfig, AppError> {
        let archetype = match &template.layout {
            Some(name) => LayoutArchetype::parse(name)
                .ok_or_else(|| AppError::NotFound(format!("Unknown layout '{name}'")))?,
            None => self.default_layout,
        };
        let mut style = StyleConfig::for_archetype(archetype);

        if let Some(name) = &template.palette {
            style.colors = find(&self.palettes, name, "palette", |p| p.name)?.colors.clone();
        }
        if let Some(name) = &template.fonts {
            style.fonts = find(&self.fonts, name, "font combo", |f| f.name)?.fonts.clone();
        }
        if let Some(name) = &template.size {
            let preset = find(&self.sizes, name, "size preset", |s| s.name)?;
            // Archetypes with their own name/header sizes keep them.
            let archetype_sizes = style.font_sizes.clone();
            style.font_sizes = preset.sizes.clone();
            if archetype == LayoutArchetype::Minimal {
                style.font_sizes.name = archetype_sizes.name.min(preset.sizes.name);
                style.font_sizes.section_header =
                    archetype_sizes.section_header.min(preset.sizes.section_header);
            }
            style.layout.line_height = preset.line_height;
            style.layout.section_spacing = style.layout.section_spacing.max(preset.section_spacing);
        }

        debug!(layout = archetype.as_str(), ?template, "resolved template");
        Ok(style)
    }

    pub fn listing(&self) -> CatalogListing<'_> {
        CatalogListing {
            default_layout: self.default_layout.as_str(),
            layouts: LayoutArchetype::ALL.iter().map(|a| a.as_str()).collect(),
            palettes: &self.palettes,
            fonts: &self.fonts,
            sizes: &self.sizes,
        }
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        TemplateCatalog::new(LayoutArchetype::SingleColumn)
    }
}
