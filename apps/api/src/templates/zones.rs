//! Template zones: where each block of a resume goes and how it is styled.
//!
//! A `TemplateZones` value is pure geometry plus style overrides, derived
//! from a `StyleConfig` by the archetype's zone builder. Both the forward
//! renderer and the template switcher read placement and styling from here,
//! so an element rendered fresh and an element re-flowed by a switch land in
//! the same spot with the same look.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::layout::archetypes;
use crate::models::element::TextAlign;
use crate::models::style::{LayoutArchetype, StyleConfig};
use crate::semantic::vocabulary::{SemanticCategory, SemanticTag};

/// Letter spacing applied to section headers, in 1/1000 em.
pub const SECTION_HEADER_SPACING: f32 = 30.0;

/// Render order for record sections when a layout does not say otherwise.
pub const SECTION_PRIORITY: [SemanticCategory; 17] = [
    SemanticCategory::Summary,
    SemanticCategory::Experience,
    SemanticCategory::Education,
    SemanticCategory::Projects,
    SemanticCategory::Skills,
    SemanticCategory::Certifications,
    SemanticCategory::Languages,
    SemanticCategory::Interests,
    SemanticCategory::Awards,
    SemanticCategory::Publications,
    SemanticCategory::Volunteer,
    SemanticCategory::Courses,
    SemanticCategory::Achievements,
    SemanticCategory::Memberships,
    SemanticCategory::References,
    SemanticCategory::Additional,
    SemanticCategory::Custom,
];

/// Categories that sidebar layouts move into the aside column.
pub const DEFAULT_SIDEBAR_CATEGORIES: [SemanticCategory; 4] = [
    SemanticCategory::Contact,
    SemanticCategory::Skills,
    SemanticCategory::Languages,
    SemanticCategory::Interests,
];

// ────────────────────────────────────────────────────────────────────────────
// Zone types
// ────────────────────────────────────────────────────────────────────────────

/// Which band of the page a block renders into. Drives region colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Header,
    Aside,
    Main,
}

/// A full-bleed background shape (header band, sidebar, accent bar).
///
/// `height` is a minimum; the final height is settled after content is placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandZone {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub fill: String,
    pub tag: SemanticTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ZoneY {
    Fixed(f32),
    /// Continue from the bottom of whatever the region already holds.
    Auto,
}

/// A block with its own origin, used for the personal header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockZone {
    pub x: f32,
    pub y: ZoneY,
    pub width: f32,
    pub region: Region,
    pub align: TextAlign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactLayout {
    /// One row of fields under the personal block, wrapping as needed.
    Inline,
    /// A headed section with one field per line.
    Stacked,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactZone {
    pub layout: ContactLayout,
    pub region: Region,
}

/// A vertical column with its own cursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnZone {
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub region: Region,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionsZone {
    pub main: ColumnZone,
    pub aside: Option<ColumnZone>,
    /// Render order. Categories missing here are appended in priority order.
    pub order: Vec<SemanticCategory>,
    /// Section → region table. Missing categories go to `Main`.
    pub placements: BTreeMap<SemanticCategory, Region>,
    pub category_overrides: BTreeMap<SemanticCategory, ZoneStyle>,
}

/// Optional style fields. `None` leaves the lower layer's value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_spacing: Option<f32>,
}

impl ZoneStyle {
    pub fn color(color: &str) -> Self {
        ZoneStyle {
            color: Some(color.to_string()),
            ..Default::default()
        }
    }

    fn apply(&self, target: &mut ElementStyle) {
        if let Some(size) = self.font_size {
            target.font_size = size;
        }
        if let Some(bold) = self.bold {
            target.bold = bold;
        }
        if let Some(color) = &self.color {
            target.color = color.clone();
        }
        if let Some(family) = &self.font_family {
            target.font_family = family.clone();
        }
        if let Some(spacing) = self.char_spacing {
            target.char_spacing = spacing;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateZones {
    pub archetype: LayoutArchetype,
    pub header_band: Option<BandZone>,
    pub sidebar: Option<BandZone>,
    pub accent_bar: Option<BandZone>,
    pub personal: BlockZone,
    pub contact: ContactZone,
    pub sections: SectionsZone,
    /// Draw a rule under section headers outside the header band.
    pub dividers: bool,
    pub region_styles: BTreeMap<Region, ZoneStyle>,
    pub tag_overrides: BTreeMap<SemanticTag, ZoneStyle>,
}

impl TemplateZones {
    /// Region a section renders into, falling back to `Main` when the layout
    /// has no column for the requested region.
    pub fn placement(&self, category: SemanticCategory) -> Region {
        match self.sections.placements.get(&category) {
            Some(Region::Aside) if self.sections.aside.is_some() => Region::Aside,
            Some(Region::Header) if self.header_band.is_some() => Region::Header,
            _ => Region::Main,
        }
    }

    /// Full render order: the layout's own order, then every other category
    /// by priority. A stacked contact block always has a slot.
    pub fn section_order(&self) -> Vec<SemanticCategory> {
        let mut order = self.sections.order.clone();
        if self.contact.layout == ContactLayout::Stacked
            && !order.contains(&SemanticCategory::Contact)
        {
            order.insert(0, SemanticCategory::Contact);
        }
        for category in SECTION_PRIORITY {
            if !order.contains(&category) {
                order.push(category);
            }
        }
        order
    }
}

/// Builds the zones for `style.archetype`.
pub fn generate_zones(style: &StyleConfig) -> TemplateZones {
    match style.archetype {
        LayoutArchetype::SingleColumn => archetypes::single_column::zones(style),
        LayoutArchetype::SidebarLeft => archetypes::sidebar::zones(style, false),
        LayoutArchetype::SidebarRight => archetypes::sidebar::zones(style, true),
        LayoutArchetype::HeaderTwoColumn => archetypes::header_two_column::zones(style),
        LayoutArchetype::Minimal => archetypes::minimal::zones(style),
        LayoutArchetype::ModernSplit => archetypes::modern_split::zones(style),
        LayoutArchetype::Dynamic => archetypes::dynamic::zones(style),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Style resolution
// ────────────────────────────────────────────────────────────────────────────

/// Concrete text style for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    pub font_size: f32,
    pub bold: bool,
    pub color: String,
    pub font_family: String,
    pub line_height: f32,
    pub char_spacing: f32,
}

/// Item titles: the bold first line of a repeatable entry.
pub fn is_item_title(tag: SemanticTag) -> bool {
    matches!(
        tag,
        SemanticTag::ExperienceTitle
            | SemanticTag::EducationDegree
            | SemanticTag::CertificationName
            | SemanticTag::ProjectName
            | SemanticTag::AwardTitle
            | SemanticTag::PublicationTitle
            | SemanticTag::VolunteerRole
            | SemanticTag::CourseName
            | SemanticTag::ReferenceName
            | SemanticTag::MembershipOrganization
            | SemanticTag::CustomTitle
    )
}

/// Secondary lines naming who or where (company, institution, issuer).
pub fn is_item_subtitle(tag: SemanticTag) -> bool {
    matches!(
        tag,
        SemanticTag::ExperienceCompany
            | SemanticTag::EducationInstitution
            | SemanticTag::CertificationIssuer
            | SemanticTag::AwardIssuer
            | SemanticTag::PublicationPublisher
            | SemanticTag::VolunteerOrganization
            | SemanticTag::CourseProvider
            | SemanticTag::ReferenceCompany
            | SemanticTag::CustomSubtitle
    )
}

pub fn is_date_tag(tag: SemanticTag) -> bool {
    let key = tag.as_str();
    key.ends_with("_date") && tag != SemanticTag::DateOfBirth
}

/// Resolves the style for `tag` rendered in `region`.
///
/// Layers, later wins: category base, tag role, zone tag override, region
/// style, zone category override.
pub fn resolve_element_style(
    tag: SemanticTag,
    region: Region,
    zones: &TemplateZones,
    style: &StyleConfig,
) -> ElementStyle {
    let colors = &style.colors;
    let sizes = &style.font_sizes;
    let category = tag.category();

    let mut resolved = match category {
        SemanticCategory::Personal => ElementStyle {
            font_size: sizes.body,
            bold: false,
            color: colors.text.clone(),
            font_family: style.fonts.heading.clone(),
            line_height: style.layout.line_height,
            char_spacing: 0.0,
        },
        SemanticCategory::Contact => ElementStyle {
            font_size: sizes.small,
            bold: false,
            color: colors.text_light.clone(),
            font_family: style.fonts.body.clone(),
            line_height: style.layout.line_height,
            char_spacing: 0.0,
        },
        _ => ElementStyle {
            font_size: sizes.body,
            bold: false,
            color: colors.text.clone(),
            font_family: style.fonts.body.clone(),
            line_height: style.layout.line_height,
            char_spacing: 0.0,
        },
    };

    let role = if tag == SemanticTag::Name {
        ZoneStyle {
            font_size: Some(sizes.name),
            bold: Some(true),
            color: Some(colors.primary.clone()),
            ..Default::default()
        }
    } else if matches!(
        tag,
        SemanticTag::Title | SemanticTag::Headline | SemanticTag::Tagline
    ) {
        ZoneStyle {
            font_size: Some(sizes.title),
            color: Some(colors.secondary.clone()),
            ..Default::default()
        }
    } else if tag.is_section_header() {
        ZoneStyle {
            font_size: Some(sizes.section_header),
            bold: Some(true),
            color: Some(colors.primary.clone()),
            font_family: Some(style.fonts.heading.clone()),
            char_spacing: Some(SECTION_HEADER_SPACING),
        }
    } else if is_item_title(tag) {
        ZoneStyle {
            font_size: Some(sizes.item_title),
            bold: Some(true),
            font_family: Some(style.fonts.heading.clone()),
            ..Default::default()
        }
    } else if is_item_subtitle(tag) {
        ZoneStyle::color(&colors.secondary)
    } else if is_date_tag(tag) {
        ZoneStyle {
            font_size: Some(sizes.small),
            color: Some(colors.text_light.clone()),
            ..Default::default()
        }
    } else {
        ZoneStyle::default()
    };
    role.apply(&mut resolved);

    if let Some(over) = zones.tag_overrides.get(&tag) {
        over.apply(&mut resolved);
    }
    if let Some(over) = zones.region_styles.get(&region) {
        over.apply(&mut resolved);
    }
    if let Some(over) = zones.sections.category_overrides.get(&category) {
        over.apply(&mut resolved);
    }
    resolved
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
