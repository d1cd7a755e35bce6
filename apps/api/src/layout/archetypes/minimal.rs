use crate::models::element::TextAlign;
use crate::models::style::{LayoutArchetype, StyleConfig};
use crate::semantic::vocabulary::SemanticCategory;
use crate::templates::zones::{TemplateZones, ZoneStyle};

use super::single_column;

const MINIMAL_MARGIN: f32 = 60.0;

/// Single column with wider margins, a centered header, no rules and muted
/// section headers.
pub fn zones(style: &StyleConfig) -> TemplateZones {
    let mut zones = single_column::with_margin(LayoutArchetype::Minimal, MINIMAL_MARGIN);
    zones.personal.align = TextAlign::Center;
    zones.dividers = false;

    let muted = ZoneStyle {
        color: Some(style.colors.text_light.clone()),
        char_spacing: Some(80.0),
        ..Default::default()
    };
    for tag in SemanticCategory::ALL
        .into_iter()
        .filter_map(SemanticCategory::section_tag)
    {
        zones.tag_overrides.insert(tag, muted.clone());
    }
    zones
}
