use std::collections::BTreeMap;

use crate::models::element::TextAlign;
use crate::models::style::{LayoutArchetype, StyleConfig, PAGE_MARGIN, PAGE_WIDTH};
use crate::templates::zones::{
    BlockZone, ColumnZone, ContactLayout, ContactZone, Region, SectionsZone, TemplateZones, ZoneY,
    SECTION_PRIORITY,
};

pub fn zones(_style: &StyleConfig) -> TemplateZones {
    with_margin(LayoutArchetype::SingleColumn, PAGE_MARGIN)
}

/// One full-width column with the personal block and inline contact on top.
pub(crate) fn with_margin(archetype: LayoutArchetype, margin: f32) -> TemplateZones {
    let width = PAGE_WIDTH - 2.0 * margin;
    TemplateZones {
        archetype,
        header_band: None,
        sidebar: None,
        accent_bar: None,
        personal: BlockZone {
            x: margin,
            y: ZoneY::Fixed(margin),
            width,
            region: Region::Main,
            align: TextAlign::Left,
        },
        contact: ContactZone {
            layout: ContactLayout::Inline,
            region: Region::Main,
        },
        sections: SectionsZone {
            main: ColumnZone {
                x: margin,
                top: margin,
                width,
                region: Region::Main,
            },
            aside: None,
            order: SECTION_PRIORITY.to_vec(),
            placements: BTreeMap::new(),
            category_overrides: BTreeMap::new(),
        },
        dividers: true,
        region_styles: BTreeMap::new(),
        tag_overrides: BTreeMap::new(),
    }
}
