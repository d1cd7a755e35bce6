use std::collections::BTreeMap;

use crate::models::element::TextAlign;
use crate::models::style::{LayoutArchetype, StyleConfig, PAGE_MARGIN, PAGE_WIDTH};
use crate::semantic::vocabulary::{SemanticCategory, SemanticTag};
use crate::templates::zones::{
    BandZone, BlockZone, ColumnZone, ContactLayout, ContactZone, Region, SectionsZone,
    TemplateZones, ZoneStyle, ZoneY, SECTION_PRIORITY,
};

use super::placements;

const LEFT_WIDTH: f32 = 440.0;
const COLUMN_GAP: f32 = 24.0;

/// Right-hand column contents.
const RIGHT_CATEGORIES: [SemanticCategory; 5] = [
    SemanticCategory::Education,
    SemanticCategory::Skills,
    SemanticCategory::Languages,
    SemanticCategory::Certifications,
    SemanticCategory::Interests,
];

/// Full-width colored header band over two uneven columns.
pub fn zones(style: &StyleConfig) -> TemplateZones {
    let band_height = style.layout.header_height;
    let columns_top = band_height + COLUMN_GAP;
    let right_x = PAGE_MARGIN + LEFT_WIDTH + COLUMN_GAP;

    TemplateZones {
        archetype: LayoutArchetype::HeaderTwoColumn,
        header_band: Some(BandZone {
            left: 0.0,
            top: 0.0,
            width: PAGE_WIDTH,
            height: band_height,
            fill: style.colors.primary.clone(),
            tag: SemanticTag::HeaderBackground,
        }),
        sidebar: None,
        accent_bar: None,
        personal: BlockZone {
            x: PAGE_MARGIN,
            y: ZoneY::Fixed(32.0),
            width: PAGE_WIDTH - 2.0 * PAGE_MARGIN,
            region: Region::Header,
            align: TextAlign::Left,
        },
        contact: ContactZone {
            layout: ContactLayout::Inline,
            region: Region::Header,
        },
        sections: SectionsZone {
            main: ColumnZone {
                x: PAGE_MARGIN,
                top: columns_top,
                width: LEFT_WIDTH,
                region: Region::Main,
            },
            aside: Some(ColumnZone {
                x: right_x,
                top: columns_top,
                width: PAGE_WIDTH - PAGE_MARGIN - right_x,
                region: Region::Aside,
            }),
            order: SECTION_PRIORITY.to_vec(),
            placements: placements(&RIGHT_CATEGORIES, Region::Aside),
            category_overrides: BTreeMap::new(),
        },
        dividers: true,
        region_styles: BTreeMap::from([(
            Region::Header,
            ZoneStyle::color(&style.colors.sidebar_text),
        )]),
        tag_overrides: BTreeMap::new(),
    }
}
