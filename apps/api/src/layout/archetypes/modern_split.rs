use std::collections::BTreeMap;

use crate::models::element::TextAlign;
use crate::models::style::{LayoutArchetype, StyleConfig, PAGE_HEIGHT, PAGE_MARGIN, PAGE_WIDTH};
use crate::semantic::vocabulary::{SemanticCategory, SemanticTag};
use crate::templates::zones::{
    BandZone, BlockZone, ColumnZone, ContactLayout, ContactZone, Region, SectionsZone,
    TemplateZones, ZoneStyle, ZoneY,
};

use super::{order_with, placements};

const GUTTER: f32 = 30.0;
const ACCENT_WIDTH: f32 = 3.0;
const DEFAULT_ASIDE_WIDTH: f32 = 230.0;

const ASIDE_CATEGORIES: [SemanticCategory; 5] = [
    SemanticCategory::Contact,
    SemanticCategory::Skills,
    SemanticCategory::Languages,
    SemanticCategory::Education,
    SemanticCategory::Interests,
];

/// Narrow left column with the personal block, a vertical accent bar, and a
/// wide main column. No background fill behind the aside.
pub fn zones(style: &StyleConfig) -> TemplateZones {
    let aside_width = match style.layout.sidebar_width {
        Some(_) => style.layout.sidebar_width(),
        None => DEFAULT_ASIDE_WIDTH,
    };
    let main_x = PAGE_MARGIN + aside_width + GUTTER;

    let mut category_overrides = BTreeMap::new();
    category_overrides.insert(
        SemanticCategory::Skills,
        ZoneStyle::color(&style.colors.secondary),
    );

    TemplateZones {
        archetype: LayoutArchetype::ModernSplit,
        header_band: None,
        sidebar: None,
        accent_bar: Some(BandZone {
            left: main_x - GUTTER / 2.0 - ACCENT_WIDTH / 2.0,
            top: PAGE_MARGIN,
            width: ACCENT_WIDTH,
            height: PAGE_HEIGHT - 2.0 * PAGE_MARGIN,
            fill: style.colors.accent.clone(),
            tag: SemanticTag::AccentBar,
        }),
        personal: BlockZone {
            x: PAGE_MARGIN,
            y: ZoneY::Fixed(PAGE_MARGIN),
            width: aside_width,
            region: Region::Aside,
            align: TextAlign::Left,
        },
        contact: ContactZone {
            layout: ContactLayout::Stacked,
            region: Region::Aside,
        },
        sections: SectionsZone {
            main: ColumnZone {
                x: main_x,
                top: PAGE_MARGIN,
                width: PAGE_WIDTH - PAGE_MARGIN - main_x,
                region: Region::Main,
            },
            aside: Some(ColumnZone {
                x: PAGE_MARGIN,
                top: PAGE_MARGIN,
                width: aside_width,
                region: Region::Aside,
            }),
            order: order_with(&[SemanticCategory::Contact]),
            placements: placements(&ASIDE_CATEGORIES, Region::Aside),
            category_overrides,
        },
        dividers: true,
        region_styles: BTreeMap::new(),
        tag_overrides: BTreeMap::new(),
    }
}
