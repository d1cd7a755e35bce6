use std::collections::BTreeMap;

use crate::models::element::TextAlign;
use crate::models::style::{LayoutArchetype, StyleConfig, PAGE_HEIGHT, PAGE_MARGIN, PAGE_WIDTH};
use crate::semantic::vocabulary::{SemanticCategory, SemanticTag};
use crate::templates::zones::{
    BandZone, BlockZone, ColumnZone, ContactLayout, ContactZone, Region, SectionsZone,
    TemplateZones, ZoneStyle, ZoneY, DEFAULT_SIDEBAR_CATEGORIES,
};

use super::{order_with, placements};

/// Horizontal padding inside the sidebar band.
pub(crate) const SIDEBAR_PADDING: f32 = 20.0;

/// Gap between the sidebar band and the main column.
pub(crate) const GUTTER: f32 = 30.0;

/// Geometry shared by sidebar layouts: `(band_left, aside, main)`.
pub(crate) fn columns(sidebar_width: f32, right: bool, top: f32) -> (f32, ColumnZone, ColumnZone) {
    let band_left = if right { PAGE_WIDTH - sidebar_width } else { 0.0 };
    let aside = ColumnZone {
        x: band_left + SIDEBAR_PADDING,
        top,
        width: sidebar_width - 2.0 * SIDEBAR_PADDING,
        region: Region::Aside,
    };
    let main_x = if right {
        PAGE_MARGIN
    } else {
        sidebar_width + GUTTER
    };
    let main = ColumnZone {
        x: main_x,
        top,
        width: PAGE_WIDTH - sidebar_width - GUTTER - PAGE_MARGIN,
        region: Region::Main,
    };
    (band_left, aside, main)
}

pub(crate) fn sidebar_band(style: &StyleConfig, left: f32, width: f32) -> BandZone {
    BandZone {
        left,
        top: 0.0,
        width,
        height: PAGE_HEIGHT,
        fill: style.colors.sidebar_background.clone(),
        tag: SemanticTag::SidebarBackground,
    }
}

/// Colored sidebar on the left or right holding contact and short lists.
pub fn zones(style: &StyleConfig, right: bool) -> TemplateZones {
    let sidebar_width = style.layout.sidebar_width();
    let (band_left, aside, main) = columns(sidebar_width, right, PAGE_MARGIN);
    let archetype = if right {
        LayoutArchetype::SidebarRight
    } else {
        LayoutArchetype::SidebarLeft
    };

    TemplateZones {
        archetype,
        header_band: None,
        sidebar: Some(sidebar_band(style, band_left, sidebar_width)),
        accent_bar: None,
        personal: BlockZone {
            x: main.x,
            y: ZoneY::Fixed(PAGE_MARGIN),
            width: main.width,
            region: Region::Main,
            align: TextAlign::Left,
        },
        contact: ContactZone {
            layout: ContactLayout::Stacked,
            region: Region::Aside,
        },
        sections: SectionsZone {
            main,
            aside: Some(aside),
            order: order_with(&[SemanticCategory::Contact]),
            placements: placements(&DEFAULT_SIDEBAR_CATEGORIES, Region::Aside),
            category_overrides: BTreeMap::new(),
        },
        dividers: true,
        region_styles: BTreeMap::from([(
            Region::Aside,
            ZoneStyle::color(&style.colors.sidebar_text),
        )]),
        tag_overrides: BTreeMap::new(),
    }
}
