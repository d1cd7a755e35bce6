//! Declarative layout: zones come from a list of `(section, zone, order)`
//! placements instead of a fixed table.

use std::collections::BTreeMap;

use crate::models::element::TextAlign;
use crate::models::style::{
    LayoutArchetype, PlacementZone, SidebarSide, StyleConfig, PAGE_MARGIN, PAGE_WIDTH,
};
use crate::semantic::vocabulary::{SemanticCategory, SemanticTag};
use crate::templates::zones::{
    BandZone, BlockZone, ColumnZone, ContactLayout, ContactZone, Region, SectionsZone,
    TemplateZones, ZoneStyle, ZoneY,
};

use super::sidebar;

const HEADER_GAP: f32 = 24.0;

fn region_for(zone: PlacementZone) -> Region {
    match zone {
        PlacementZone::Header => Region::Header,
        PlacementZone::Sidebar => Region::Aside,
        PlacementZone::Main => Region::Main,
    }
}

pub fn zones(style: &StyleConfig) -> TemplateZones {
    let layout = style.dynamic.clone().unwrap_or_default();
    let placements = layout.sorted();
    let has_header = layout.has_zone(PlacementZone::Header);
    let has_sidebar = layout.has_zone(PlacementZone::Sidebar);

    let top = if has_header {
        style.layout.header_height + HEADER_GAP
    } else {
        PAGE_MARGIN
    };

    let (sidebar_band, aside, main) = if has_sidebar {
        let width = style.layout.sidebar_width();
        let right = layout.sidebar_side == SidebarSide::Right;
        let (band_left, aside, main) = sidebar::columns(width, right, top);
        (
            Some(sidebar::sidebar_band(style, band_left, width)),
            Some(aside),
            main,
        )
    } else {
        let main = ColumnZone {
            x: PAGE_MARGIN,
            top,
            width: PAGE_WIDTH - 2.0 * PAGE_MARGIN,
            region: Region::Main,
        };
        (None, None, main)
    };

    let header_band = has_header.then(|| BandZone {
        left: 0.0,
        top: 0.0,
        width: PAGE_WIDTH,
        height: style.layout.header_height,
        fill: style.colors.primary.clone(),
        tag: SemanticTag::HeaderBackground,
    });

    let personal = if has_header {
        BlockZone {
            x: PAGE_MARGIN,
            y: ZoneY::Fixed(32.0),
            width: PAGE_WIDTH - 2.0 * PAGE_MARGIN,
            region: Region::Header,
            align: TextAlign::Left,
        }
    } else {
        BlockZone {
            x: main.x,
            y: ZoneY::Fixed(PAGE_MARGIN),
            width: main.width,
            region: Region::Main,
            align: TextAlign::Left,
        }
    };

    let contact_in_sidebar = has_sidebar
        && placements
            .iter()
            .any(|p| p.section == SemanticCategory::Contact && p.zone == PlacementZone::Sidebar);
    let contact = if contact_in_sidebar {
        ContactZone {
            layout: ContactLayout::Stacked,
            region: Region::Aside,
        }
    } else {
        ContactZone {
            layout: ContactLayout::Inline,
            region: personal.region,
        }
    };

    let order: Vec<SemanticCategory> = placements
        .iter()
        .map(|p| p.section)
        .filter(|c| *c != SemanticCategory::Contact || contact_in_sidebar)
        .collect();
    let placement_map: BTreeMap<SemanticCategory, Region> = placements
        .iter()
        .map(|p| (p.section, region_for(p.zone)))
        .collect();

    let mut region_styles = BTreeMap::new();
    if has_sidebar {
        region_styles.insert(Region::Aside, ZoneStyle::color(&style.colors.sidebar_text));
    }
    if has_header {
        region_styles.insert(Region::Header, ZoneStyle::color(&style.colors.sidebar_text));
    }

    TemplateZones {
        archetype: LayoutArchetype::Dynamic,
        header_band,
        sidebar: sidebar_band,
        accent_bar: None,
        personal,
        contact,
        sections: SectionsZone {
            main,
            aside,
            order,
            placements: placement_map,
            category_overrides: BTreeMap::new(),
        },
        dividers: true,
        region_styles,
        tag_overrides: BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::style::{DynamicLayout, SectionPlacement};

    fn place(section: SemanticCategory, zone: PlacementZone, order: u32) -> SectionPlacement {
        SectionPlacement {
            section,
            zone,
            order,
        }
    }

    #[test]
    fn test_default_dynamic_has_left_sidebar() {
        let zones = zones(&StyleConfig::for_archetype(LayoutArchetype::Dynamic));
        assert!(zones.sidebar.is_some());
        assert_eq!(zones.contact.layout, ContactLayout::Stacked);
        assert_eq!(zones.placement(SemanticCategory::Skills), Region::Aside);
        assert_eq!(zones.placement(SemanticCategory::Experience), Region::Main);
    }

    #[test]
    fn test_main_only_layout_is_single_column() {
        let mut style = StyleConfig::for_archetype(LayoutArchetype::Dynamic);
        style.dynamic = Some(DynamicLayout {
            sidebar_side: SidebarSide::Right,
            sections: vec![
                place(SemanticCategory::Experience, PlacementZone::Main, 0),
                place(SemanticCategory::Contact, PlacementZone::Sidebar, 0),
            ],
        });
        // Contact asks for the sidebar, so the sidebar exists.
        let with_sidebar = zones(&style);
        assert!(with_sidebar.sections.aside.is_some());

        style.dynamic = Some(DynamicLayout {
            sidebar_side: SidebarSide::Left,
            sections: vec![place(SemanticCategory::Experience, PlacementZone::Main, 0)],
        });
        let single = zones(&style);
        assert!(single.sections.aside.is_none());
        assert_eq!(single.contact.layout, ContactLayout::Inline);
        assert_eq!(single.sections.order, vec![SemanticCategory::Experience]);
    }

    #[test]
    fn test_header_placement_adds_band() {
        let mut style = StyleConfig::for_archetype(LayoutArchetype::Dynamic);
        style.dynamic = Some(DynamicLayout {
            sidebar_side: SidebarSide::Left,
            sections: vec![
                place(SemanticCategory::Summary, PlacementZone::Header, 0),
                place(SemanticCategory::Experience, PlacementZone::Main, 0),
            ],
        });
        let zones = zones(&style);
        assert!(zones.header_band.is_some());
        assert_eq!(zones.personal.region, Region::Header);
        assert_eq!(zones.placement(SemanticCategory::Summary), Region::Header);
        assert!(zones.sections.main.top > style.layout.header_height);
    }
}
