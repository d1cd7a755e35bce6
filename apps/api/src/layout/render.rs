//! Forward layout: record + style → positioned, tagged canvas elements.
//!
//! Every archetype goes through `compose`. The archetype only changes the
//! zones handed in; placement order, cursors and background finalization
//! are the same code path for all of them.

use tracing::debug;

use crate::layout::sections::{
    plan_from_record, ContentEntry, LayoutPlan, SectionBody, SectionContent,
};
use crate::layout::writer::{Column, ElementWriter, LINE_GAP};
use crate::models::element::VisualElement;
use crate::models::resume::ResumeRecord;
use crate::models::style::{page_aligned_height, StyleConfig, PAGE_MARGIN};
use crate::semantic::vocabulary::SemanticCategory;
use crate::templates::zones::{generate_zones, ContactLayout, Region, TemplateZones, ZoneY};

/// Space kept below the last line inside a header band.
const HEADER_PADDING: f32 = 20.0;

/// Gap between a header band and the columns under it.
const BAND_GAP: f32 = 24.0;

/// Renders `record` with `style`.
pub fn render(record: &ResumeRecord, style: &StyleConfig) -> Vec<VisualElement> {
    let plan = plan_from_record(record);
    let elements = compose(&plan, style);
    debug!(
        archetype = style.archetype.as_str(),
        elements = elements.len(),
        "rendered record"
    );
    elements
}

fn column_for<'c>(
    region: Region,
    main: &'c mut Column,
    aside: &'c mut Option<Column>,
) -> &'c mut Column {
    match (region, aside.as_mut()) {
        (Region::Aside, Some(column)) => column,
        _ => main,
    }
}

fn emit_category(
    writer: &mut ElementWriter<'_>,
    column: &mut Column,
    plan: &LayoutPlan,
    category: SemanticCategory,
    zones: &TemplateZones,
) {
    if category == SemanticCategory::Contact {
        if zones.contact.layout == ContactLayout::Stacked && !plan.contact.is_empty() {
            let content = SectionContent {
                category,
                header: plan.contact_header.clone(),
                header_group: None,
                body: SectionBody::Entries(vec![ContentEntry {
                    group: None,
                    lines: plan.contact.clone(),
                }]),
            };
            writer.section(column, &content);
        }
        return;
    }
    for content in plan.sections.iter().filter(|s| s.category == category) {
        writer.section(column, content);
    }
}

/// Places a plan into the zones of `style.archetype`.
pub fn compose(plan: &LayoutPlan, style: &StyleConfig) -> Vec<VisualElement> {
    let zones = generate_zones(style);
    let mut writer = ElementWriter::new(&zones, style);

    let sidebar = zones.sidebar.as_ref().map(|band| (writer.band(band), band));
    let header = zones.header_band.as_ref().map(|band| (writer.band(band), band));
    let accent = zones.accent_bar.as_ref().map(|band| (writer.band(band), band));

    let mut main = Column::from_zone(&zones.sections.main);
    let mut aside = zones.sections.aside.as_ref().map(Column::from_zone);

    // Personal block, with inline contact chained below it.
    let personal = &zones.personal;
    let start = match personal.y {
        ZoneY::Fixed(y) => y,
        ZoneY::Auto => column_for(personal.region, &mut main, &mut aside).y,
    };
    let mut block = Column {
        x: personal.x,
        width: personal.width,
        y: start,
        region: personal.region,
    };
    for line in &plan.personal {
        writer.line(&mut block, line, None, personal.align);
    }
    if zones.contact.layout == ContactLayout::Inline {
        // A header lifted from an existing canvas keeps its text above the row.
        if let Some(header) = plan.contact_header.as_ref().filter(|h| h.id.is_some()) {
            block.y += LINE_GAP;
            writer.line(&mut block, header, None, personal.align);
        }
        if !plan.contact.is_empty() {
            block.y += LINE_GAP;
            writer.inline_row(&mut block, &plan.contact, personal.align);
        }
    }

    let order = zones.section_order();

    if let Some((index, band)) = header {
        for category in order
            .iter()
            .copied()
            .filter(|c| zones.placement(*c) == Region::Header)
        {
            emit_category(&mut writer, &mut block, plan, category, &zones);
        }
        let band_bottom = (block.y + HEADER_PADDING).max(band.top + band.height);
        if let Some(rect) = writer.element_mut(index) {
            rect.height = band_bottom - band.top;
        }
        let floor = band_bottom + BAND_GAP;
        main.y = main.y.max(floor);
        if let Some(column) = aside.as_mut() {
            column.y = column.y.max(floor);
        }
    } else {
        let column = column_for(personal.region, &mut main, &mut aside);
        column.y = column.y.max(block.y + style.layout.section_spacing);
    }

    for category in order {
        let region = zones.placement(category);
        if region == Region::Header {
            continue;
        }
        let column = column_for(region, &mut main, &mut aside);
        emit_category(&mut writer, column, plan, category, &zones);
    }

    for element in &plan.carry_over {
        writer.carry_over(&mut main, element.clone());
    }

    // Backgrounds stretch to whole pages past every column cursor.
    let cursor_bottom = aside.as_ref().map_or(main.y, |column| column.y.max(main.y));
    let page_bottom = page_aligned_height(writer.content_bottom().max(cursor_bottom));
    if let Some((index, band)) = sidebar {
        if let Some(rect) = writer.element_mut(index) {
            rect.height = page_bottom - band.top;
        }
    }
    if let Some((index, band)) = accent {
        if let Some(rect) = writer.element_mut(index) {
            rect.height = (page_bottom - band.top - PAGE_MARGIN).max(band.height);
        }
    }

    writer.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;
    use crate::models::resume::Experience;
    use crate::models::style::{LayoutArchetype, PAGE_HEIGHT, PAGE_WIDTH};
    use crate::semantic::vocabulary::SemanticTag;
    use crate::templates::defaults::default_record;

    fn overlaps(a: &VisualElement, b: &VisualElement) -> bool {
        const EPS: f32 = 0.01;
        a.left < b.right() - EPS
            && b.left < a.right() - EPS
            && a.top < b.bottom() - EPS
            && b.top < a.bottom() - EPS
    }

    fn long_record() -> ResumeRecord {
        let mut record = default_record();
        record.experience = (0..12)
            .map(|i| Experience {
                title: format!("Engineer {i}"),
                company: "Initech".to_string(),
                start_date: "2010".to_string(),
                end_date: "2012".to_string(),
                description: vec![
                    "Shipped features across the stack with a focus on reliability".to_string();
                    4
                ],
                ..Default::default()
            })
            .collect();
        record
    }

    #[test]
    fn test_every_element_is_tagged() {
        for archetype in LayoutArchetype::ALL {
            let elements = render(&default_record(), &StyleConfig::for_archetype(archetype));
            assert!(!elements.is_empty());
            for el in &elements {
                assert!(
                    el.semantic_type.is_some(),
                    "{archetype:?}: untagged element {:?}",
                    el.text()
                );
            }
        }
    }

    #[test]
    fn test_text_never_overlaps_within_columns() {
        for archetype in LayoutArchetype::ALL {
            for record in [default_record(), long_record()] {
                let elements = render(&record, &StyleConfig::for_archetype(archetype));
                let texts: Vec<&VisualElement> = elements.iter().filter(|e| e.is_text()).collect();
                for (i, a) in texts.iter().enumerate() {
                    for b in &texts[i + 1..] {
                        assert!(
                            !overlaps(a, b),
                            "{archetype:?}: {:?} overlaps {:?}",
                            a.text(),
                            b.text()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_page_width_is_fixed() {
        for archetype in LayoutArchetype::ALL {
            for el in render(&long_record(), &StyleConfig::for_archetype(archetype)) {
                assert!(
                    el.left >= 0.0 && el.right() <= PAGE_WIDTH + 0.01,
                    "{archetype:?}: {:?} leaves the page horizontally",
                    el.semantic_type
                );
            }
        }
    }

    #[test]
    fn test_entry_groups_are_unique_per_entry() {
        let elements = render(&default_record(), &StyleConfig::default());
        let mut tags_by_group: BTreeMap<String, BTreeSet<SemanticCategory>> = BTreeMap::new();
        for el in &elements {
            if let (Some(group), Some(category)) = (&el.semantic_group, el.category()) {
                tags_by_group.entry(group.clone()).or_default().insert(category);
            }
        }
        assert!(tags_by_group.contains_key("experience_0"));
        assert!(tags_by_group.contains_key("experience_1"));
        assert!(tags_by_group.contains_key("education_0"));
        for (group, categories) in &tags_by_group {
            assert_eq!(categories.len(), 1, "group {group} spans categories");
        }

        let titles = elements
            .iter()
            .filter(|e| e.semantic_type == Some(SemanticTag::ExperienceTitle))
            .filter_map(|e| e.semantic_group.clone())
            .collect::<BTreeSet<_>>();
        assert_eq!(titles.len(), 2, "each experience title has its own group");
    }

    #[test]
    fn test_sidebar_covers_all_content() {
        for archetype in [LayoutArchetype::SidebarLeft, LayoutArchetype::SidebarRight] {
            let elements = render(&long_record(), &StyleConfig::for_archetype(archetype));
            let sidebar = elements
                .iter()
                .find(|e| e.semantic_type == Some(SemanticTag::SidebarBackground))
                .expect("sidebar background");
            let bottom = elements
                .iter()
                .filter(|e| e.is_text())
                .map(VisualElement::bottom)
                .fold(0.0, f32::max);
            assert!(sidebar.bottom() >= bottom, "{archetype:?}: sidebar too short");
            assert!(sidebar.height > PAGE_HEIGHT, "long record spans pages");
            assert_eq!(
                (sidebar.height / PAGE_HEIGHT).fract(),
                0.0,
                "sidebar height is a whole number of pages"
            );
        }
    }

    #[test]
    fn test_sidebar_covers_trailing_section_spacing() {
        let style = StyleConfig::for_archetype(LayoutArchetype::SidebarLeft);
        let template = long_record();
        for count in 0..40 {
            let mut record = template.clone();
            record.experience = template.experience.iter().cloned().cycle().take(count).collect();
            let elements = render(&record, &style);
            let sidebar = elements
                .iter()
                .find(|e| e.semantic_type == Some(SemanticTag::SidebarBackground))
                .expect("sidebar background");
            let bottom = elements
                .iter()
                .filter(|e| e.is_text())
                .map(VisualElement::bottom)
                .fold(0.0, f32::max);
            assert!(
                sidebar.bottom() >= bottom + style.layout.section_spacing,
                "{count} entries: sidebar ends at {} but the last section runs to {}",
                sidebar.bottom(),
                bottom + style.layout.section_spacing
            );
        }
    }

    #[test]
    fn test_sidebar_content_stays_in_band() {
        let elements = render(
            &default_record(),
            &StyleConfig::for_archetype(LayoutArchetype::SidebarLeft),
        );
        let band = elements
            .iter()
            .find(|e| e.semantic_type == Some(SemanticTag::SidebarBackground))
            .expect("sidebar background");
        for el in elements.iter().filter(|e| {
            matches!(
                e.category(),
                Some(SemanticCategory::Skills) | Some(SemanticCategory::Contact)
            )
        }) {
            assert!(
                el.left >= band.left && el.right() <= band.right(),
                "{:?} should sit inside the sidebar",
                el.text()
            );
        }
    }

    #[test]
    fn test_header_band_holds_personal_block() {
        let style = StyleConfig::for_archetype(LayoutArchetype::HeaderTwoColumn);
        let elements = render(&default_record(), &style);
        let band = elements
            .iter()
            .find(|e| e.semantic_type == Some(SemanticTag::HeaderBackground))
            .expect("header band");
        let name = elements
            .iter()
            .find(|e| e.semantic_type == Some(SemanticTag::Name))
            .expect("name");
        assert!(name.bottom() <= band.bottom());
        assert_eq!(
            name.text_props().map(|p| p.fill.as_str()),
            Some(style.colors.sidebar_text.as_str()),
            "header text uses the light role color"
        );
        let experience = elements
            .iter()
            .find(|e| e.semantic_type == Some(SemanticTag::ExperienceSection))
            .expect("experience header");
        assert!(experience.top >= band.bottom());
    }

    #[test]
    fn test_empty_record_renders_only_backgrounds() {
        let elements = render(
            &ResumeRecord::default(),
            &StyleConfig::for_archetype(LayoutArchetype::SidebarLeft),
        );
        assert!(elements.iter().all(|e| !e.is_text()));
        assert_eq!(elements.len(), 1, "just the sidebar background");
    }

    #[test]
    fn test_contact_inline_vs_stacked() {
        let single = render(&default_record(), &StyleConfig::default());
        let emails: Vec<_> = single
            .iter()
            .filter(|e| e.semantic_type == Some(SemanticTag::Email))
            .collect();
        assert_eq!(emails.len(), 1);
        assert!(
            !single
                .iter()
                .any(|e| e.semantic_type == Some(SemanticTag::ContactSection)),
            "inline contact has no header"
        );

        let sidebar = render(
            &default_record(),
            &StyleConfig::for_archetype(LayoutArchetype::SidebarLeft),
        );
        assert!(sidebar
            .iter()
            .any(|e| e.semantic_type == Some(SemanticTag::ContactSection)));
    }
}
