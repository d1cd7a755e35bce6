//! Template switching: re-flow existing tagged content into a new layout.
//!
//! The old geometry is discarded and a fresh collection is built; the input
//! is never mutated. Element ids, text and entry groups carry over, styling
//! and positions come from the target zones.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::extract::sections::reading_order;
use crate::layout::render::{compose, render};
use crate::layout::sections::{
    header_line, ContentEntry, ContentLine, LayoutPlan, SectionBody, SectionContent,
};
use crate::models::element::VisualElement;
use crate::models::style::StyleConfig;
use crate::semantic::vocabulary::{SemanticCategory, SemanticTag};
use crate::templates::defaults::default_record;

/// Splits one category's elements into entries by group, in reading order.
///
/// Grouped elements gather under the first position their group appears at.
/// Consecutive ungrouped elements form one entry of their own.
fn entries_by_group(elements: &[&VisualElement]) -> Vec<ContentEntry> {
    let mut entries: Vec<ContentEntry> = Vec::new();
    let mut slot_of_group: BTreeMap<String, usize> = BTreeMap::new();
    let mut open_ungrouped: Option<usize> = None;

    for element in elements {
        let Some(line) = ContentLine::from_element(element) else {
            continue;
        };
        match &element.semantic_group {
            Some(group) => {
                open_ungrouped = None;
                let slot = *slot_of_group.entry(group.clone()).or_insert_with(|| {
                    entries.push(ContentEntry {
                        group: Some(group.clone()),
                        lines: Vec::new(),
                    });
                    entries.len() - 1
                });
                entries[slot].lines.push(line);
            }
            None => {
                let slot = *open_ungrouped.get_or_insert_with(|| {
                    entries.push(ContentEntry {
                        group: None,
                        lines: Vec::new(),
                    });
                    entries.len() - 1
                });
                entries[slot].lines.push(line);
            }
        }
    }
    entries
}

fn section_from_elements(
    category: SemanticCategory,
    elements: &[&VisualElement],
) -> SectionContent {
    let header_pos = elements
        .iter()
        .position(|e| e.semantic_type.is_some_and(SemanticTag::is_section_header));
    let header = header_pos.and_then(|pos| ContentLine::from_element(elements[pos]));
    let header_group = header_pos.and_then(|pos| elements[pos].semantic_group.clone());
    let rest: Vec<&VisualElement> = elements
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != header_pos)
        .map(|(_, e)| *e)
        .collect();

    SectionContent {
        category,
        header: header.or_else(|| header_line(category)),
        header_group,
        body: SectionBody::Entries(entries_by_group(&rest)),
    }
}

/// Builds a layout plan from existing elements.
fn plan_from_elements(elements: &[VisualElement]) -> LayoutPlan {
    // Text in reading order, then any tagged shapes in document order.
    let mut ordered: Vec<&VisualElement> = reading_order(elements)
        .into_iter()
        .map(|p| &elements[p.index])
        .collect();
    ordered.extend(elements.iter().filter(|e| !e.is_text()));

    let mut by_category: BTreeMap<SemanticCategory, Vec<&VisualElement>> = BTreeMap::new();
    let mut plan = LayoutPlan::default();

    for element in ordered {
        let Some(tag) = element.semantic_type else {
            continue;
        };
        if tag.is_decoration() {
            continue;
        }
        let category = tag.category();
        if category == SemanticCategory::Custom || !element.is_text() {
            plan.carry_over.push(element.clone());
            continue;
        }
        by_category.entry(category).or_default().push(element);
    }

    if let Some(personal) = by_category.remove(&SemanticCategory::Personal) {
        let mut lines: Vec<ContentLine> =
            personal.iter().filter_map(|e| ContentLine::from_element(e)).collect();
        // Name leads the block regardless of where it sat before.
        lines.sort_by_key(|line| line.tag != SemanticTag::Name);
        plan.personal = lines;
    }

    plan.contact_header = header_line(SemanticCategory::Contact);
    if let Some(contact) = by_category.remove(&SemanticCategory::Contact) {
        for element in contact {
            let Some(line) = ContentLine::from_element(element) else {
                continue;
            };
            if line.tag == SemanticTag::ContactSection {
                plan.contact_header = Some(line);
            } else {
                plan.contact.push(line);
            }
        }
    }

    plan.sections = by_category
        .into_iter()
        .map(|(category, elements)| section_from_elements(category, &elements))
        .collect();
    plan
}

/// Re-flows `elements` into the layout described by `target`.
///
/// Untagged elements and old decorations are dropped. A canvas with no
/// tagged content gets the default sample resume.
pub fn switch_template(elements: &[VisualElement], target: &StyleConfig) -> Vec<VisualElement> {
    let tagged = elements
        .iter()
        .filter(|e| e.semantic_type.is_some_and(|t| !t.is_decoration()))
        .count();
    if tagged == 0 {
        warn!(
            archetype = target.archetype.as_str(),
            input = elements.len(),
            "no tagged content, rendering default template content"
        );
        return render(&default_record(), target);
    }

    let plan = plan_from_elements(elements);
    let switched = compose(&plan, target);
    debug!(
        archetype = target.archetype.as_str(),
        input = elements.len(),
        kept = tagged,
        output = switched.len(),
        "switched template"
    );
    switched
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;
    use crate::models::element::{FontWeight, TextAlign, TextProps};
    use crate::models::style::LayoutArchetype;

    fn texts_by_id(elements: &[VisualElement]) -> HashMap<String, (Option<SemanticTag>, String)> {
        elements
            .iter()
            .filter_map(|e| {
                e.text()
                    .map(|t| (e.id.clone(), (e.semantic_type, t.to_string())))
            })
            .collect()
    }

    #[test]
    fn test_switch_preserves_ids_text_and_groups() {
        for from in [LayoutArchetype::SingleColumn, LayoutArchetype::SidebarLeft] {
            let source = render(&default_record(), &StyleConfig::for_archetype(from));
            for archetype in LayoutArchetype::ALL {
                let switched = switch_template(&source, &StyleConfig::for_archetype(archetype));
                let after = texts_by_id(&switched);
                for el in source.iter().filter(|e| e.is_text()) {
                    let (tag, text) = after.get(&el.id).unwrap_or_else(|| {
                        panic!("{from:?} -> {archetype:?} lost {:?}", el.text())
                    });
                    assert_eq!(*tag, el.semantic_type);
                    assert_eq!(Some(text.as_str()), el.text());
                }
                for el in &switched {
                    if let Some(original) = source.iter().find(|s| s.id == el.id) {
                        assert_eq!(el.semantic_group, original.semantic_group, "group kept");
                    }
                }
            }
        }
    }

    #[test]
    fn test_stacked_contact_header_survives_inline_target() {
        let source = render(
            &default_record(),
            &StyleConfig::for_archetype(LayoutArchetype::SidebarLeft),
        );
        let header = source
            .iter()
            .find(|e| e.semantic_type == Some(SemanticTag::ContactSection))
            .expect("sidebar renders a contact header");

        let switched = switch_template(
            &source,
            &StyleConfig::for_archetype(LayoutArchetype::SingleColumn),
        );
        let kept = switched
            .iter()
            .find(|e| e.id == header.id)
            .expect("contact header kept after switching to inline contact");
        assert_eq!(kept.text(), header.text());

        let first_field = switched
            .iter()
            .filter(|e| e.category() == Some(SemanticCategory::Contact) && e.id != header.id)
            .map(|e| e.top)
            .fold(f32::INFINITY, f32::min);
        assert!(kept.top < first_field, "header sits above the inline row");
    }

    #[test]
    fn test_switch_drops_untagged_and_regenerates_decorations() {
        let mut source = render(
            &default_record(),
            &StyleConfig::for_archetype(LayoutArchetype::SidebarLeft),
        );
        let stray = VisualElement::new_text(
            TextProps {
                text: "scribble".to_string(),
                font_size: 10.0,
                font_weight: FontWeight::Normal,
                fill: "#000".to_string(),
                font_family: "Helvetica".to_string(),
                line_height: 1.2,
                char_spacing: 0.0,
                text_align: TextAlign::Left,
            },
            500.0,
            900.0,
            100.0,
            14.0,
        );
        source.push(stray);

        let old_decorations: HashSet<String> = source
            .iter()
            .filter(|e| e.semantic_type.is_some_and(SemanticTag::is_decoration))
            .map(|e| e.id.clone())
            .collect();

        let switched =
            switch_template(&source, &StyleConfig::for_archetype(LayoutArchetype::SingleColumn));
        assert!(switched.iter().all(|e| e.text() != Some("scribble")));
        assert!(switched.iter().all(|e| !old_decorations.contains(&e.id)));
        assert!(
            !switched
                .iter()
                .any(|e| e.semantic_type == Some(SemanticTag::SidebarBackground)),
            "single column has no sidebar"
        );
    }

    #[test]
    fn test_switch_to_sidebar_moves_skills_aside() {
        let source = render(&default_record(), &StyleConfig::default());
        let switched =
            switch_template(&source, &StyleConfig::for_archetype(LayoutArchetype::SidebarRight));
        let band = switched
            .iter()
            .find(|e| e.semantic_type == Some(SemanticTag::SidebarBackground))
            .expect("sidebar band");
        let skills = switched
            .iter()
            .find(|e| e.semantic_type == Some(SemanticTag::SkillList))
            .expect("skill list carried over");
        assert!(skills.left >= band.left);
    }

    #[test]
    fn test_switch_does_not_mutate_input() {
        let source = render(&default_record(), &StyleConfig::default());
        let before = source.clone();
        let _ = switch_template(&source, &StyleConfig::for_archetype(LayoutArchetype::Minimal));
        assert_eq!(source, before);
    }

    #[test]
    fn test_empty_canvas_gets_default_content() {
        let switched = switch_template(&[], &StyleConfig::default());
        assert!(switched
            .iter()
            .any(|e| e.semantic_type == Some(SemanticTag::Name)));
    }

    #[test]
    fn test_custom_elements_carry_over_with_own_style() {
        let mut source = render(&default_record(), &StyleConfig::default());
        let note = VisualElement::new_text(
            TextProps {
                text: "References available on request".to_string(),
                font_size: 9.0,
                font_weight: FontWeight::Normal,
                fill: "#abcdef".to_string(),
                font_family: "Georgia".to_string(),
                line_height: 1.2,
                char_spacing: 0.0,
                text_align: TextAlign::Center,
            },
            40.0,
            1000.0,
            300.0,
            14.0,
        )
        .with_tag(SemanticTag::CustomText);
        let id = note.id.clone();
        source.push(note);

        let switched =
            switch_template(&source, &StyleConfig::for_archetype(LayoutArchetype::ModernSplit));
        let carried = switched.iter().find(|e| e.id == id).expect("carried over");
        let props = carried.text_props().expect("text");
        assert_eq!(props.fill, "#abcdef");
        assert_eq!(props.font_family, "Georgia");
    }
}
