// Formatting applier: in-place style edits on an existing canvas.
// Positions (left/top) are never touched here; only reorder moves elements.

pub mod reorder;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::font_metrics::estimate_height;
use crate::models::element::{ElementKind, FontWeight, VisualElement};
use crate::models::style::ColorScheme;
use crate::semantic::inference::infer_tag;
use crate::semantic::vocabulary::{SemanticCategory, SemanticTag};

pub use reorder::reorder_sections;

/// A partial style edit. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleDelta {
    /// Categories to touch; empty means every text element.
    pub categories: Vec<SemanticCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_spacing: Option<f32>,
}

impl StyleDelta {
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.font_family.is_none()
            && self.font_size.is_none()
            && self.font_weight.is_none()
            && self.line_height.is_none()
            && self.char_spacing.is_none()
    }
}

/// Category from the tag, or inferred from the element as it is now.
fn live_category(element: &VisualElement) -> Option<SemanticCategory> {
    element
        .semantic_type
        .or_else(|| infer_tag(element))
        .map(SemanticTag::category)
}

fn replace<T: PartialEq + Clone>(slot: &mut T, value: &Option<T>) -> bool {
    match value {
        Some(v) if slot != v => {
            *slot = v.clone();
            true
        }
        _ => false,
    }
}

/// Applies `delta` to every matching element. Returns how many changed.
///
/// Text heights are re-estimated after a change. Shapes are recolored only
/// when their category is named explicitly in `delta.categories`.
pub fn apply_style_delta(elements: &mut [VisualElement], delta: &StyleDelta) -> usize {
    if delta.is_empty() {
        return 0;
    }
    let mut changed = 0;

    for element in elements.iter_mut() {
        let category = live_category(element);
        let targeted = match category {
            Some(c) => delta.categories.is_empty() || delta.categories.contains(&c),
            None => delta.categories.is_empty(),
        };
        if !targeted {
            continue;
        }

        let width = element.width;
        match &mut element.kind {
            ElementKind::Text(props) => {
                let mut touched = replace(&mut props.fill, &delta.color);
                touched |= replace(&mut props.font_family, &delta.font_family);
                touched |= replace(&mut props.font_size, &delta.font_size);
                touched |= replace(&mut props.font_weight, &delta.font_weight);
                touched |= replace(&mut props.line_height, &delta.line_height);
                touched |= replace(&mut props.char_spacing, &delta.char_spacing);
                if touched {
                    element.height = estimate_height(
                        &props.text,
                        props.font_size,
                        props.line_height,
                        width,
                        props.font_weight.is_bold(),
                    );
                    changed += 1;
                }
            }
            ElementKind::Rect(shape) | ElementKind::Circle(shape) => {
                let named = category.is_some_and(|c| delta.categories.contains(&c));
                if named && replace(&mut shape.fill, &delta.color) {
                    changed += 1;
                }
            }
        }
    }

    debug!(changed, categories = delta.categories.len(), "applied style delta");
    changed
}

// ────────────────────────────────────────────────────────────────────────────
// Palette swap
// ────────────────────────────────────────────────────────────────────────────

/// Role a background shape is known to use, for palettes sharing colors.
fn preferred_role(tag: Option<SemanticTag>) -> Option<usize> {
    match tag {
        Some(SemanticTag::HeaderBackground) => Some(0),
        Some(SemanticTag::AccentBar) => Some(2),
        Some(SemanticTag::SidebarBackground) => Some(6),
        _ => None,
    }
}

fn remap(color: &mut String, from: &[&str; 8], to: &[&str; 8], preferred: Option<usize>) -> bool {
    let current = color.as_str();
    let matches = |i: usize| from[i].eq_ignore_ascii_case(current);
    let role = preferred
        .filter(|i| matches(*i))
        .or_else(|| (0..from.len()).find(|i| matches(*i)));
    match role {
        Some(i) if !to[i].eq_ignore_ascii_case(current) => {
            *color = to[i].to_string();
            true
        }
        _ => false,
    }
}

/// Swaps every role color of `from` for the same role in `to`.
pub fn apply_palette(
    elements: &mut [VisualElement],
    from: &ColorScheme,
    to: &ColorScheme,
) -> usize {
    let (from, to) = (from.roles(), to.roles());
    let mut changed = 0;
    for element in elements.iter_mut() {
        let preferred = preferred_role(element.semantic_type);
        let touched = match &mut element.kind {
            ElementKind::Text(props) => remap(&mut props.fill, &from, &to, None),
            ElementKind::Rect(shape) | ElementKind::Circle(shape) => {
                let mut touched = remap(&mut shape.fill, &from, &to, preferred);
                if let Some(stroke) = shape.stroke.as_mut() {
                    touched |= remap(stroke, &from, &to, preferred);
                }
                touched
            }
        };
        if touched {
            changed += 1;
        }
    }
    debug!(changed, "applied palette");
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::render::render;
    use crate::models::style::{LayoutArchetype, StyleConfig};
    use crate::templates::defaults::default_record;

    fn positions(elements: &[VisualElement]) -> Vec<(String, f32, f32)> {
        elements
            .iter()
            .map(|e| (e.id.clone(), e.left, e.top))
            .collect()
    }

    #[test]
    fn test_style_delta_never_moves_elements() {
        let mut elements = render(
            &default_record(),
            &StyleConfig::for_archetype(LayoutArchetype::SidebarLeft),
        );
        let before = positions(&elements);
        let delta = StyleDelta {
            font_size: Some(16.0),
            font_family: Some("Georgia".to_string()),
            line_height: Some(1.6),
            ..Default::default()
        };
        let changed = apply_style_delta(&mut elements, &delta);
        assert!(changed > 0);
        assert_eq!(positions(&elements), before, "left/top must be untouched");
    }

    #[test]
    fn test_style_delta_filters_by_category() {
        let mut elements = render(&default_record(), &StyleConfig::default());
        let delta = StyleDelta {
            categories: vec![SemanticCategory::Experience],
            color: Some("#ff0000".to_string()),
            ..Default::default()
        };
        apply_style_delta(&mut elements, &delta);
        for el in elements.iter().filter(|e| e.is_text()) {
            let red = el.text_props().map(|p| p.fill.as_str()) == Some("#ff0000");
            assert_eq!(
                red,
                el.category() == Some(SemanticCategory::Experience),
                "{:?} recolored wrongly",
                el.text()
            );
        }
    }

    #[test]
    fn test_style_delta_recomputes_text_height() {
        let mut elements = render(&default_record(), &StyleConfig::default());
        let summary_before = elements
            .iter()
            .find(|e| e.semantic_type == Some(SemanticTag::Summary))
            .map(|e| e.height)
            .expect("summary");
        let delta = StyleDelta {
            categories: vec![SemanticCategory::Summary],
            font_size: Some(18.0),
            ..Default::default()
        };
        apply_style_delta(&mut elements, &delta);
        let summary_after = elements
            .iter()
            .find(|e| e.semantic_type == Some(SemanticTag::Summary))
            .map(|e| e.height)
            .expect("summary");
        assert!(summary_after > summary_before);
    }

    #[test]
    fn test_shapes_change_only_when_named() {
        let mut elements = render(
            &default_record(),
            &StyleConfig::for_archetype(LayoutArchetype::SidebarLeft),
        );
        let sidebar_fill = |els: &[VisualElement]| {
            els.iter()
                .find(|e| e.semantic_type == Some(SemanticTag::SidebarBackground))
                .and_then(|e| match &e.kind {
                    ElementKind::Rect(shape) => Some(shape.fill.clone()),
                    _ => None,
                })
        };
        let original = sidebar_fill(&elements);

        apply_style_delta(
            &mut elements,
            &StyleDelta {
                color: Some("#00ff00".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(sidebar_fill(&elements), original, "unnamed shapes keep their fill");

        apply_style_delta(
            &mut elements,
            &StyleDelta {
                categories: vec![SemanticCategory::Layout],
                color: Some("#00ff00".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(sidebar_fill(&elements).as_deref(), Some("#00ff00"));
    }

    #[test]
    fn test_empty_delta_changes_nothing() {
        let mut elements = render(&default_record(), &StyleConfig::default());
        let before = elements.clone();
        assert_eq!(apply_style_delta(&mut elements, &StyleDelta::default()), 0);
        assert_eq!(elements, before);
    }

    #[test]
    fn test_palette_swap_remaps_roles() {
        let style = StyleConfig::for_archetype(LayoutArchetype::SidebarLeft);
        let mut elements = render(&default_record(), &style);
        let to = ColorScheme {
            primary: "#7a1f1f".to_string(),
            sidebar_background: "#2d2d2d".to_string(),
            text: "#101010".to_string(),
            ..ColorScheme::default()
        };
        let changed = apply_palette(&mut elements, &style.colors, &to);
        assert!(changed > 0);

        let sidebar = elements
            .iter()
            .find(|e| e.semantic_type == Some(SemanticTag::SidebarBackground))
            .expect("sidebar");
        match &sidebar.kind {
            ElementKind::Rect(shape) => assert_eq!(
                shape.fill, "#2d2d2d",
                "shared colors resolve by the background's own role"
            ),
            other => panic!("expected rect, got {other:?}"),
        }
        assert!(elements
            .iter()
            .filter_map(|e| e.text_props())
            .all(|p| !p.fill.eq_ignore_ascii_case(&style.colors.text)));
    }
}
