//! Page fill analysis and pagination over a flat element collection.
//!
//! Renderers lay everything out on one tall canvas. This module measures how
//! that canvas falls onto A4 pages and splits it into the persisted
//! `{ pages }` document shape (and back).
//!
//! # Fill rules
//! - Last page under 75% used   → too much whitespace, loosen spacing
//! - Spill onto a new page ≤ 5% → minor overflow, tighten spacing to drop the page
//! - Otherwise                  → acceptable

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::element::{Document, Page, VisualElement, PAGE_FORMAT_VERSION};
use crate::models::style::{PAGE_HEIGHT, PAGE_MARGIN};

/// Below this share of the last page's usable height, the page looks empty.
const MIN_LAST_PAGE_FILL: f32 = 0.75;

/// A spill this small onto an extra page can be pulled back by tightening.
const MINOR_OVERFLOW_FRACTION: f32 = 0.05;

/// Suffix for the extra pieces of a shape sliced at a page boundary.
const SLICE_SUFFIX: &str = "-p";

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageFillVerdict {
    /// No text on the canvas.
    Empty,
    Acceptable,
    /// The last page is mostly blank.
    TooMuchWhitespace,
    /// A few lines spill onto an otherwise empty page.
    MinorOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FillAction {
    NoAction,
    TightenSpacing,
    LoosenSpacing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFillAnalysis {
    /// Bottom edge of the lowest text element.
    pub content_bottom: f32,
    pub pages_used: usize,
    /// Used share of the last page's usable height, 0..=1.
    pub last_page_fill: f32,
    /// Text elements that cross a page boundary.
    pub straddling: usize,
    pub verdict: PageFillVerdict,
    pub action: FillAction,
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis
// ────────────────────────────────────────────────────────────────────────────

fn usable_height() -> f32 {
    PAGE_HEIGHT - 2.0 * PAGE_MARGIN
}

fn page_of(y: f32) -> usize {
    (y.max(0.0) / PAGE_HEIGHT).floor() as usize
}

fn crosses_boundary(element: &VisualElement) -> bool {
    element.height > 0.0 && page_of(element.top) != page_of(element.bottom() - 0.01)
}

/// Measures how the text on a single tall canvas falls onto pages.
pub fn analyze_page_fill(elements: &[VisualElement]) -> PageFillAnalysis {
    let texts = elements.iter().filter(|e| e.is_text());
    let content_bottom = texts.clone().map(VisualElement::bottom).fold(0.0_f32, f32::max);
    let straddling = texts.filter(|e| crosses_boundary(e)).count();

    if content_bottom <= 0.0 {
        return PageFillAnalysis {
            content_bottom: 0.0,
            pages_used: 1,
            last_page_fill: 0.0,
            straddling: 0,
            verdict: PageFillVerdict::Empty,
            action: FillAction::NoAction,
        };
    }

    let pages_used = ((content_bottom / PAGE_HEIGHT).ceil() as usize).max(1);
    let last_page_top = (pages_used - 1) as f32 * PAGE_HEIGHT;
    let used = (content_bottom - last_page_top - PAGE_MARGIN).max(0.0);
    let last_page_fill = (used / usable_height()).clamp(0.0, 1.0);

    let verdict = if pages_used > 1 && last_page_fill <= MINOR_OVERFLOW_FRACTION {
        PageFillVerdict::MinorOverflow
    } else if last_page_fill < MIN_LAST_PAGE_FILL {
        PageFillVerdict::TooMuchWhitespace
    } else {
        PageFillVerdict::Acceptable
    };

    PageFillAnalysis {
        content_bottom,
        pages_used,
        last_page_fill,
        straddling,
        verdict,
        action: recommend_fill_action(verdict),
    }
}

pub fn recommend_fill_action(verdict: PageFillVerdict) -> FillAction {
    match verdict {
        PageFillVerdict::Empty | PageFillVerdict::Acceptable => FillAction::NoAction,
        PageFillVerdict::TooMuchWhitespace => FillAction::LoosenSpacing,
        PageFillVerdict::MinorOverflow => FillAction::TightenSpacing,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

fn slice_id(id: &str, page: usize) -> String {
    format!("{id}{SLICE_SUFFIX}{page}")
}

/// Base id and page number of a slice produced by `paginate`.
fn parse_slice_id(id: &str) -> Option<(&str, usize)> {
    let (base, page) = id.rsplit_once(SLICE_SUFFIX)?;
    let page = page.parse::<usize>().ok()?;
    (!base.is_empty()).then_some((base, page))
}

/// Splits a tall canvas into pages with page-local coordinates.
///
/// Text stays whole on the page its top falls on. Shapes that span a page
/// boundary are sliced; the first piece keeps the id, later pieces get a
/// `-p<page>` suffix.
pub fn paginate(elements: &[VisualElement], background: &str) -> Document {
    let bottom = elements
        .iter()
        .map(VisualElement::bottom)
        .fold(0.0_f32, f32::max);
    let page_count = ((bottom / PAGE_HEIGHT).ceil() as usize).max(1);
    let mut pages: Vec<Vec<VisualElement>> = vec![Vec::new(); page_count];
    let mut sliced = 0;

    for element in elements {
        let first = page_of(element.top).min(page_count - 1);
        let last = if element.is_text() || element.height <= 0.0 {
            first
        } else {
            page_of(element.bottom() - 0.01).min(page_count - 1)
        };

        for page in first..=last {
            let page_top = page as f32 * PAGE_HEIGHT;
            let mut piece = element.clone();
            if last > first {
                let top = element.top.max(page_top);
                let bottom = element.bottom().min(page_top + PAGE_HEIGHT);
                piece.top = top;
                piece.height = bottom - top;
                if page > first {
                    piece.id = slice_id(&element.id, page);
                    sliced += 1;
                }
            }
            piece.top -= page_top;
            pages[page].push(piece);
        }
    }

    debug!(pages = page_count, sliced, "paginated canvas");
    Document {
        pages: pages
            .into_iter()
            .map(|objects| Page {
                version: PAGE_FORMAT_VERSION.to_string(),
                objects,
                background: background.to_string(),
            })
            .collect(),
    }
}

/// Inverse of `paginate`: one tall canvas, with sliced shapes rejoined.
pub fn flatten(document: &Document) -> Vec<VisualElement> {
    let mut out: Vec<VisualElement> = Vec::new();
    for (index, page) in document.pages.iter().enumerate() {
        let offset = index as f32 * PAGE_HEIGHT;
        for element in &page.objects {
            let mut element = element.clone();
            element.top += offset;

            if let Some((base, _)) = parse_slice_id(&element.id) {
                if let Some(owner) = out.iter_mut().find(|e| e.id == base) {
                    owner.height = (element.bottom() - owner.top).max(owner.height);
                    continue;
                }
            }
            out.push(element);
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::layout::render::render;
    use crate::models::element::{FontWeight, TextAlign, TextProps};
    use crate::models::style::{LayoutArchetype, StyleConfig};
    use crate::semantic::vocabulary::SemanticTag;
    use crate::templates::defaults::default_record;

    fn line_at(top: f32) -> VisualElement {
        VisualElement::new_text(
            TextProps {
                text: "line".to_string(),
                font_size: 11.0,
                font_weight: FontWeight::Normal,
                fill: "#000000".to_string(),
                font_family: "Helvetica".to_string(),
                line_height: 1.2,
                char_spacing: 0.0,
                text_align: TextAlign::Left,
            },
            40.0,
            top,
            300.0,
            20.0,
        )
    }

    // ── analyze_page_fill verdicts ──────────────────────────────────────────

    #[test]
    fn test_empty_canvas_verdict() {
        let analysis = analyze_page_fill(&[]);
        assert_eq!(analysis.verdict, PageFillVerdict::Empty);
        assert_eq!(analysis.pages_used, 1);
    }

    #[test]
    fn test_full_page_is_acceptable() {
        // Bottom at 1040 leaves ~3% of the usable height blank.
        let analysis = analyze_page_fill(&[line_at(1020.0)]);
        assert_eq!(analysis.pages_used, 1);
        assert_eq!(analysis.verdict, PageFillVerdict::Acceptable);
        assert_eq!(analysis.action, FillAction::NoAction);
    }

    #[test]
    fn test_half_page_has_too_much_whitespace() {
        let analysis = analyze_page_fill(&[line_at(400.0)]);
        assert_eq!(analysis.verdict, PageFillVerdict::TooMuchWhitespace);
        assert_eq!(analysis.action, FillAction::LoosenSpacing);
        assert!(analysis.last_page_fill < 0.5);
    }

    #[test]
    fn test_small_spill_is_minor_overflow() {
        // Second page used to 1123 + 40 + 30: about 3% of usable height.
        let analysis = analyze_page_fill(&[line_at(500.0), line_at(PAGE_HEIGHT + 50.0)]);
        assert_eq!(analysis.pages_used, 2);
        assert_eq!(analysis.verdict, PageFillVerdict::MinorOverflow);
        assert_eq!(analysis.action, FillAction::TightenSpacing);
    }

    #[test]
    fn test_straddling_text_is_counted() {
        let analysis = analyze_page_fill(&[line_at(PAGE_HEIGHT - 10.0)]);
        assert_eq!(analysis.straddling, 1);
    }

    // ── paginate / flatten ──────────────────────────────────────────────────

    #[test]
    fn test_paginate_moves_text_to_page_local_coordinates() {
        let doc = paginate(&[line_at(100.0), line_at(PAGE_HEIGHT + 60.0)], "#fafafa");
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[1].objects.len(), 1);
        assert!((doc.pages[1].objects[0].top - 60.0).abs() < 1e-3);
        assert_eq!(doc.pages[0].background, "#fafafa");
        assert_eq!(doc.pages[0].version, PAGE_FORMAT_VERSION);
    }

    #[test]
    fn test_paginate_slices_full_height_sidebar() {
        let sidebar = VisualElement::new_rect("#1e293b", 0.0, 0.0, 250.0, PAGE_HEIGHT * 2.0)
            .with_tag(SemanticTag::SidebarBackground);
        let doc = paginate(&[sidebar.clone()], "#ffffff");
        assert_eq!(doc.pages.len(), 2);
        for page in &doc.pages {
            assert_eq!(page.objects.len(), 1);
            let piece = &page.objects[0];
            assert_eq!(piece.top, 0.0);
            assert!((piece.height - PAGE_HEIGHT).abs() < 1e-3);
            assert_eq!(piece.semantic_type, Some(SemanticTag::SidebarBackground));
        }
        assert_eq!(doc.pages[0].objects[0].id, sidebar.id, "first piece keeps the id");

        let flat = flatten(&doc);
        assert_eq!(flat.len(), 1, "slices rejoin into one shape");
        assert!((flat[0].height - PAGE_HEIGHT * 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_paginate_then_flatten_restores_rendered_layout() {
        let mut record = default_record();
        record.experience = record
            .experience
            .iter()
            .cloned()
            .cycle()
            .take(record.experience.len() * 6)
            .collect();
        let elements = render(&record, &StyleConfig::for_archetype(LayoutArchetype::SidebarLeft));
        let doc = paginate(&elements, "#ffffff");
        assert!(doc.pages.len() >= 2, "long record spans pages");

        let flat = flatten(&doc);
        assert_eq!(flat.len(), elements.len());
        let by_id: HashMap<&str, &VisualElement> =
            flat.iter().map(|e| (e.id.as_str(), e)).collect();
        for original in &elements {
            let restored = by_id
                .get(original.id.as_str())
                .unwrap_or_else(|| panic!("lost {:?}", original.semantic_type));
            assert!((restored.top - original.top).abs() < 1e-2);
            assert!((restored.height - original.height).abs() < 1e-2);
        }
    }
}
