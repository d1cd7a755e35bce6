//! Reading order and section grouping over free-form canvas elements.
//!
//! Elements are first put in reading order (column aware), then folded into
//! `SectionSpan`s: each span is one header and the elements under it. Spans
//! are built once and not mutated afterwards; the record extractor, the
//! template switcher and the section reorderer all read the same spans.

use crate::models::element::VisualElement;
use crate::models::style::PAGE_WIDTH;
use crate::semantic::patterns::{is_uppercase_text, match_section_keyword, word_count};
use crate::semantic::vocabulary::SemanticCategory;

/// Elements at least this fraction of the page wide never define a column.
const FULL_WIDTH_FRACTION: f32 = 0.7;

/// Elements narrower than this (inline contact fields, icons) never define a column.
const MIN_COLUMN_ELEMENT_WIDTH: f32 = 120.0;

/// Slack allowed when fitting an element inside a column band.
const BAND_TOLERANCE: f32 = 20.0;

const MAX_CUSTOM_HEADER_CHARS: usize = 40;
const MAX_CUSTOM_HEADER_WORDS: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Reading order
// ────────────────────────────────────────────────────────────────────────────

/// An element index with the reading column it was assigned to.
///
/// Column 0 is the full-width band above the columns; the last column holds
/// anything that fits no band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
    pub index: usize,
    pub column: usize,
}

fn sort_by_position(elements: &[VisualElement], indices: &mut [usize]) {
    indices.sort_by(|a, b| {
        let (ea, eb) = (&elements[*a], &elements[*b]);
        ea.top
            .total_cmp(&eb.top)
            .then(ea.left.total_cmp(&eb.left))
            .then(a.cmp(b))
    });
}

/// Horizontal extent of a reading column and the rows backing it.
#[derive(Debug, Clone, Copy)]
struct Band {
    left: f32,
    right: f32,
    first_top: f32,
    last_top: f32,
}

/// Merges the horizontal extents of column-sized elements into bands.
///
/// A band backed by a single row (an inline contact line) is not a column.
fn column_bands(elements: &[VisualElement], texts: &[usize]) -> Vec<Band> {
    let mut spans: Vec<&VisualElement> = texts
        .iter()
        .map(|i| &elements[*i])
        .filter(|e| is_column_sized(e))
        .collect();
    spans.sort_by(|a, b| a.left.total_cmp(&b.left));

    let mut bands: Vec<Band> = Vec::new();
    for el in spans {
        let overlaps_last = bands.last().is_some_and(|band| el.left <= band.right);
        match bands.last_mut() {
            Some(band) if overlaps_last => {
                band.right = band.right.max(el.right());
                band.first_top = band.first_top.min(el.top);
                band.last_top = band.last_top.max(el.top);
            }
            _ => bands.push(Band {
                left: el.left,
                right: el.right(),
                first_top: el.top,
                last_top: el.top,
            }),
        }
    }
    bands.retain(|band| band.last_top > band.first_top);
    bands
}

fn is_column_sized(element: &VisualElement) -> bool {
    element.width < PAGE_WIDTH * FULL_WIDTH_FRACTION && element.width >= MIN_COLUMN_ELEMENT_WIDTH
}

/// Text elements in reading order: the full-width area above the columns,
/// then each column left to right, then leftovers. A page with fewer than two
/// column bands reads top to bottom.
pub fn reading_order(elements: &[VisualElement]) -> Vec<Placed> {
    let mut texts: Vec<usize> = elements
        .iter()
        .enumerate()
        .filter(|(_, e)| e.text().is_some_and(|t| !t.trim().is_empty()))
        .map(|(i, _)| i)
        .collect();

    let bands = column_bands(elements, &texts);
    if bands.len() < 2 {
        sort_by_position(elements, &mut texts);
        return texts
            .into_iter()
            .map(|index| Placed { index, column: 0 })
            .collect();
    }

    let columns_top = bands
        .iter()
        .map(|band| band.first_top)
        .fold(f32::INFINITY, f32::min);

    let leftover_column = bands.len() + 1;
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); bands.len() + 2];
    for index in texts {
        let el = &elements[index];
        let band = bands.iter().position(|band| {
            el.left >= band.left - BAND_TOLERANCE && el.right() <= band.right + BAND_TOLERANCE
        });
        let column = match band {
            _ if el.top < columns_top => 0,
            Some(b) => b + 1,
            None => leftover_column,
        };
        buckets[column].push(index);
    }

    let mut ordered = Vec::new();
    for (column, mut bucket) in buckets.into_iter().enumerate() {
        sort_by_position(elements, &mut bucket);
        ordered.extend(bucket.into_iter().map(|index| Placed { index, column }));
    }
    ordered
}

// ────────────────────────────────────────────────────────────────────────────
// Header detection
// ────────────────────────────────────────────────────────────────────────────

/// Category a header element opens, if it is one.
///
/// Tags win: a section tag is a header, any other tag is not. Untagged text
/// is matched against the keyword table, emphasized by bold or capitals.
/// Short bold capitals with letter spacing open a custom section.
pub fn detect_header(element: &VisualElement) -> Option<SemanticCategory> {
    if let Some(tag) = element.semantic_type {
        return tag.is_section_header().then(|| tag.category());
    }
    let props = element.text_props()?;
    let text = props.text.trim();
    if text.is_empty() {
        return None;
    }
    let uppercase = is_uppercase_text(text);
    let emphasized = props.font_weight.is_bold() || uppercase;
    if let Some(category) = match_section_keyword(text, emphasized) {
        return Some(category);
    }
    let short = text.chars().count() <= MAX_CUSTOM_HEADER_CHARS
        && word_count(text) <= MAX_CUSTOM_HEADER_WORDS;
    (short && props.font_weight.is_bold() && uppercase && props.char_spacing > 0.0)
        .then_some(SemanticCategory::Custom)
}

// ────────────────────────────────────────────────────────────────────────────
// Section fold
// ────────────────────────────────────────────────────────────────────────────

/// One header and the elements read under it.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub category: SemanticCategory,
    /// Index of the header element; `None` for the implicit personal block
    /// and for sections formed only from routed tagged elements.
    pub header: Option<usize>,
    pub members: Vec<usize>,
    pub column: usize,
}

impl SectionSpan {
    fn open(category: SemanticCategory, header: Option<usize>, column: usize) -> Self {
        SectionSpan {
            category,
            header,
            members: Vec::new(),
            column,
        }
    }

    /// Header index followed by members.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.header.into_iter().chain(self.members.iter().copied())
    }
}

/// True when a tag's category should pull the element out of the span it
/// was read in. Generic custom tags and decorations stay put.
fn routes_by_tag(category: SemanticCategory) -> bool {
    !matches!(category, SemanticCategory::Custom | SemanticCategory::Layout)
}

/// Folds text elements into section spans.
///
/// Each reading column opens with an implicit personal span. Tagged elements
/// whose category disagrees with the current span join the latest span of
/// their own category (opening a headerless one if needed), without changing
/// which span later untagged elements fall into.
pub fn group_sections(elements: &[VisualElement]) -> Vec<SectionSpan> {
    let mut spans: Vec<SectionSpan> = Vec::new();
    let mut current: Option<usize> = None;
    let mut current_column: Option<usize> = None;

    for placed in reading_order(elements) {
        let element = &elements[placed.index];

        if current_column != Some(placed.column) {
            current_column = Some(placed.column);
            spans.push(SectionSpan::open(
                SemanticCategory::Personal,
                None,
                placed.column,
            ));
            current = Some(spans.len() - 1);
        }

        if let Some(category) = detect_header(element) {
            spans.push(SectionSpan::open(category, Some(placed.index), placed.column));
            current = Some(spans.len() - 1);
            continue;
        }

        let Some(current_index) = current else {
            continue;
        };
        let target = match element.category() {
            Some(category)
                if routes_by_tag(category) && category != spans[current_index].category =>
            {
                match spans.iter().rposition(|s| s.category == category) {
                    Some(existing) => existing,
                    None => {
                        spans.push(SectionSpan::open(category, None, placed.column));
                        spans.len() - 1
                    }
                }
            }
            _ => current_index,
        };
        spans[target].members.push(placed.index);
    }

    spans.retain(|s| s.header.is_some() || !s.members.is_empty());
    spans
}
