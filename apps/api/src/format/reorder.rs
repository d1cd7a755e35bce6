//! Section reordering on an existing canvas.
//!
//! Sections are found with the same fold the extractor uses. Within each
//! reading column, every headed section is moved as one block: all of its
//! elements shift by the same vertical delta, so the inside of a section
//! keeps its shape. Blocks are restacked from the column's first section top
//! with a running cursor.

use std::collections::HashSet;

use tracing::debug;

use crate::extract::sections::{group_sections, SectionSpan};
use crate::models::element::VisualElement;
use crate::semantic::vocabulary::{SemanticCategory, SemanticTag};

/// Shifts smaller than this are layout noise and are skipped.
pub const MIN_SHIFT: f32 = 5.0;

/// Gap between blocks when the column gives no positive gap to copy.
const DEFAULT_SECTION_GAP: f32 = 18.0;

/// A headed section's elements and their combined extent.
#[derive(Debug, Clone)]
struct Block {
    category: SemanticCategory,
    indices: Vec<usize>,
    top: f32,
    bottom: f32,
    left: f32,
    right: f32,
}

impl Block {
    fn from_span(elements: &[VisualElement], span: &SectionSpan) -> Self {
        let indices: Vec<usize> = span.indices().collect();
        let mut block = Block {
            category: span.category,
            indices: Vec::new(),
            top: f32::INFINITY,
            bottom: f32::NEG_INFINITY,
            left: f32::INFINITY,
            right: f32::NEG_INFINITY,
        };
        for index in indices {
            block.include(elements, index);
        }
        block
    }

    fn include(&mut self, elements: &[VisualElement], index: usize) {
        let el = &elements[index];
        self.top = self.top.min(el.top);
        self.bottom = self.bottom.max(el.bottom());
        self.left = self.left.min(el.left);
        self.right = self.right.max(el.right());
        self.indices.push(index);
    }

    fn height(&self) -> f32 {
        self.bottom - self.top
    }

    fn contains(&self, el: &VisualElement) -> bool {
        el.top >= self.top
            && el.bottom() <= self.bottom
            && el.left < self.right
            && el.right() > self.left
    }
}

/// Full-page backgrounds stay where they are.
fn is_background(element: &VisualElement) -> bool {
    matches!(
        element.semantic_type,
        Some(SemanticTag::HeaderBackground | SemanticTag::SidebarBackground)
    )
}

/// Attaches dividers and other decorations to the block that encloses them.
fn attach_shapes(elements: &[VisualElement], blocks: &mut [Block]) {
    let mut claimed: HashSet<usize> = blocks.iter().flat_map(|b| b.indices.clone()).collect();
    for (index, el) in elements.iter().enumerate() {
        if el.is_text() || is_background(el) || claimed.contains(&index) {
            continue;
        }
        if let Some(block) = blocks.iter_mut().find(|b| b.contains(el)) {
            block.indices.push(index);
            claimed.insert(index);
        }
    }
}

/// Average of the positive gaps between consecutive blocks.
fn typical_gap(blocks: &[Block]) -> f32 {
    let gaps: Vec<f32> = blocks
        .windows(2)
        .map(|pair| pair[1].top - pair[0].bottom)
        .filter(|gap| *gap > 0.0)
        .collect();
    if gaps.is_empty() {
        DEFAULT_SECTION_GAP
    } else {
        gaps.iter().sum::<f32>() / gaps.len() as f32
    }
}

fn rank(order: &[SemanticCategory], category: SemanticCategory) -> usize {
    order
        .iter()
        .position(|c| *c == category)
        .unwrap_or(order.len())
}

/// Moves headed sections into `order`, column by column.
///
/// Categories absent from `order` keep their relative order after the listed
/// ones. Returns the number of elements that moved.
pub fn reorder_sections(elements: &mut [VisualElement], order: &[SemanticCategory]) -> usize {
    let spans = group_sections(elements);
    let mut columns: Vec<usize> = spans.iter().map(|s| s.column).collect();
    columns.sort_unstable();
    columns.dedup();

    let mut moved = 0;
    for column in columns {
        let mut blocks: Vec<Block> = spans
            .iter()
            .filter(|s| s.column == column && s.header.is_some())
            .map(|s| Block::from_span(elements, s))
            .collect();
        if blocks.len() < 2 {
            continue;
        }
        blocks.sort_by(|a, b| a.top.total_cmp(&b.top));
        attach_shapes(elements, &mut blocks);

        let gap = typical_gap(&blocks);
        let mut cursor = blocks[0].top;
        blocks.sort_by_key(|b| rank(order, b.category));

        for block in &blocks {
            let delta = cursor - block.top;
            if delta.abs() >= MIN_SHIFT {
                for index in &block.indices {
                    elements[*index].top += delta;
                }
                moved += block.indices.len();
            }
            cursor += block.height() + gap;
        }
    }

    debug!(moved, "reordered sections");
    moved
}
