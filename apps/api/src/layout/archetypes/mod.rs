//! Zone builders, one per layout archetype.
//!
//! Archetypes differ only in geometry and style overrides. Every one of them
//! is rendered by the same composer in `layout::render`.

pub mod dynamic;
pub mod header_two_column;
pub mod minimal;
pub mod modern_split;
pub mod sidebar;
pub mod single_column;

use std::collections::BTreeMap;

use crate::semantic::vocabulary::SemanticCategory;
use crate::templates::zones::{Region, SECTION_PRIORITY};

/// Priority order with `first` pulled to the front.
pub(crate) fn order_with(first: &[SemanticCategory]) -> Vec<SemanticCategory> {
    let mut order = first.to_vec();
    order.extend(SECTION_PRIORITY.iter().filter(|c| !first.contains(c)));
    order
}

pub(crate) fn placements(
    categories: &[SemanticCategory],
    region: Region,
) -> BTreeMap<SemanticCategory, Region> {
    categories.iter().map(|c| (*c, region)).collect()
}
