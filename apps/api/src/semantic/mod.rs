// Semantic layer: tag vocabulary, text pattern tables, and tag inference for
// untagged or hand-edited canvas content.

pub mod inference;
pub mod patterns;
pub mod vocabulary;

pub use inference::add_inferred_tags;
pub use vocabulary::SemanticTag;
