// Forward layout: record + style → positioned, tagged canvas elements.
// Also owns the text height estimator and page fill / pagination.
// CPU-bound passes are run by the handlers inside tokio::task::spawn_blocking.

pub mod archetypes;
pub mod font_metrics;
pub mod page_fill;
pub mod render;
pub mod sections;
pub mod writer;

// Re-export the public API consumed by the handlers and the switcher.
pub use page_fill::{analyze_page_fill, flatten, paginate, PageFillAnalysis};
pub use render::render;
