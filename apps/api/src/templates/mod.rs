// Template side of the engine: per-archetype zones, the named preset catalog,
// the sample record shown on an empty canvas, and the template switcher.

pub mod catalog;
pub mod defaults;
pub mod switcher;
pub mod zones;

pub use catalog::{TemplateCatalog, TemplateRef};
pub use switcher::switch_template;
