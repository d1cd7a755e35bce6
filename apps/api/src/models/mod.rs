pub mod element;
pub mod resume;
pub mod style;

pub use element::{Document, ElementKind, Page, TextProps, VisualElement};
pub use resume::ResumeRecord;
pub use style::{LayoutArchetype, StyleConfig};
