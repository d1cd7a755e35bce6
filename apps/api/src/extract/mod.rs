//! Reverse extraction: free-form canvas elements back to a `ResumeRecord`.

pub mod record;
pub mod sections;

pub use record::extract_record;
