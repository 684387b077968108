pub mod filter;
pub mod queries;
pub mod types;

pub use types::{Document, DocumentPatch, NewDocument, STATUS_ARCHIVED, STATUS_CURRENT};
