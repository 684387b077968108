pub mod queries;
pub mod types;

pub use types::{DocumentType, DocumentTypePatch, NewDocumentType};
