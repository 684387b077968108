pub mod document;
pub mod document_type;
pub mod reorder;
pub mod user;
