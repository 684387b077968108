//! Display-subset selection for the document list: type tab, free-text
//! search, and status filter ANDed together, result in sort_order.

use super::types::{Document, STATUS_ARCHIVED, STATUS_CURRENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Current,
    Archived,
}

impl StatusFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(StatusFilter::All),
            "current" => Some(StatusFilter::Current),
            "archived" => Some(StatusFilter::Archived),
            _ => None,
        }
    }

    fn matches(&self, status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Current => status == STATUS_CURRENT,
            StatusFilter::Archived => status == STATUS_ARCHIVED,
        }
    }
}

/// Case-insensitive substring match over title, code, user code, and
/// description. An empty term matches everything.
fn matches_search(doc: &Document, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    doc.title.to_lowercase().contains(&needle)
        || doc.code.to_lowercase().contains(&needle)
        || doc
            .user_code
            .as_deref()
            .is_some_and(|uc| uc.to_lowercase().contains(&needle))
        || doc.description.to_lowercase().contains(&needle)
}

/// Select the display subset: exact tab match (when a tab is given), search
/// term, and status filter, sorted ascending by sort_order. The sort is
/// stable, so entries with equal sort_order keep their fetch order.
pub fn filter_documents(
    docs: Vec<Document>,
    tab: Option<&str>,
    search: &str,
    status: StatusFilter,
) -> Vec<Document> {
    let mut selected: Vec<Document> = docs
        .into_iter()
        .filter(|doc| tab.is_none_or(|t| doc.doc_type == t))
        .filter(|doc| matches_search(doc, search))
        .filter(|doc| status.matches(&doc.status))
        .collect();
    selected.sort_by_key(|doc| doc.sort_order);
    selected
}
