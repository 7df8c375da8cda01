//! Free-text search over record name and description.

use super::Filter;
use crate::catalog::CatalogItem;

/// Matches records whose name or description contains the search term, ignoring case.
pub struct SearchFilter {
    term: String,
}

impl SearchFilter {
    /// Creates a new search filter. The term is stored lowercase, whitespace included.
    pub fn new(term: impl AsRef<str>) -> Self {
        Self { term: term.as_ref().to_lowercase() }
    }

    /// Returns true if the filter has no term and therefore matches everything.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }
}

impl Filter for SearchFilter {
    fn matches(&self, record: &dyn CatalogItem) -> bool {
        if self.term.is_empty() {
            return true;
        }

        let name = record.name().unwrap_or_default().to_lowercase();
        if name.contains(&self.term) {
            return true;
        }

        let description = record.description().unwrap_or_default().to_lowercase();
        description.contains(&self.term)
    }

    fn description(&self) -> String {
        format!("Search: \"{}\"", self.term)
    }
}
