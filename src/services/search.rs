//! Catalog search

use super::Controller;
use crate::{
    error::{AppError, AppResult},
    models::search::{SearchKind, SearchResults},
};

impl Controller {
    /// Run a search and keep its results for display.
    ///
    /// ISBN lookups answer with a single book (or nothing); they are
    /// normalized into a zero- or one-element list like the other kinds.
    pub async fn search(&mut self, term: &str, kind: SearchKind) -> AppResult<SearchResults> {
        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::Validation("Enter a search term".to_string()));
        }

        let books = &self.repository.books;
        let found = match kind {
            SearchKind::Title => books.search_by_title(term).await?,
            SearchKind::Author => books.search_by_author(term).await?,
            SearchKind::Isbn => books.find_by_isbn(term).await?.into_iter().collect(),
            SearchKind::General => books.search(term).await?,
        };
        tracing::debug!("Search {} '{}' -> {} result(s)", kind, term, found.len());

        let results = SearchResults {
            term: term.to_string(),
            kind,
            books: found,
        };
        self.state.search = Some(results.clone());
        Ok(results)
    }

    pub fn clear_search(&mut self) {
        self.state.search = None;
    }
}
