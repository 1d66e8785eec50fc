//! Search kinds and results

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::book::Book;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Title,
    Author,
    Isbn,
    #[default]
    General,
}

impl FromStr for SearchKind {
    type Err = String;

    /// Unknown kinds fall back to a general search, as the search form does
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "title" | "titulo" => SearchKind::Title,
            "author" | "autor" => SearchKind::Author,
            "isbn" => SearchKind::Isbn,
            _ => SearchKind::General,
        })
    }
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SearchKind::Title => "title",
            SearchKind::Author => "author",
            SearchKind::Isbn => "isbn",
            SearchKind::General => "general",
        };
        write!(f, "{}", label)
    }
}

/// Uniform search outcome, whatever shape the endpoint answered with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub term: String,
    pub kind: SearchKind,
    pub books: Vec<Book>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_is_general() {
        assert_eq!("everything".parse::<SearchKind>(), Ok(SearchKind::General));
        assert_eq!("ISBN".parse::<SearchKind>(), Ok(SearchKind::Isbn));
    }
}
