//! Book (catalog entry) model and related types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Catalog entry as returned by `/livros`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    pub isbn: String,
    #[serde(rename = "anoPublicacao", default)]
    pub publication_year: Option<i32>,
    #[serde(rename = "editora", default)]
    pub publisher: Option<String>,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "urlCapa", default)]
    pub cover_url: Option<String>,
    /// Only the server flips this, when a loan is created or returned
    #[serde(rename = "disponivel", default = "default_available")]
    pub available: bool,
    #[serde(rename = "dataCadastro", default, with = "super::datetime::option")]
    pub registered_at: Option<NaiveDateTime>,
}

fn default_available() -> bool {
    true
}

impl Book {
    pub fn availability(&self) -> Availability {
        if self.available {
            Availability::Available
        } else {
            Availability::OnLoan
        }
    }

    /// Whether the server-side fields match a create/update payload
    pub fn matches(&self, input: &BookInput) -> bool {
        self.title == input.title
            && self.author == input.author
            && self.isbn == input.isbn
            && self.publication_year == input.publication_year
            && self.publisher == input.publisher
            && self.description == input.description
    }
}

/// Create / update payload for a book.
///
/// Absent optional fields are sent as `null`; the server keeps the stored
/// value for nulls on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookInput {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    pub isbn: String,
    #[serde(rename = "anoPublicacao")]
    pub publication_year: Option<i32>,
    #[serde(rename = "editora")]
    pub publisher: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}

impl BookInput {
    /// Trim text fields and turn blank optionals into `None`
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.author = self.author.trim().to_string();
        self.isbn = self.isbn.trim().to_string();
        self.publisher = non_blank(self.publisher);
        self.description = non_blank(self.description);
        self
    }
}

impl From<&Book> for BookInput {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            publication_year: book.publication_year,
            publisher: book.publisher.clone(),
            description: book.description.clone(),
        }
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    OnLoan,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "Available"),
            Availability::OnLoan => write!(f, "On loan"),
        }
    }
}

/// Book list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookFilter {
    #[default]
    All,
    Available,
    Unavailable,
}

impl BookFilter {
    pub fn accepts(&self, book: &Book) -> bool {
        match self {
            BookFilter::All => true,
            BookFilter::Available => book.available,
            BookFilter::Unavailable => !book.available,
        }
    }
}

impl FromStr for BookFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(BookFilter::All),
            "available" => Ok(BookFilter::Available),
            "unavailable" => Ok(BookFilter::Unavailable),
            other => Err(format!("unknown book filter: {other}")),
        }
    }
}
