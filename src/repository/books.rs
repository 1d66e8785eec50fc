//! Books repository (`/livros`)

use reqwest::Method;

use super::ApiClient;
use crate::{
    error::AppResult,
    models::book::{Book, BookInput},
};

#[derive(Debug, Clone)]
pub struct BooksRepository {
    api: ApiClient,
}

impl BooksRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Full catalog
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.api.get(&["livros"], &[]).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        self.api.get_optional(&["livros", &id.to_string()]).await
    }

    pub async fn create(&self, book: &BookInput) -> AppResult<Book> {
        self.api
            .send_json(Method::POST, &["livros"], &[], Some(book))
            .await
    }

    pub async fn update(&self, id: i32, book: &BookInput) -> AppResult<Book> {
        self.api
            .send_json(Method::PUT, &["livros", &id.to_string()], &[], Some(book))
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.api
            .execute(Method::DELETE, &["livros", &id.to_string()])
            .await
    }

    /// Mark a book as available (`true`) or unavailable (`false`)
    pub async fn set_availability(&self, id: i32, available: bool) -> AppResult<()> {
        let action = if available {
            "marcar-disponivel"
        } else {
            "marcar-indisponivel"
        };
        self.api
            .execute(Method::PUT, &["livros", &id.to_string(), action])
            .await
    }

    /// Ask the server to fill in missing fields from external ISBN sources
    pub async fn enrich(&self, id: i32) -> AppResult<()> {
        self.api
            .execute(Method::PUT, &["livros", &id.to_string(), "buscar-informacoes"])
            .await
    }

    /// Preview what external sources know about an ISBN, without saving
    pub async fn lookup_external(&self, isbn: &str) -> AppResult<Book> {
        self.api.get(&["livros", "buscar-por-isbn", isbn], &[]).await
    }

    pub async fn search_by_title(&self, title: &str) -> AppResult<Vec<Book>> {
        self.api
            .get(&["livros", "titulo"], &[("titulo", title.to_string())])
            .await
    }

    pub async fn search_by_author(&self, author: &str) -> AppResult<Vec<Book>> {
        self.api
            .get(&["livros", "autor"], &[("autor", author.to_string())])
            .await
    }

    /// Single-object lookup; a missing ISBN is `None`, not an error
    pub async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        self.api.get_optional(&["livros", "isbn", isbn]).await
    }

    /// Free-text search over title, author and ISBN
    pub async fn search(&self, term: &str) -> AppResult<Vec<Book>> {
        self.api
            .get(&["livros", "buscar"], &[("termo", term.to_string())])
            .await
    }
}
