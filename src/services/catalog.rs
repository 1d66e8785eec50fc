//! Book operations

use reqwest::Url;

use super::{require, Controller};
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, BookInput},
    notify::Notification,
    state,
    views::BookRow,
};

impl Controller {
    /// Replace the book cache with the server's catalog
    pub async fn load_books(&mut self) -> AppResult<()> {
        let books = self.repository.books.list().await?;
        self.state.replace_books(books);
        Ok(())
    }

    pub fn available_books(&self) -> Vec<Book> {
        state::available_books(&self.state.books)
    }

    pub fn filter_books(&self, filter: BookFilter) -> Vec<Book> {
        state::filter_books(&self.state.books, filter)
    }

    pub fn book_rows(&self, filter: BookFilter) -> Vec<BookRow> {
        self.filter_books(filter)
            .into_iter()
            .map(|book| BookRow {
                availability: book.availability(),
                cover: self.cover_proxy_url(&book),
                book,
            })
            .collect()
    }

    /// Route a cover image through the server's image proxy
    pub fn cover_proxy_url(&self, book: &Book) -> Option<String> {
        let cover = book.cover_url.as_deref().filter(|c| !c.trim().is_empty())?;
        let endpoint = self.repository.api.url(&["api", "images", "proxy"]);
        Url::parse_with_params(endpoint.as_str(), &[("url", cover)])
            .ok()
            .map(String::from)
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// What external sources know about an ISBN; nothing is saved
    pub async fn preview_isbn(&self, isbn: &str) -> AppResult<Book> {
        require(isbn, "ISBN")?;
        self.repository.books.lookup_external(isbn.trim()).await
    }

    pub async fn create_book(&mut self, input: BookInput) -> AppResult<Book> {
        let input = validate(input)?;
        let created = self.repository.books.create(&input).await?;
        tracing::info!("Book created: id={} isbn={}", created.id, created.isbn);
        self.notify(Notification::success("Book created"));
        self.refresh_after_mutation(true, false).await;
        Ok(created)
    }

    pub async fn update_book(&mut self, id: i32, input: BookInput) -> AppResult<Book> {
        let input = validate(input)?;
        let updated = self.repository.books.update(id, &input).await?;
        tracing::info!("Book updated: id={}", id);
        self.notify(Notification::success("Book updated"));
        self.refresh_after_mutation(true, false).await;
        Ok(updated)
    }

    /// Create when `id` is `None`, update otherwise
    pub async fn save_book(&mut self, id: Option<i32>, input: BookInput) -> AppResult<Book> {
        match id {
            Some(id) => self.update_book(id, input).await,
            None => self.create_book(input).await,
        }
    }

    /// Flip a cached book's availability. Returns the new value.
    pub async fn toggle_availability(&mut self, id: i32) -> AppResult<bool> {
        let currently_available = self
            .state
            .book(id)
            .map(|b| b.available)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} is not loaded", id)))?;

        let target = !currently_available;
        self.repository.books.set_availability(id, target).await?;
        self.notify(Notification::success(if target {
            "Book marked as available"
        } else {
            "Book marked as unavailable"
        }));
        self.refresh_after_mutation(true, false).await;
        Ok(target)
    }

    pub async fn delete_book(&mut self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Book deleted: id={}", id);
        self.notify(Notification::success("Book deleted"));
        self.refresh_after_mutation(true, false).await;
        Ok(())
    }

    /// Ask the server to complete the book from external ISBN sources
    pub async fn enrich_book(&mut self, id: i32) -> AppResult<()> {
        self.repository.books.enrich(id).await?;
        self.notify(Notification::success("Book information updated"));
        self.refresh_after_mutation(true, false).await;
        Ok(())
    }
}

fn validate(input: BookInput) -> AppResult<BookInput> {
    let input = input.normalized();
    require(&input.title, "Title")?;
    require(&input.author, "Author")?;
    require(&input.isbn, "ISBN")?;
    Ok(input)
}
