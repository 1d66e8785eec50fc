//! Loans repository (`/emprestimos`)

use reqwest::Method;

use super::ApiClient;
use crate::{
    error::AppResult,
    models::loan::{Loan, LoanRequest, LoanUpdateBody},
};

#[derive(Debug, Clone)]
pub struct LoansRepository {
    api: ApiClient,
}

impl LoansRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> AppResult<Vec<Loan>> {
        self.api.get(&["emprestimos"], &[]).await
    }

    pub async fn list_by_email(&self, email: &str) -> AppResult<Vec<Loan>> {
        self.api
            .get(&["emprestimos", "por-email"], &[("email", email.to_string())])
            .await
    }

    /// Lend a book. The server flips the book's availability.
    pub async fn create(&self, request: &LoanRequest) -> AppResult<Loan> {
        self.api
            .send_json::<(), _>(
                Method::POST,
                &["emprestimos", "emprestar"],
                &request.query_pairs(),
                None,
            )
            .await
    }

    pub(crate) async fn update(&self, id: i32, body: &LoanUpdateBody) -> AppResult<Loan> {
        self.api
            .send_json(Method::PUT, &["emprestimos", &id.to_string()], &[], Some(body))
            .await
    }

    pub async fn return_loan(&self, id: i32) -> AppResult<()> {
        self.api
            .execute(Method::PUT, &["emprestimos", &id.to_string(), "devolver"])
            .await
    }

    /// Return the active loan of a book
    pub async fn return_by_book(&self, book_id: i32) -> AppResult<()> {
        self.api
            .execute(
                Method::PUT,
                &["emprestimos", "devolver-por-livro", &book_id.to_string()],
            )
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.api
            .execute(Method::DELETE, &["emprestimos", &id.to_string()])
            .await
    }
}
