//! Client-side read model.
//!
//! [`CatalogState`] is a disposable copy of what the server last returned.
//! Collections are only ever replaced wholesale by a successful fetch, so the
//! last completed reload wins. Everything shown to the user (available books,
//! recent activity, overdue loans) is derived on demand by the pure functions
//! below and never stored next to the collections.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{
    book::{Book, BookFilter},
    loan::{Loan, LoanFilter, LoanStatus},
    search::SearchResults,
    stats::LibraryStats,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Dashboard,
    Books,
    Loans,
    Search,
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Tab::Dashboard),
            "books" | "livros" => Ok(Tab::Books),
            "loans" | "emprestimos" => Ok(Tab::Loans),
            "search" | "buscar" => Ok(Tab::Search),
            other => Err(format!("unknown tab: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

/// Everything the client knows, none of it authoritative
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub books: Vec<Book>,
    pub loans: Vec<Loan>,
    pub stats: Option<LibraryStats>,
    pub search: Option<SearchResults>,
    pub current_tab: Tab,
    pub connection: ConnectionStatus,
}

impl CatalogState {
    pub fn replace_books(&mut self, books: Vec<Book>) {
        tracing::debug!("Book cache replaced ({} entries)", books.len());
        self.books = books;
    }

    pub fn replace_loans(&mut self, loans: Vec<Loan>) {
        tracing::debug!("Loan cache replaced ({} entries)", loans.len());
        self.loans = loans;
    }

    pub fn book(&self, id: i32) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn loan(&self, id: i32) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == id)
    }
}

/// Books a new loan can be made for
pub fn available_books(books: &[Book]) -> Vec<Book> {
    books.iter().filter(|b| b.available).cloned().collect()
}

/// The `n` most recent loans, newest first. Equal dates keep cache order.
pub fn recent_activity(loans: &[Loan], n: usize) -> Vec<Loan> {
    let mut sorted: Vec<&Loan> = loans.iter().collect();
    sorted.sort_by(|a, b| b.loan_date.cmp(&a.loan_date));
    sorted.into_iter().take(n).cloned().collect()
}

/// Active and past its expected return date. No date means not overdue.
pub fn is_overdue(loan: &Loan, now: NaiveDateTime) -> bool {
    loan.status == LoanStatus::Active && loan.expected_return.is_some_and(|due| due < now)
}

pub fn filter_books(books: &[Book], filter: BookFilter) -> Vec<Book> {
    books.iter().filter(|b| filter.accepts(b)).cloned().collect()
}

pub fn filter_loans(loans: &[Loan], filter: LoanFilter, now: NaiveDateTime) -> Vec<Loan> {
    loans
        .iter()
        .filter(|l| match filter {
            LoanFilter::All => true,
            LoanFilter::Active => l.status == LoanStatus::Active,
            LoanFilter::Returned => l.status == LoanStatus::Returned,
            LoanFilter::Overdue => is_overdue(l, now),
        })
        .cloned()
        .collect()
}
