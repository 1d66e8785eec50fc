//! View models emitted by the controller.
//!
//! Plain data; rendering them is up to whoever consumes the controller.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    models::{
        book::{Availability, Book},
        loan::{Loan, LoanDraft, LoanStatus},
        search::SearchResults,
        stats::LibraryStats,
    },
    state::{self, ConnectionStatus},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Borrowed,
    Returned,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub loan_id: i32,
    pub kind: ActivityKind,
    pub book_title: Option<String>,
    pub borrower: String,
    pub date: String,
}

impl From<&Loan> for ActivityEntry {
    fn from(loan: &Loan) -> Self {
        Self {
            loan_id: loan.id,
            kind: if loan.is_returned() {
                ActivityKind::Returned
            } else {
                ActivityKind::Borrowed
            },
            book_title: loan.book_title().map(str::to_string),
            borrower: loan.borrower_name.clone(),
            date: format_date(Some(loan.loan_date)),
        }
    }
}

/// Dashboard sections. A section whose request failed stays `None`/empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub stats: Option<LibraryStats>,
    pub recent_activity: Vec<ActivityEntry>,
    pub connection: ConnectionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRow {
    #[serde(flatten)]
    pub book: Book,
    pub availability: Availability,
    pub cover: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanRow {
    #[serde(flatten)]
    pub loan: Loan,
    pub status_label: String,
    pub overdue: bool,
    /// Only loans still out offer a return action
    pub returnable: bool,
    pub loan_date: String,
    pub expected_return: String,
}

impl LoanRow {
    pub fn new(loan: Loan, now: NaiveDateTime) -> Self {
        let overdue = state::is_overdue(&loan, now);
        Self {
            status_label: loan.status.label().to_string(),
            returnable: matches!(loan.status, LoanStatus::Active | LoanStatus::Overdue),
            loan_date: format_date(Some(loan.loan_date)),
            expected_return: format_date(loan.expected_return),
            overdue,
            loan,
        }
    }
}

/// One option of the book selector in the loan form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookChoice {
    pub book_id: i32,
    pub label: String,
    pub enabled: bool,
}

impl BookChoice {
    pub fn new(book: &Book, include_all: bool) -> Self {
        let mut label = format!("{} - {}", book.title, book.author);
        if !book.available {
            label.push_str(" (On loan)");
        }
        Self {
            book_id: book.id,
            label,
            enabled: book.available || include_all,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanFormMode {
    Create,
    Edit,
    /// The loan asked for was returned; this is a new loan pre-filled from it
    NewFromReturned,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanFormView {
    pub mode: LoanFormMode,
    pub draft: LoanDraft,
    pub choices: Vec<BookChoice>,
}

/// What a dispatched command leaves for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum View {
    Dashboard(DashboardView),
    Books(Vec<BookRow>),
    Book(Book),
    Loans(Vec<LoanRow>),
    LoanForm(LoanFormView),
    Search(SearchResults),
    Connection(ConnectionStatus),
    /// Nothing new to show (failed command, cleared form, ...)
    Unchanged,
}

/// `dd/mm/yyyy`, or `-` when absent
pub fn format_date(value: Option<NaiveDateTime>) -> String {
    match value {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => "-".to_string(),
    }
}
