//! Loan model and related types

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::book::{non_blank, Book};
use super::datetime;
use crate::error::{AppError, AppResult};

/// Loan status tag as sent by the server.
///
/// Only `Active -> Returned` is a legal transition. `Overdue` exists on the
/// server side but the client never derives anything from it: overdue is
/// computed from `Active` + expected return date. Unknown tags are kept
/// verbatim so they show up as-is instead of being mistaken for active loans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoanStatus {
    Active,
    Returned,
    Overdue,
    Unrecognized(String),
}

impl LoanStatus {
    pub fn as_tag(&self) -> &str {
        match self {
            LoanStatus::Active => "ATIVO",
            LoanStatus::Returned => "DEVOLVIDO",
            LoanStatus::Overdue => "ATRASADO",
            LoanStatus::Unrecognized(tag) => tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LoanStatus::Active => "Active",
            LoanStatus::Returned => "Returned",
            LoanStatus::Overdue => "Overdue",
            LoanStatus::Unrecognized(tag) => tag,
        }
    }
}

impl From<String> for LoanStatus {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "ATIVO" => LoanStatus::Active,
            "DEVOLVIDO" => LoanStatus::Returned,
            "ATRASADO" => LoanStatus::Overdue,
            _ => LoanStatus::Unrecognized(tag),
        }
    }
}

impl From<LoanStatus> for String {
    fn from(status: LoanStatus) -> Self {
        status.as_tag().to_string()
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Loan as returned by `/emprestimos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i32,
    #[serde(rename = "livro", default)]
    pub book: Option<Book>,
    #[serde(rename = "nomePessoa")]
    pub borrower_name: String,
    #[serde(rename = "emailPessoa")]
    pub borrower_email: String,
    #[serde(rename = "telefonePessoa", default)]
    pub borrower_phone: Option<String>,
    #[serde(rename = "dataEmprestimo", with = "datetime")]
    pub loan_date: NaiveDateTime,
    #[serde(rename = "dataPrevistaDevolucao", default, with = "datetime::option")]
    pub expected_return: Option<NaiveDateTime>,
    #[serde(rename = "dataDevolucao", default, with = "datetime::option")]
    pub returned_at: Option<NaiveDateTime>,
    pub status: LoanStatus,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
}

impl Loan {
    pub fn is_returned(&self) -> bool {
        self.status == LoanStatus::Returned
    }

    pub fn book_id(&self) -> Option<i32> {
        self.book.as_ref().map(|b| b.id)
    }

    pub fn book_title(&self) -> Option<&str> {
        self.book.as_ref().map(|b| b.title.as_str())
    }
}

/// Whole days between two instants, rounded up. Order does not matter.
pub fn days_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let seconds = (end - start).num_seconds().abs();
    let day = Duration::days(1).num_seconds();
    (seconds + day - 1) / day
}

/// Longest loan the client will ask for
pub const MAX_LOAN_DAYS: u32 = 365;

/// Expected return date for a loan starting at `start` and lasting `days`.
/// `None` when the date falls outside the calendar range.
pub fn return_date(start: NaiveDateTime, days: u32) -> Option<NaiveDateTime> {
    start.checked_add_signed(Duration::days(i64::from(days)))
}

/// Parameters of `POST /emprestimos/emprestar` (sent query-encoded)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub book_id: i32,
    pub borrower_name: String,
    pub borrower_email: String,
    pub borrower_phone: Option<String>,
    pub days: u32,
    pub notes: Option<String>,
}

impl LoanRequest {
    /// Query pairs in the server's parameter names. Absent optionals are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("livroId", self.book_id.to_string()),
            ("nomePessoa", self.borrower_name.clone()),
            ("emailPessoa", self.borrower_email.clone()),
        ];
        if let Some(phone) = &self.borrower_phone {
            pairs.push(("telefonePessoa", phone.clone()));
        }
        pairs.push(("diasEmprestimo", self.days.to_string()));
        if let Some(notes) = &self.notes {
            pairs.push(("observacoes", notes.clone()));
        }
        pairs
    }
}

/// Editable fields of an existing loan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanUpdate {
    pub borrower_name: String,
    pub borrower_email: String,
    pub borrower_phone: Option<String>,
    /// Loan length counted from the original loan date
    pub days: Option<u32>,
    pub notes: Option<String>,
}

/// JSON body of `PUT /emprestimos/{id}`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoanUpdateBody {
    #[serde(rename = "nomePessoa")]
    pub borrower_name: String,
    #[serde(rename = "emailPessoa")]
    pub borrower_email: String,
    #[serde(rename = "telefonePessoa")]
    pub borrower_phone: Option<String>,
    #[serde(rename = "dataPrevistaDevolucao", with = "datetime::option")]
    pub expected_return: Option<NaiveDateTime>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
}

impl LoanUpdateBody {
    pub fn new(loan: &Loan, update: LoanUpdate, default_days: u32) -> AppResult<Self> {
        let days = update.days.unwrap_or(default_days);
        let expected_return = return_date(loan.loan_date, days).ok_or_else(|| {
            AppError::Validation(format!("A loan of {days} days ends out of range"))
        })?;
        Ok(Self {
            borrower_name: update.borrower_name.trim().to_string(),
            borrower_email: update.borrower_email.trim().to_string(),
            borrower_phone: non_blank(update.borrower_phone),
            expected_return: Some(expected_return),
            notes: non_blank(update.notes),
        })
    }
}

/// Pre-filled loan form handed to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanDraft {
    /// Set when the draft edits an existing loan
    pub loan_id: Option<i32>,
    pub book_id: Option<i32>,
    pub borrower_name: String,
    pub borrower_email: String,
    pub borrower_phone: Option<String>,
    pub days: u32,
    pub notes: Option<String>,
}

impl LoanDraft {
    pub fn for_book(book_id: i32, default_days: u32) -> Self {
        Self {
            book_id: Some(book_id),
            days: default_days,
            ..Default::default()
        }
    }

    pub fn for_edit(loan: &Loan, default_days: u32) -> Self {
        let days = loan
            .expected_return
            .map(|end| days_between(loan.loan_date, end))
            .and_then(|d| u32::try_from(d).ok())
            .filter(|d| *d > 0)
            .unwrap_or(default_days);
        Self {
            loan_id: Some(loan.id),
            book_id: loan.book_id(),
            borrower_name: loan.borrower_name.clone(),
            borrower_email: loan.borrower_email.clone(),
            borrower_phone: loan.borrower_phone.clone(),
            days,
            notes: loan.notes.clone(),
        }
    }

    /// Fresh loan for the same book and borrower as a returned one
    pub fn from_returned(loan: &Loan, default_days: u32) -> Self {
        Self {
            loan_id: None,
            book_id: loan.book_id(),
            borrower_name: loan.borrower_name.clone(),
            borrower_email: loan.borrower_email.clone(),
            borrower_phone: loan.borrower_phone.clone(),
            days: default_days,
            notes: Some(format!("Re-loan based on loan #{}", loan.id)),
        }
    }

    pub fn to_update(&self) -> LoanUpdate {
        LoanUpdate {
            borrower_name: self.borrower_name.clone(),
            borrower_email: self.borrower_email.clone(),
            borrower_phone: self.borrower_phone.clone(),
            days: Some(self.days),
            notes: self.notes.clone(),
        }
    }

    /// Turn the draft into a create request; `None` when no book is selected
    pub fn to_request(&self) -> Option<LoanRequest> {
        Some(LoanRequest {
            book_id: self.book_id?,
            borrower_name: self.borrower_name.trim().to_string(),
            borrower_email: self.borrower_email.trim().to_string(),
            borrower_phone: non_blank(self.borrower_phone.clone()),
            days: self.days,
            notes: non_blank(self.notes.clone()),
        })
    }
}

/// Loan list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanFilter {
    #[default]
    All,
    Active,
    Returned,
    Overdue,
}

impl FromStr for LoanFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(LoanFilter::All),
            "active" => Ok(LoanFilter::Active),
            "returned" => Ok(LoanFilter::Returned),
            "overdue" => Ok(LoanFilter::Overdue),
            other => Err(format!("unknown loan filter: {other}")),
        }
    }
}
