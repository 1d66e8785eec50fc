//! Loan operations and the loan form

use serde::Serialize;

use super::{require, Controller};
use crate::{
    error::{AppError, AppResult},
    models::loan::{
        Loan, LoanDraft, LoanFilter, LoanRequest, LoanUpdate, LoanUpdateBody, MAX_LOAN_DAYS,
    },
    notify::Notification,
    state::{self, Tab},
    views::{BookChoice, LoanFormMode, LoanFormView, LoanRow},
};

/// Result of asking to update a loan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum LoanUpdateOutcome {
    Saved(Loan),
    /// The loan was returned, so nothing was sent. Start a new loan from this instead.
    NewLoanSuggested(LoanDraft),
}

impl Controller {
    pub async fn load_loans(&mut self) -> AppResult<()> {
        let loans = self.repository.loans.list().await?;
        self.state.replace_loans(loans);
        Ok(())
    }

    pub fn is_overdue(&self, loan: &Loan) -> bool {
        state::is_overdue(loan, self.now())
    }

    pub fn filter_loans(&self, filter: LoanFilter) -> Vec<Loan> {
        state::filter_loans(&self.state.loans, filter, self.now())
    }

    pub fn recent_activity(&self, n: usize) -> Vec<Loan> {
        state::recent_activity(&self.state.loans, n)
    }

    pub fn loan_rows(&self, filter: LoanFilter) -> Vec<LoanRow> {
        let now = self.now();
        self.filter_loans(filter)
            .into_iter()
            .map(|loan| LoanRow::new(loan, now))
            .collect()
    }

    /// Loans of one borrower, straight from the server; the cache is untouched
    pub async fn loans_by_email(&self, email: &str) -> AppResult<Vec<LoanRow>> {
        require(email, "Email")?;
        let now = self.now();
        let loans = self.repository.loans.list_by_email(email.trim()).await?;
        Ok(loans.into_iter().map(|loan| LoanRow::new(loan, now)).collect())
    }

    /// Book selector for the loan form: available books for a new loan,
    /// the whole catalog when editing
    pub fn loan_book_choices(&self, include_all: bool) -> Vec<BookChoice> {
        let books = if include_all {
            self.state.books.clone()
        } else {
            self.available_books()
        };
        books
            .iter()
            .map(|book| BookChoice::new(book, include_all))
            .collect()
    }

    pub fn new_loan_form(&self, book_id: Option<i32>) -> LoanFormView {
        let default_days = self.config.loans.default_days;
        let draft = match book_id {
            Some(id) => LoanDraft::for_book(id, default_days),
            None => LoanDraft {
                days: default_days,
                ..Default::default()
            },
        };
        LoanFormView {
            mode: LoanFormMode::Create,
            draft,
            choices: self.loan_book_choices(false),
        }
    }

    /// Jump from a book to a new loan for it
    pub fn quick_loan(&mut self, book_id: i32) -> LoanFormView {
        self.state.current_tab = Tab::Loans;
        self.new_loan_form(Some(book_id))
    }

    /// Open a cached loan for editing.
    ///
    /// A returned loan cannot be edited; the form comes back as a new loan
    /// for the same book and borrower instead.
    pub fn edit_loan(&mut self, id: i32) -> AppResult<LoanFormView> {
        let default_days = self.config.loans.default_days;
        let loan = self
            .state
            .loan(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} is not loaded", id)))?;

        if loan.is_returned() {
            self.notify(Notification::info(
                "This loan was returned. A new loan for the same book was prepared.",
            ));
            return Ok(LoanFormView {
                mode: LoanFormMode::NewFromReturned,
                draft: LoanDraft::from_returned(&loan, default_days),
                choices: self.loan_book_choices(false),
            });
        }

        Ok(LoanFormView {
            mode: LoanFormMode::Edit,
            draft: LoanDraft::for_edit(&loan, default_days),
            choices: self.loan_book_choices(true),
        })
    }

    pub async fn create_loan(&mut self, request: LoanRequest) -> AppResult<Loan> {
        require(&request.borrower_name, "Borrower name")?;
        require(&request.borrower_email, "Borrower email")?;
        check_days(request.days)?;

        let loan = self.repository.loans.create(&request).await?;
        tracing::info!("Loan created: id={} book={}", loan.id, request.book_id);
        self.notify(Notification::success("Loan created"));
        self.refresh_after_mutation(true, true).await;
        Ok(loan)
    }

    /// Update the borrower details, notes or duration of an active loan.
    ///
    /// Returned loans are refused without contacting the server.
    pub async fn update_loan(&mut self, id: i32, update: LoanUpdate) -> AppResult<LoanUpdateOutcome> {
        let default_days = self.config.loans.default_days;
        let loan = self
            .state
            .loan(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} is not loaded", id)))?;

        if loan.is_returned() {
            tracing::info!("Refusing to edit returned loan {}", id);
            self.notify(Notification::warning(
                "Returned loans cannot be edited. Create a new loan.",
            ));
            return Ok(LoanUpdateOutcome::NewLoanSuggested(LoanDraft::from_returned(
                &loan,
                default_days,
            )));
        }

        require(&update.borrower_name, "Borrower name")?;
        require(&update.borrower_email, "Borrower email")?;
        check_days(update.days.unwrap_or(default_days))?;

        let body = LoanUpdateBody::new(&loan, update, default_days)?;
        let updated = self.repository.loans.update(id, &body).await?;
        tracing::info!("Loan updated: id={}", id);
        self.notify(Notification::success("Loan updated"));
        self.refresh_after_mutation(false, true).await;
        Ok(LoanUpdateOutcome::Saved(updated))
    }

    /// Submit a loan form: update when it edits a loan, create otherwise
    pub async fn save_loan(&mut self, draft: LoanDraft) -> AppResult<LoanUpdateOutcome> {
        if let Some(id) = draft.loan_id {
            return self.update_loan(id, draft.to_update()).await;
        }
        let request = draft
            .to_request()
            .ok_or_else(|| AppError::Validation("Select a book".to_string()))?;
        self.create_loan(request).await.map(LoanUpdateOutcome::Saved)
    }

    pub async fn return_loan(&mut self, id: i32) -> AppResult<()> {
        self.repository.loans.return_loan(id).await?;
        tracing::info!("Loan returned: id={}", id);
        self.notify(Notification::success("Book returned"));
        self.refresh_after_mutation(true, true).await;
        Ok(())
    }

    /// Return whatever active loan the book has
    pub async fn return_by_book(&mut self, book_id: i32) -> AppResult<()> {
        self.repository.loans.return_by_book(book_id).await?;
        tracing::info!("Loan returned for book {}", book_id);
        self.notify(Notification::success("Book returned"));
        self.refresh_after_mutation(true, true).await;
        Ok(())
    }

    pub async fn delete_loan(&mut self, id: i32) -> AppResult<()> {
        self.repository.loans.delete(id).await?;
        tracing::info!("Loan deleted: id={}", id);
        self.notify(Notification::success("Loan deleted"));
        self.refresh_after_mutation(true, true).await;
        Ok(())
    }
}

/// Loan length must be between one day and [`MAX_LOAN_DAYS`]
fn check_days(days: u32) -> AppResult<()> {
    if days == 0 {
        return Err(AppError::Validation(
            "Loan must last at least one day".to_string(),
        ));
    }
    if days > MAX_LOAN_DAYS {
        return Err(AppError::Validation(format!(
            "Loan cannot last more than {MAX_LOAN_DAYS} days"
        )));
    }
    Ok(())
}
