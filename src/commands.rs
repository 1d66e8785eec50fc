//! Command dispatcher.
//!
//! Every user action is a [`Command`]; [`Controller::dispatch`] maps it to its
//! handler and returns the [`View`] to show. Dispatch never fails: errors
//! end up in the notification outbox and the view is [`View::Unchanged`].

use crate::{
    error::AppResult,
    models::{
        book::{BookFilter, BookInput},
        loan::{LoanDraft, LoanFilter, LoanRequest, LoanUpdate},
        search::SearchKind,
    },
    services::{loans::LoanUpdateOutcome, Controller},
    state::Tab,
    views::{LoanFormMode, LoanFormView, View},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CheckConnection,
    SwitchTab(Tab),
    LoadDashboard,

    LoadBooks,
    FilterBooks(BookFilter),
    ShowBook { id: i32 },
    PreviewIsbn { isbn: String },
    CreateBook(BookInput),
    UpdateBook { id: i32, input: BookInput },
    ToggleAvailability { id: i32 },
    DeleteBook { id: i32 },
    EnrichBook { id: i32 },

    LoadLoans,
    FilterLoans(LoanFilter),
    LoansByEmail { email: String },
    NewLoan,
    QuickLoan { book_id: i32 },
    CreateLoan(LoanRequest),
    EditLoan { id: i32 },
    UpdateLoan { id: i32, update: LoanUpdate },
    SaveLoan(LoanDraft),
    ReturnLoan { id: i32 },
    ReturnByBook { book_id: i32 },
    DeleteLoan { id: i32 },

    Search { term: String, kind: SearchKind },
    ClearSearch,
}

impl Controller {
    pub async fn dispatch(&mut self, command: Command) -> View {
        tracing::debug!("Dispatching {:?}", command);
        match self.handle(command).await {
            Ok(view) => view,
            Err(e) => {
                self.report(&e);
                View::Unchanged
            }
        }
    }

    async fn handle(&mut self, command: Command) -> AppResult<View> {
        let view = match command {
            Command::CheckConnection => View::Connection(self.check_connection().await),
            Command::SwitchTab(tab) => self.switch_tab(tab).await?,
            Command::LoadDashboard => View::Dashboard(self.load_dashboard().await),

            Command::LoadBooks => {
                self.load_books().await?;
                View::Books(self.book_rows(BookFilter::All))
            }
            Command::FilterBooks(filter) => View::Books(self.book_rows(filter)),
            Command::ShowBook { id } => View::Book(self.get_book(id).await?),
            Command::PreviewIsbn { isbn } => View::Book(self.preview_isbn(&isbn).await?),
            Command::CreateBook(input) => {
                self.create_book(input).await?;
                View::Books(self.book_rows(BookFilter::All))
            }
            Command::UpdateBook { id, input } => {
                self.update_book(id, input).await?;
                View::Books(self.book_rows(BookFilter::All))
            }
            Command::ToggleAvailability { id } => {
                self.toggle_availability(id).await?;
                View::Books(self.book_rows(BookFilter::All))
            }
            Command::DeleteBook { id } => {
                self.delete_book(id).await?;
                View::Books(self.book_rows(BookFilter::All))
            }
            Command::EnrichBook { id } => {
                self.enrich_book(id).await?;
                View::Books(self.book_rows(BookFilter::All))
            }

            Command::LoadLoans => {
                self.load_loans().await?;
                View::Loans(self.loan_rows(LoanFilter::All))
            }
            Command::FilterLoans(filter) => View::Loans(self.loan_rows(filter)),
            Command::LoansByEmail { email } => View::Loans(self.loans_by_email(&email).await?),
            Command::NewLoan => View::LoanForm(self.new_loan_form(None)),
            Command::QuickLoan { book_id } => View::LoanForm(self.quick_loan(book_id)),
            Command::CreateLoan(request) => {
                self.create_loan(request).await?;
                View::Loans(self.loan_rows(LoanFilter::All))
            }
            Command::EditLoan { id } => View::LoanForm(self.edit_loan(id)?),
            Command::UpdateLoan { id, update } => {
                let outcome = self.update_loan(id, update).await?;
                self.outcome_view(outcome)
            }
            Command::SaveLoan(draft) => {
                let outcome = self.save_loan(draft).await?;
                self.outcome_view(outcome)
            }
            Command::ReturnLoan { id } => {
                self.return_loan(id).await?;
                View::Loans(self.loan_rows(LoanFilter::All))
            }
            Command::ReturnByBook { book_id } => {
                self.return_by_book(book_id).await?;
                View::Loans(self.loan_rows(LoanFilter::All))
            }
            Command::DeleteLoan { id } => {
                self.delete_loan(id).await?;
                View::Loans(self.loan_rows(LoanFilter::All))
            }

            Command::Search { term, kind } => View::Search(self.search(&term, kind).await?),
            Command::ClearSearch => {
                self.clear_search();
                View::Unchanged
            }
        };
        Ok(view)
    }

    fn outcome_view(&self, outcome: LoanUpdateOutcome) -> View {
        match outcome {
            LoanUpdateOutcome::Saved(_) => View::Loans(self.loan_rows(LoanFilter::All)),
            LoanUpdateOutcome::NewLoanSuggested(draft) => View::LoanForm(LoanFormView {
                mode: LoanFormMode::NewFromReturned,
                draft,
                choices: self.loan_book_choices(false),
            }),
        }
    }
}
