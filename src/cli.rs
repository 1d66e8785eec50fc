//! CLI argument definitions for the `biblioteca` client.

use clap::{Args, Parser, Subcommand};

use biblioteca_client::models::{BookFilter, BookInput, LoanFilter, LoanRequest, LoanUpdate, SearchKind};

#[derive(Parser)]
#[command(
    name = "biblioteca",
    version,
    about = "Biblioteca Digital client - catalog and loan tracking"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,

    /// API root (overrides configuration).
    #[arg(long = "api-url", global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Log level (overrides configuration; RUST_LOG wins over both).
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Check that the server answers.
    Status,

    /// Statistics and recent activity.
    Dashboard,

    /// List books.
    Books {
        #[arg(long, default_value = "all")]
        filter: BookFilter,
    },

    /// Manage a single book.
    #[command(subcommand)]
    Book(BookCommand),

    /// List loans.
    Loans {
        #[arg(long, default_value = "all")]
        filter: LoanFilter,

        /// Only loans of this borrower (asked to the server directly).
        #[arg(long)]
        email: Option<String>,
    },

    /// Manage a single loan.
    #[command(subcommand)]
    Loan(LoanCommand),

    /// Search the catalog.
    Search {
        term: String,

        /// title, author, isbn or general.
        #[arg(long, default_value = "general")]
        kind: SearchKind,
    },
}

#[derive(Subcommand)]
pub enum BookCommand {
    Show { id: i32 },
    Add(BookArgs),
    Update {
        id: i32,
        #[command(flatten)]
        book: BookArgs,
    },
    /// Flip availability.
    Toggle { id: i32 },
    Delete { id: i32 },
    /// Fill in missing fields from external ISBN sources.
    Enrich { id: i32 },
    /// Show what external sources know about an ISBN, without saving.
    Preview { isbn: String },
}

#[derive(Args)]
pub struct BookArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub isbn: String,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub publisher: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl From<BookArgs> for BookInput {
    fn from(args: BookArgs) -> Self {
        BookInput {
            title: args.title,
            author: args.author,
            isbn: args.isbn,
            publication_year: args.year,
            publisher: args.publisher,
            description: args.description,
        }
    }
}

#[derive(Subcommand)]
pub enum LoanCommand {
    /// Empty loan form, optionally for one book.
    New {
        #[arg(long)]
        book: Option<i32>,
    },
    Create {
        #[arg(long)]
        book: i32,
        #[command(flatten)]
        borrower: BorrowerArgs,
    },
    /// Open a loan for editing (returned loans yield a new-loan form).
    Edit { id: i32 },
    Update {
        id: i32,
        #[command(flatten)]
        borrower: BorrowerArgs,
    },
    Return { id: i32 },
    /// Return the active loan of a book.
    ReturnBook { book_id: i32 },
    Delete { id: i32 },
}

#[derive(Args)]
pub struct BorrowerArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
    /// Loan duration in days.
    #[arg(long)]
    pub days: Option<u32>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl BorrowerArgs {
    pub fn into_request(self, book_id: i32, default_days: u32) -> LoanRequest {
        LoanRequest {
            book_id,
            borrower_name: self.name,
            borrower_email: self.email,
            borrower_phone: self.phone,
            days: self.days.unwrap_or(default_days),
            notes: self.notes,
        }
    }

    pub fn into_update(self) -> LoanUpdate {
        LoanUpdate {
            borrower_name: self.name,
            borrower_email: self.email,
            borrower_phone: self.phone,
            days: self.days,
            notes: self.notes,
        }
    }
}
