//! Data models shared with the Biblioteca Digital API

pub mod book;
pub mod datetime;
pub mod loan;
pub mod search;
pub mod stats;

pub use book::{Availability, Book, BookFilter, BookInput};
pub use loan::{Loan, LoanDraft, LoanFilter, LoanRequest, LoanStatus, LoanUpdate};
pub use search::{SearchKind, SearchResults};
pub use stats::{LibraryStats, ServiceStatus};
