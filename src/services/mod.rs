//! Client state controller.
//!
//! The [`Controller`] owns the read model, talks to the API through the
//! repository layer and collects notifications for the presentation layer.
//! Its operations are split by area:
//!
//! - `catalog`: book loads and mutations
//! - `loans`: loan loads, mutations and the loan form
//! - `search`: the four search shapes
//! - `dashboard`: statistics + recent activity, loaded concurrently
//!
//! Mutations never patch the cache. They issue one request and, on success,
//! reload whatever the server may have changed.

pub mod catalog;
pub mod dashboard;
pub mod loans;
pub mod search;

use chrono::{Local, NaiveDateTime};

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    models::{book::BookFilter, loan::LoanFilter},
    notify::Notification,
    repository::Repository,
    state::{CatalogState, ConnectionStatus, Tab},
    views::View,
};

pub struct Controller {
    repository: Repository,
    config: AppConfig,
    state: CatalogState,
    notifications: Vec<Notification>,
    fixed_now: Option<NaiveDateTime>,
}

impl Controller {
    pub fn new(repository: Repository, config: AppConfig) -> Self {
        Self {
            repository,
            config,
            state: CatalogState::default(),
            notifications: Vec::new(),
            fixed_now: None,
        }
    }

    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let repository = Repository::from_config(&config.api)?;
        Ok(Self::new(repository, config))
    }

    /// Pin the clock used for overdue checks
    pub fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.fixed_now = Some(now);
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.fixed_now.unwrap_or_else(|| Local::now().naive_local())
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Drain the notification outbox
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Turn a failure into a notification. The cache is left as it was.
    pub(crate) fn report(&mut self, error: &AppError) {
        match error {
            AppError::Validation(msg) | AppError::BusinessRule(msg) => {
                tracing::info!("Refused locally: {}", msg)
            }
            AppError::Network(e) => tracing::error!("Request failed: {}", e),
            other => tracing::warn!("Operation failed: {}", other),
        }
        self.notify(Notification::from_error(error));
    }

    /// Single health check against `/biblioteca/status`
    pub async fn check_connection(&mut self) -> ConnectionStatus {
        let status = match self.repository.library.status().await {
            Ok(_) => ConnectionStatus::Online,
            Err(e) => {
                tracing::warn!("Connection check failed: {}", e);
                ConnectionStatus::Offline
            }
        };
        self.state.connection = status;
        status
    }

    pub fn current_tab(&self) -> Tab {
        self.state.current_tab
    }

    /// Record the tab and load what it shows
    pub async fn switch_tab(&mut self, tab: Tab) -> AppResult<View> {
        self.state.current_tab = tab;
        Ok(match tab {
            Tab::Dashboard => View::Dashboard(self.load_dashboard().await),
            Tab::Books => {
                self.load_books().await?;
                View::Books(self.book_rows(BookFilter::All))
            }
            Tab::Loans => {
                self.load_loans().await?;
                View::Loans(self.loan_rows(LoanFilter::All))
            }
            Tab::Search => {
                self.clear_search();
                View::Unchanged
            }
        })
    }

    /// Reload what a successful mutation may have changed.
    ///
    /// Runs the reloads concurrently; each one fails on its own and only
    /// produces a notification. Statistics are refreshed too while the
    /// dashboard is showing.
    pub(crate) async fn refresh_after_mutation(&mut self, books: bool, loans: bool) {
        let with_stats = self.state.current_tab == Tab::Dashboard;
        let repo = self.repository.clone();

        let (books_result, loans_result, stats_result) = tokio::join!(
            async {
                if books {
                    Some(repo.books.list().await)
                } else {
                    None
                }
            },
            async {
                if loans {
                    Some(repo.loans.list().await)
                } else {
                    None
                }
            },
            async {
                if with_stats {
                    Some(repo.library.stats().await)
                } else {
                    None
                }
            },
        );

        match books_result {
            Some(Ok(list)) => self.state.replace_books(list),
            Some(Err(e)) => self.report(&e),
            None => {}
        }
        match loans_result {
            Some(Ok(list)) => self.state.replace_loans(list),
            Some(Err(e)) => self.report(&e),
            None => {}
        }
        match stats_result {
            Some(Ok(stats)) => self.state.stats = Some(stats),
            Some(Err(e)) => self.report(&e),
            None => {}
        }
    }
}

/// Reject blank required text fields before anything is sent
pub(crate) fn require(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
