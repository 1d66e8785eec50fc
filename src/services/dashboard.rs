//! Dashboard: statistics and recent activity

use super::Controller;
use crate::{
    state,
    views::{ActivityEntry, DashboardView},
};

impl Controller {
    /// Fetch statistics, books and loans concurrently.
    ///
    /// The three requests are independent: one failing only leaves its own
    /// section as it was and adds a notification.
    pub async fn load_dashboard(&mut self) -> DashboardView {
        let repo = self.repository.clone();
        let (stats, books, loans) = tokio::join!(
            repo.library.stats(),
            repo.books.list(),
            repo.loans.list()
        );

        match stats {
            Ok(stats) => self.state.stats = Some(stats),
            Err(e) => self.report(&e),
        }
        match books {
            Ok(books) => self.state.replace_books(books),
            Err(e) => self.report(&e),
        }
        match loans {
            Ok(loans) => self.state.replace_loans(loans),
            Err(e) => self.report(&e),
        }

        self.dashboard_view()
    }

    /// Dashboard built from whatever the cache holds right now
    pub fn dashboard_view(&self) -> DashboardView {
        let recent = state::recent_activity(&self.state.loans, self.config.dashboard.recent_activity);
        DashboardView {
            stats: self.state.stats,
            recent_activity: recent.iter().map(ActivityEntry::from).collect(),
            connection: self.state.connection,
        }
    }
}
