//! Library-wide endpoints (`/biblioteca`)

use reqwest::Method;

use super::ApiClient;
use crate::{
    error::AppResult,
    models::stats::{LibraryStats, ServiceStatus},
};

#[derive(Debug, Clone)]
pub struct LibraryRepository {
    api: ApiClient,
}

impl LibraryRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Health check. Any 2xx counts; an unparseable body yields an empty status.
    pub async fn status(&self) -> AppResult<ServiceStatus> {
        let response = self
            .api
            .send::<()>(Method::GET, &["biblioteca", "status"], &[], None)
            .await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }

    pub async fn stats(&self) -> AppResult<LibraryStats> {
        self.api.get(&["biblioteca", "estatisticas"], &[]).await
    }
}
