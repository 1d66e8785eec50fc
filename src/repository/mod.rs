//! Data access layer: the Biblioteca Digital REST API.
//!
//! Every resource repository shares one [`ApiClient`], the same way database
//! repositories share a connection pool. Nothing here caches; callers own the
//! read model.

pub mod books;
pub mod library;
pub mod loans;

use reqwest::{header, Method, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::ApiConfig,
    error::{extract_error_message, AppError, AppResult},
};

/// Thin wrapper over `reqwest::Client` bound to the API root
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::Validation(format!("invalid API base URL {}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "invalid API base URL {}",
                config.base_url
            )));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        // No timeout: the transport defaults apply
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL; each segment is percent-encoded on its own
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send a request and fail on any non-success status
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> AppResult<reqwest::Response> {
        let url = self.url(segments);
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), url.clone());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", method, url, e);
            AppError::Network(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);
        tracing::warn!("{} {} returned {}: {}", method, url, status, message);
        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Request without a body; the response body is ignored
    pub async fn execute(&self, method: Method, segments: &[&str]) -> AppResult<()> {
        self.send::<()>(method, segments, &[], None).await?;
        Ok(())
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let response = self.send::<()>(Method::GET, segments, query, None).await?;
        decode(response).await
    }

    /// GET that maps 404, an empty body and `null` to `None`
    pub async fn get_optional<T: DeserializeOwned>(&self, segments: &[&str]) -> AppResult<Option<T>> {
        let response = match self.send::<()>(Method::GET, segments, &[], None).await {
            Ok(response) => response,
            Err(AppError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Ok(None)
            }
            Err(e) => return Err(e),
        };

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str::<Option<T>>(&text)?)
    }

    pub async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> AppResult<T> {
        let response = self.send(method, segments, query, body).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Container for all resource repositories
#[derive(Debug, Clone)]
pub struct Repository {
    pub api: ApiClient,
    pub books: books::BooksRepository,
    pub loans: loans::LoansRepository,
    pub library: library::LibraryRepository,
}

impl Repository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            books: books::BooksRepository::new(api.clone()),
            loans: loans::LoansRepository::new(api.clone()),
            library: library::LibraryRepository::new(api.clone()),
            api,
        }
    }

    pub fn from_config(config: &ApiConfig) -> AppResult<Self> {
        Ok(Self::new(ApiClient::new(config)?))
    }
}
