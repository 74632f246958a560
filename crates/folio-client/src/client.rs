//! Content client capability and its HTTP implementation.

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use folio_model::{ContactAck, ContactSubmission, News, Profile, Publication};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// API base used when `FOLIO_API_BASE` is unset.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// A downloaded CV document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvDocument {
    pub content_type: Option<String>,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Everything the portfolio needs from the content API.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// The profile. [`ClientError::NotFound`] when none has been seeded.
    async fn fetch_profile(&self) -> Result<Profile>;

    /// The full, unfiltered publication collection.
    async fn fetch_publications(&self) -> Result<Vec<Publication>>;

    /// The full news collection.
    async fn fetch_news(&self) -> Result<Vec<News>>;

    /// Submit a contact message. Invalid submissions fail locally and are never sent.
    async fn submit_contact(&self, submission: &ContactSubmission) -> Result<ContactAck>;

    /// The CV document. [`ClientError::NotFound`] when not configured.
    async fn fetch_cv(&self) -> Result<CvDocument>;
}

/// [`ContentClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpContentClient {
    api_url: String,
    client: reqwest::Client,
}

impl HttpContentClient {
    /// Client for the API under `base` (`/api` is appended).
    pub fn new(base: &str) -> Result<Self> {
        let base = base.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "API base must be an http(s) URL, got {:?}",
                base
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            api_url: format!("{}/api", base),
            client,
        })
    }

    /// Client for the base named by `FOLIO_API_BASE`.
    pub fn from_env() -> Result<Self> {
        let base = std::env::var("FOLIO_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(&base)
    }

    /// Root URL of the API, including the `/api` prefix.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_url, endpoint)
    }

    async fn get(&self, endpoint: &str) -> Result<Response> {
        let response = self.client.get(self.url(endpoint)).send().await?;
        check_status(endpoint, response).await
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Map non-success statuses onto [`ClientError`].
async fn check_status(endpoint: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);

    match status {
        StatusCode::NOT_FOUND => Err(ClientError::NotFound(endpoint.to_string())),
        StatusCode::BAD_REQUEST => Err(ClientError::Rejected(message)),
        _ => {
            tracing::error!(
                endpoint,
                status = %status,
                body = %message,
                "unexpected response from content API"
            );
            Err(ClientError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Pull the file name out of a `Content-Disposition` header value.
fn disposition_file_name(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|part| {
        part.strip_prefix("filename=")
            .map(|name| name.trim_matches('"').to_string())
    })
}

#[async_trait]
impl ContentClient for HttpContentClient {
    #[tracing::instrument(skip(self), err(level = "debug"))]
    async fn fetch_profile(&self) -> Result<Profile> {
        Ok(self.get("profile").await?.json().await?)
    }

    #[tracing::instrument(skip(self), err)]
    async fn fetch_publications(&self) -> Result<Vec<Publication>> {
        Ok(self.get("publications").await?.json().await?)
    }

    #[tracing::instrument(skip(self), err)]
    async fn fetch_news(&self) -> Result<Vec<News>> {
        Ok(self.get("news").await?.json().await?)
    }

    #[tracing::instrument(skip(self, submission), err)]
    async fn submit_contact(&self, submission: &ContactSubmission) -> Result<ContactAck> {
        submission.validate()?;
        let response = self
            .client
            .post(self.url("contact"))
            .json(submission)
            .send()
            .await?;
        Ok(check_status("contact", response).await?.json().await?)
    }

    #[tracing::instrument(skip(self), err(level = "debug"))]
    async fn fetch_cv(&self) -> Result<CvDocument> {
        let response = self.get("cv").await?;
        let header = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(reqwest::header::CONTENT_TYPE);
        let file_name = header(reqwest::header::CONTENT_DISPOSITION)
            .as_deref()
            .and_then(disposition_file_name);
        let bytes = response.bytes().await?.to_vec();

        Ok(CvDocument {
            content_type,
            file_name,
            bytes,
        })
    }
}
