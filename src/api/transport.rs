use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Form fields or query parameters, in the order they are sent.
pub type Params = Vec<(&'static str, String)>;

/// Status line and body of an explorer answer, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("couldn't connect: {0}")]
    Connect(String),

    #[error(transparent)]
    Http(reqwest::Error),
}

/// The only place the explorer is actually reached.
///
/// Implementations must not log `params`: they carry the API key.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_form(
        &self,
        url: &Url,
        form: &Params,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError>;

    async fn get(
        &self,
        url: &Url,
        query: &Params,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError>;
}

#[derive(Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    fn classify(err: reqwest::Error, timeout: Duration) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(timeout)
        } else if err.is_connect() {
            TransportError::Connect(err.without_url().to_string())
        } else {
            TransportError::Http(err.without_url())
        }
    }

    async fn read(
        response: reqwest::Response,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| Self::classify(err, timeout))?;
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(
        &self,
        url: &Url,
        form: &Params,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(url.clone())
            .header(header::ACCEPT, "application/json")
            .form(form)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| Self::classify(err, timeout))?;

        Self::read(response, timeout).await
    }

    async fn get(
        &self,
        url: &Url,
        query: &Params,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| Self::classify(err, timeout))?;

        Self::read(response, timeout).await
    }
}
