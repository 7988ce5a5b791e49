//! Thin HTTP client for the shipping API.

use serde::Deserialize;
use shipping_core::BookingView;

use crate::http::{BookShippingRequest, BookShippingResponse, SHIPPING_PATH};

/// Failures surfaced by [`ShippingClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },
    /// The request could not be sent or the body could not be decoded.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct HealthBody {
    status: String,
}

/// Client bound to one server base URL, e.g. `http://localhost:8080`.
#[derive(Debug, Clone)]
pub struct ShippingClient {
    http: reqwest::Client,
    base_url: String,
}

impl ShippingClient {
    /// Create a client; a trailing slash on `base_url` is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn shipping_url(&self) -> String {
        format!("{}{SHIPPING_PATH}", self.base_url)
    }

    /// Book a shipment and return its id.
    pub async fn book_shipping(
        &self,
        origin: &str,
        destination: &str,
        weight: f64,
    ) -> Result<String, ClientError> {
        let request = BookShippingRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
            weight,
        };
        let response = self
            .http
            .post(self.shipping_url())
            .json(&request)
            .send()
            .await?;
        let body: BookShippingResponse = decode(response).await?;
        Ok(body.id)
    }

    /// Fetch a booking by id.
    pub async fn get_booking(&self, id: &str) -> Result<BookingView, ClientError> {
        let response = self
            .http
            .get(format!("{}/{id}", self.shipping_url()))
            .send()
            .await?;
        decode(response).await
    }

    /// Health status string reported by the server.
    pub async fn health(&self) -> Result<String, ClientError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        let body: HealthBody = decode(response).await?;
        Ok(body.status)
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await?;
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
