use crate::calendar::iso_date;
use anyhow::Context;
use reqwest::blocking::Client as HttpClient;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, Date, OffsetDateTime};
use url::Url;

pub(crate) trait OrderSubmitter {
    fn submit(&self, date: Date) -> Result<(), OrderError>;
}

#[derive(Debug, Error)]
pub(crate) enum OrderError {
    #[error("failed to send order request")]
    Transport(#[source] reqwest::Error),
    #[error("order endpoint responded with {0}")]
    Status(StatusCode),
    #[error("failed to format order timestamp")]
    Timestamp(#[from] time::error::Format),
}

impl OrderError {
    /// The message shown to the user when an order fails
    pub(crate) fn user_message(&self) -> &'static str {
        match self {
            OrderError::Transport(_) => "Network error. Please check your connection.",
            OrderError::Status(_) | OrderError::Timestamp(_) => {
                "Failed to place order. Please try again."
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
struct OrderRequest {
    date: String,
    timestamp: String,
}

impl OrderRequest {
    fn new(date: Date, now: OffsetDateTime) -> Result<OrderRequest, OrderError> {
        Ok(OrderRequest {
            date: iso_date(date),
            timestamp: now.format(&Rfc3339)?,
        })
    }
}

/// Client for the remote order endpoint.  Each order is a single `POST`; there
/// are no retries.
#[derive(Clone, Debug)]
pub(crate) struct OrderClient {
    endpoint: Url,
    http: HttpClient,
}

impl OrderClient {
    pub(crate) fn new(endpoint: Url, timeout: Option<Duration>) -> anyhow::Result<OrderClient> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;
        Ok(OrderClient { endpoint, http })
    }

    pub(crate) fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl OrderSubmitter for OrderClient {
    fn submit(&self, date: Date) -> Result<(), OrderError> {
        let body = OrderRequest::new(date, OffsetDateTime::now_utc())?;
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .map_err(OrderError::Transport)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(OrderError::Status(status))
        }
    }
}
