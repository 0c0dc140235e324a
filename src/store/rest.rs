//! PostgREST-backed ticket store.
//!
//! The managed database exposes the `wash_items` table over HTTP with
//! equality filters (`column=eq.value`), `order=` sorting, and single-object
//! responses negotiated via the `Accept` header. One credentialed client is
//! built at startup and reused for every request.

use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use super::{StoreError, TicketStore};
use crate::models::{Ticket, TicketPayload, TicketStatus};

const TABLE: &str = "wash_items";

/// Media type that makes the backend return (and demand) exactly one row.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

pub struct RestStore {
    client: Client,
    table_url: Url,
}

impl RestStore {
    /// Builds the long-lived client from the endpoint URL and service
    /// credential. The credential rides along as both the `apikey` header
    /// and a bearer token.
    pub fn new(base_url: &str, service_key: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();

        let mut apikey = HeaderValue::from_str(service_key)
            .context("storage service key is not a valid header value")?;
        apikey.set_sensitive(true);
        headers.insert("apikey", apikey);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {service_key}"))
            .context("storage service key is not a valid header value")?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let table_url = Url::parse(&format!(
            "{}/rest/v1/{}",
            base_url.trim_end_matches('/'),
            TABLE
        ))
        .context("invalid storage endpoint URL")?;

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to build storage HTTP client")?;

        Ok(Self { client, table_url })
    }

    /// Reads a success body as JSON or surfaces the backend's error message.
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::backend_error(response).await)
        }
    }

    /// Single-object reads: the backend answers 406 when zero (or more than
    /// one) rows match the filter.
    async fn read_single(response: Response) -> Result<Ticket, StoreError> {
        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_ACCEPTABLE => Err(StoreError::RowNotFound),
            _ => Err(Self::backend_error(response).await),
        }
    }

    /// Backend errors carry a `message` field; fall back to the raw body.
    async fn backend_error(response: Response) -> StoreError {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: String,
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.message)
            .unwrap_or(body);

        if message.is_empty() {
            StoreError::Backend(format!("storage request failed with status {status}"))
        } else {
            StoreError::Backend(message)
        }
    }
}

#[async_trait::async_trait]
impl TicketStore for RestStore {
    async fn list(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>, StoreError> {
        let mut request = self
            .client
            .get(self.table_url.clone())
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        if let Some(status) = status {
            let filter = format!("eq.{status}");
            request = request.query(&[("status", filter.as_str())]);
        }
        Self::read_json(request.send().await?).await
    }

    async fn get(&self, id: Uuid) -> Result<Ticket, StoreError> {
        let filter = format!("eq.{id}");
        let response = self
            .client
            .get(self.table_url.clone())
            .query(&[("select", "*"), ("id", filter.as_str())])
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;
        Self::read_single(response).await
    }

    async fn insert(&self, payload: TicketPayload) -> Result<Ticket, StoreError> {
        let response = self
            .client
            .post(self.table_url.clone())
            .header(ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await?;
        Self::read_single(response).await
    }

    async fn update(&self, id: Uuid, payload: TicketPayload) -> Result<Ticket, StoreError> {
        let filter = format!("eq.{id}");
        let response = self
            .client
            .patch(self.table_url.clone())
            .query(&[("id", filter.as_str())])
            .header(ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await?;
        Self::read_single(response).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let filter = format!("eq.{id}");
        let response = self
            .client
            .delete(self.table_url.clone())
            .query(&[("id", filter.as_str())])
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::backend_error(response).await)
        }
    }
}
