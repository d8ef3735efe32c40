use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use super::{SignupStore, StoreError};
use crate::config::Config;
use crate::models::{Application, Event, NewApplication, Poll};

const EVENTS_TABLE: &str = "events";
const POLLS_TABLE: &str = "polls";
const APPLICATIONS_TABLE: &str = "applications";

/// PostgREST client for the hosted backend.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    rest_url: String,
    client: reqwest::Client,
}

impl RemoteStore {
    pub fn new(base_url: &str, anon_key: &str, timeout: Option<Duration>) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(anon_key)
            .map_err(|e| StoreError::Decode(format!("invalid access key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {anon_key}"))
            .map_err(|e| StoreError::Decode(format!("invalid access key: {e}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            client: builder.build()?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        Self::new(&config.backend_url, &config.backend_key, config.backend_timeout)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        query.extend(filters.iter().cloned());

        let resp = self.client.get(self.table_url(table)).query(&query).send().await?;
        let body = ok_body(resp).await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(format!("{table}: {e}")))
    }
}

/// Read the body of a response, turning non-2xx into `StoreError::Backend`.
async fn ok_body(resp: reqwest::Response) -> Result<String, StoreError> {
    let status = resp.status();
    let body = resp.text().await?;
    if status.is_success() {
        return Ok(body);
    }

    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body.clone()
            }
        });
    Err(StoreError::Backend { status: status.as_u16(), message })
}

#[async_trait]
impl SignupStore for RemoteStore {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        self.select(EVENTS_TABLE, &[]).await
    }

    async fn list_polls(&self) -> Result<Vec<Poll>, StoreError> {
        self.select(POLLS_TABLE, &[("order", "created_at.desc".to_string())]).await
    }

    async fn list_applications(&self, event_id: &str) -> Result<Vec<Application>, StoreError> {
        self.select(
            APPLICATIONS_TABLE,
            &[
                ("event_id", format!("eq.{event_id}")),
                ("order", "applied_at.asc".to_string()),
            ],
        )
        .await
    }

    async fn insert_application(&self, application: &NewApplication) -> Result<(), StoreError> {
        let resp = self
            .client
            .post(self.table_url(APPLICATIONS_TABLE))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=minimal")
            .json(&[application.to_row()])
            .send()
            .await?;
        ok_body(resp).await.map(|_| ())
    }
}
