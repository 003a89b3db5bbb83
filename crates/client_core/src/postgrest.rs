//! reqwest-backed [`RegistroApi`] speaking to the Supabase PostgREST endpoints.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::EntityKind,
    error::{ApiError, ApiException},
    protocol::{Acreedor, AcreedorInsert, Apoderado, Deudor, DeudorInsert, Proceso},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::api::RegistroApi;

const PROCESO_TABLE: &str = "proceso";
const APODERADOS_TABLE: &str = "apoderados";
const SINGLE_OBJECT_MEDIA_TYPE: &str = "application/vnd.pgrst.object+json";

#[derive(Debug, Error)]
pub enum PostgrestError {
    #[error("invalid supabase url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    ClientBuild(reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiException),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct PostgrestClient {
    http: Client,
    rest_url: Url,
    api_key: String,
}

impl PostgrestClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, PostgrestError> {
        Self::with_http_client(Client::new(), base_url, api_key)
    }

    pub fn with_timeout(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PostgrestError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PostgrestError::ClientBuild)?;
        Self::with_http_client(http, base_url, api_key)
    }

    pub fn with_http_client(
        http: Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, PostgrestError> {
        Ok(Self {
            http,
            rest_url: rest_url(base_url)?,
            api_key: api_key.into(),
        })
    }

    pub fn rest_url(&self) -> &Url {
        &self.rest_url
    }

    fn table_url(&self, table: &str) -> Result<Url, PostgrestError> {
        self.rest_url
            .join(table)
            .map_err(|source| PostgrestError::InvalidUrl {
                url: format!("{}{table}", self.rest_url),
                source,
            })
    }

    async fn list<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, PostgrestError> {
        let url = self.table_url(table)?;
        debug!(table, "listing rows");
        let res = self
            .http
            .get(url)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        decode(res).await
    }

    async fn insert<P: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        payload: &P,
    ) -> Result<T, PostgrestError> {
        let url = self.table_url(table)?;
        debug!(table, "inserting row");
        let res = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .header(header::ACCEPT, SINGLE_OBJECT_MEDIA_TYPE)
            .json(payload)
            .send()
            .await?;
        decode(res).await
    }
}

fn rest_url(base_url: &str) -> Result<Url, PostgrestError> {
    let trimmed = base_url.trim();
    let invalid = |source: url::ParseError| PostgrestError::InvalidUrl {
        url: trimmed.to_string(),
        source,
    };
    let mut url = Url::parse(trimmed).map_err(invalid)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.join("rest/v1/").map_err(invalid)
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, PostgrestError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }

    let bytes = res.bytes().await?;
    let body = serde_json::from_slice::<ApiError>(&bytes)
        .unwrap_or_else(|_| ApiError::new(String::from_utf8_lossy(&bytes).trim()));
    Err(ApiException::from_body(status.as_u16(), body).into())
}

#[async_trait]
impl RegistroApi for PostgrestClient {
    async fn list_procesos(&self) -> Result<Vec<Proceso>> {
        Ok(self.list(PROCESO_TABLE).await?)
    }

    async fn list_apoderados(&self) -> Result<Vec<Apoderado>> {
        Ok(self.list(APODERADOS_TABLE).await?)
    }

    async fn create_deudor(&self, payload: DeudorInsert) -> Result<Deudor> {
        Ok(self.insert(EntityKind::Deudor.table(), &payload).await?)
    }

    async fn create_acreedor(&self, payload: AcreedorInsert) -> Result<Acreedor> {
        Ok(self.insert(EntityKind::Acreedor.table(), &payload).await?)
    }
}

#[cfg(test)]
#[path = "tests/postgrest_tests.rs"]
mod tests;
