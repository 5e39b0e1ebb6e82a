//! Minimal Azure Cosmos DB (SQL API) REST client.
//!
//! Covers what the seeder needs from the database: reading a database to
//! confirm connectivity and upserting one document at a time into a
//! container. Batching, retries and queries are left to callers.
//!
//! # API Reference
//!
//! - Base URL: the account endpoint, e.g. `https://<account>.documents.azure.com:443/`
//! - Authentication: master key token in `Authorization` (see [`auth`])
//! - API Version: `2018-12-31` (specified via `x-ms-version` header)

pub mod auth;

use std::sync::Arc;

use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use fabric_seed_core::{Document, SchemaError};

use self::auth::{MasterKey, ResourceType, format_date};
use crate::config::CosmosConfig;

/// REST API version sent with every request.
const API_VERSION: &str = "2018-12-31";

/// Errors that can occur when talking to Cosmos DB.
#[derive(Debug, Error)]
pub enum CosmosError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Database, container or document does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Key rejected or lacks permission.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Master key could not be decoded.
    #[error("Invalid master key: {0}")]
    InvalidKey(String),

    /// Endpoint and resource path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Document could not be encoded.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Error body returned by the service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// System properties of a database.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseProperties {
    pub id: String,
    #[serde(rename = "_rid", default)]
    pub rid: Option<String>,
    #[serde(rename = "_ts", default)]
    pub ts: Option<i64>,
}

/// Whether an upsert inserted or overwrote a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertStatus {
    Created,
    Replaced,
}

/// Result of a successful upsert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpsertOutcome {
    pub status: UpsertStatus,
    /// Request units consumed, from `x-ms-request-charge`.
    pub request_charge: Option<f64>,
}

/// Cosmos DB account client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct CosmosClient {
    inner: Arc<CosmosClientInner>,
}

#[derive(Debug)]
struct CosmosClientInner {
    http: reqwest::Client,
    endpoint: Url,
    key: MasterKey,
}

impl CosmosClient {
    /// Create a client for an account endpoint and master key.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not valid base64 or the HTTP client fails
    /// to build.
    pub fn new(endpoint: Url, key: &SecretString) -> Result<Self, CosmosError> {
        let key = MasterKey::from_base64(key)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("fabric-seed/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(CosmosClientInner {
                http,
                endpoint,
                key,
            }),
        })
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`CosmosClient::new`].
    pub fn from_config(config: &CosmosConfig) -> Result<Self, CosmosError> {
        Self::new(config.endpoint.clone(), &config.primary_key)
    }

    /// The account endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Handle to a database. Does not contact the service.
    #[must_use]
    pub fn database(&self, id: impl Into<String>) -> DatabaseClient {
        DatabaseClient {
            client: self.clone(),
            id: id.into(),
        }
    }

    /// Start a signed request against `resource_link`.
    fn request(
        &self,
        method: Method,
        path: &str,
        resource_type: ResourceType,
        resource_link: &str,
    ) -> Result<RequestBuilder, CosmosError> {
        let url = self.inner.endpoint.join(path)?;
        let date = format_date(Utc::now());
        let authorization =
            self.inner
                .key
                .authorization(&method, resource_type, resource_link, &date)?;

        Ok(self
            .inner
            .http
            .request(method, url)
            .header(AUTHORIZATION, authorization)
            .header("x-ms-date", date)
            .header("x-ms-version", API_VERSION))
    }

    /// Map an unsuccessful response to an error.
    async fn parse_error(response: reqwest::Response) -> CosmosError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| match (body.code, body.message) {
                (Some(code), Some(message)) => Some(format!("{code}: {message}")),
                (None, Some(message)) => Some(message),
                (Some(code), None) => Some(code),
                (None, None) => None,
            })
            .unwrap_or(text);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CosmosError::Unauthorized(message),
            StatusCode::NOT_FOUND => CosmosError::NotFound(message),
            _ => CosmosError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// Handle to one database.
#[derive(Clone, Debug)]
pub struct DatabaseClient {
    client: CosmosClient,
    id: String,
}

impl DatabaseClient {
    /// The database id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    fn link(&self) -> String {
        format!("dbs/{}", self.id)
    }

    /// Handle to a container in this database. Does not contact the service.
    #[must_use]
    pub fn container(&self, id: impl Into<String>) -> ContainerClient {
        ContainerClient {
            database: self.clone(),
            id: id.into(),
        }
    }

    /// Read the database's properties. Fails if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::NotFound`] for a missing database,
    /// [`CosmosError::Unauthorized`] for a rejected key, or a transport error.
    #[instrument(skip(self), fields(database = %self.id))]
    pub async fn read(&self) -> Result<DatabaseProperties, CosmosError> {
        let link = self.link();
        let response = self
            .client
            .request(Method::GET, &link, ResourceType::Databases, &link)?
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CosmosClient::parse_error(response).await);
        }

        let properties: DatabaseProperties = response.json().await?;
        debug!(rid = ?properties.rid, "Database read");
        Ok(properties)
    }
}

/// Handle to one container.
#[derive(Clone, Debug)]
pub struct ContainerClient {
    database: DatabaseClient,
    id: String,
}

impl ContainerClient {
    /// The container id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    fn link(&self) -> String {
        format!("{}/colls/{}", self.database.link(), self.id)
    }

    /// Build the signed upsert request for one document without sending it.
    ///
    /// # Errors
    ///
    /// Returns error if the document cannot be serialized or the request
    /// cannot be built.
    pub fn prepare_upsert<D: Document>(&self, document: &D) -> Result<reqwest::Request, CosmosError> {
        let link = self.link();
        let body = fabric_seed_core::to_json(document)?;
        let partition_key = serde_json::to_string(&[document.partition_key()])
            .map_err(|source| SchemaError::Serialize {
                schema: D::NAME,
                source,
            })?;

        let request = self
            .database
            .client
            .request(
                Method::POST,
                &format!("{link}/docs"),
                ResourceType::Documents,
                &link,
            )?
            .header(CONTENT_TYPE, "application/json")
            .header("x-ms-documentdb-is-upsert", "True")
            .header("x-ms-documentdb-partitionkey", partition_key)
            .body(body)
            .build()?;

        Ok(request)
    }

    /// Insert or replace one document, keyed by its `id` within its
    /// partition.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service rejects the document.
    #[instrument(
        skip(self, document),
        fields(container = %self.id, kind = %D::KIND, id = document.id())
    )]
    pub async fn upsert_item<D: Document>(&self, document: &D) -> Result<UpsertOutcome, CosmosError> {
        let request = self.prepare_upsert(document)?;
        let response = self.database.client.inner.http.execute(request).await?;

        let status = match response.status() {
            StatusCode::CREATED => UpsertStatus::Created,
            StatusCode::OK => UpsertStatus::Replaced,
            _ => return Err(CosmosClient::parse_error(response).await),
        };

        let request_charge = response
            .headers()
            .get("x-ms-request-charge")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());

        debug!(?status, ?request_charge, "Document upserted");
        Ok(UpsertOutcome {
            status,
            request_charge,
        })
    }
}
