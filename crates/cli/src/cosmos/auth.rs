//! Master-key request signing for the Cosmos DB REST API.
//!
//! Each request carries an `Authorization` token built from an HMAC-SHA256
//! over the lowercase verb, resource type, the resource link, and the
//! lowercase `x-ms-date` value.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretSlice, SecretString};
use sha2::Sha256;

use super::CosmosError;

type HmacSha256 = Hmac<Sha256>;

/// Kind of resource a request addresses, as named in the signature payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Databases,
    Containers,
    Documents,
}

impl ResourceType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Databases => "dbs",
            Self::Containers => "colls",
            Self::Documents => "docs",
        }
    }
}

/// Decoded account master key.
pub struct MasterKey(SecretSlice<u8>);

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey([REDACTED])")
    }
}

impl MasterKey {
    /// Decode the base64 key shown in the Azure portal.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::InvalidKey`] if the key is not valid base64.
    pub fn from_base64(key: &SecretString) -> Result<Self, CosmosError> {
        let bytes = STANDARD
            .decode(key.expose_secret().trim())
            .map_err(|e| CosmosError::InvalidKey(e.to_string()))?;
        Ok(Self(SecretSlice::from(bytes)))
    }

    /// Build the URL-encoded `Authorization` header value for one request.
    ///
    /// `resource_link` is the path of the addressed resource without a
    /// leading slash; for feed operations such as creating a document it is
    /// the parent container's path.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::InvalidKey`] if the key cannot seed the MAC.
    pub fn authorization(
        &self,
        method: &Method,
        resource_type: ResourceType,
        resource_link: &str,
        date: &str,
    ) -> Result<String, CosmosError> {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            method.as_str().to_lowercase(),
            resource_type.as_str(),
            resource_link,
            date.to_lowercase()
        );

        let mut mac = HmacSha256::new_from_slice(self.0.expose_secret())
            .map_err(|e| CosmosError::InvalidKey(e.to_string()))?;
        mac.update(payload.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        let token = format!("type=master&ver=1.0&sig={signature}");
        Ok(urlencoding::encode(&token).into_owned())
    }
}

/// Format a time as the RFC 1123 value expected in `x-ms-date`.
#[must_use]
pub fn format_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
