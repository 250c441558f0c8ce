//! Outbound client for the external address-search service.
//!
//! The console's visit form looks up road addresses by keyword. This
//! client proxies that call so the browser never talks to the upstream
//! directly (the upstream key stays server-side).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ConsoleError;

/// One address candidate returned by the lookup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddressHit {
    /// Full road-name address.
    pub road_address: String,
    /// Legacy lot-number address, when the upstream supplies one.
    #[serde(default)]
    pub jibun_address: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub zip_code: Option<String>,
}

/// Shape of the upstream JSON body this client understands.
#[derive(Debug, Deserialize)]
struct UpstreamResponse {
    #[serde(default)]
    results: Vec<AddressHit>,
}

/// HTTP client for the address-search upstream.
#[derive(Debug, Clone)]
pub struct AddressClient {
    http: reqwest::Client,
    base_url: String,
}

impl AddressClient {
    /// Builds a client with the given base URL and per-request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Internal`] if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, ConsoleError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ConsoleError::Internal(format!("http client: {e}")))?;
        Ok(Self { http, base_url })
    }

    /// Searches addresses by keyword.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] on an empty keyword and
    /// [`ConsoleError::AddressLookup`] when the upstream fails or
    /// returns an unparseable body.
    pub async fn search(&self, keyword: &str) -> Result<Vec<AddressHit>, ConsoleError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ConsoleError::Validation(
                "search keyword must not be empty".to_string(),
            ));
        }

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("keyword", keyword), ("resultType", "json")])
            .send()
            .await
            .map_err(|e| ConsoleError::AddressLookup(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ConsoleError::AddressLookup(format!(
                "upstream returned {}",
                response.status()
            )));
        }

        let body: UpstreamResponse = response
            .json()
            .await
            .map_err(|e| ConsoleError::AddressLookup(format!("bad upstream body: {e}")))?;
        Ok(body.results)
    }
}
