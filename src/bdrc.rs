use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::domain::WorkId;
use crate::error::MetaError;

pub trait CatalogClient: Send + Sync {
    /// Fetches the serialized relation graph (Turtle) describing a work.
    fn fetch_graph(&self, work_id: &WorkId) -> Result<String, MetaError>;
}

#[derive(Clone)]
pub struct BdrcHttpClient {
    client: Client,
}

impl BdrcHttpClient {
    pub fn new() -> Result<Self, MetaError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("pecha-meta-update/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| MetaError::CatalogHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| MetaError::CatalogHttp(err.to_string()))?;
        Ok(Self { client })
    }

    pub fn graph_url(work_id: &WorkId) -> String {
        format!("http://purl.bdrc.io/graph/{}.ttl", work_id.as_str())
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, MetaError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "BDRC request failed".to_string());
        Err(MetaError::CatalogStatus { status, message })
    }
}

impl CatalogClient for BdrcHttpClient {
    fn fetch_graph(&self, work_id: &WorkId) -> Result<String, MetaError> {
        let url = Self::graph_url(work_id);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| MetaError::CatalogHttp(err.to_string()))?;
        let response = Self::handle_status(response)?;
        response
            .text()
            .map_err(|err| MetaError::CatalogHttp(err.to_string()))
    }
}
