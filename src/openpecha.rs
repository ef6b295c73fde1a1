use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_yaml::Mapping;

use crate::domain::PechaId;
use crate::error::MetaError;

pub trait MetadataClient: Send + Sync {
    /// Fetches the previously published meta.yml of a pecha as a mapping.
    fn fetch_meta(&self, pecha_id: &PechaId) -> Result<Mapping, MetaError>;
}

#[derive(Clone)]
pub struct OpenPechaHttpClient {
    client: Client,
}

impl OpenPechaHttpClient {
    pub fn new() -> Result<Self, MetaError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("pecha-meta-update/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| MetaError::MetadataHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| MetaError::MetadataHttp(err.to_string()))?;
        Ok(Self { client })
    }

    pub fn meta_url(pecha_id: &PechaId) -> String {
        format!(
            "https://raw.githubusercontent.com/OpenPecha/{id}/master/{id}.opf/meta.yml",
            id = pecha_id.as_str()
        )
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
            .unwrap_or_else(|_| "OpenPecha request failed".to_string());
        Err(MetaError::MetadataStatus { status, message })
    }
}

impl MetadataClient for OpenPechaHttpClient {
    fn fetch_meta(&self, pecha_id: &PechaId) -> Result<Mapping, MetaError> {
        let url = Self::meta_url(pecha_id);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| MetaError::MetadataHttp(err.to_string()))?;
        let response = Self::handle_status(response)?;
        let body = response
            .text()
            .map_err(|err| MetaError::MetadataHttp(err.to_string()))?;
        serde_yaml::from_str(&body).map_err(|err| MetaError::MetadataParse {
            pecha_id: pecha_id.to_string(),
            message: err.to_string(),
        })
    }
}
