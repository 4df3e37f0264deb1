//! Retrieval of topology documents.

use std::future::Future;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::is_remote;

const USER_AGENT: &str = concat!("cwsbounds/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{location} returned status {status}")]
    Status { location: String, status: u16 },

    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        source: std::io::Error,
    },
}

impl SourceError {
    /// A 404 or missing file: the county simply has no data.
    pub fn is_not_found(&self) -> bool {
        match self {
            SourceError::Status { status, .. } => *status == 404,
            SourceError::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            SourceError::Http(_) => false,
        }
    }
}

/// Something that can return the raw bytes stored at a location.
pub trait BoundarySource {
    fn fetch(&self, location: &str) -> impl Future<Output = Result<Vec<u8>, SourceError>> + Send;
}

/// Fetches http(s) locations over the network and reads anything else from
/// the local filesystem.
#[derive(Clone)]
pub struct StaticSource {
    client: Client,
}

impl StaticSource {
    pub fn new() -> Result<Self, SourceError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl BoundarySource for StaticSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, SourceError> {
        if !is_remote(location) {
            debug!("Reading {}", location);
            return tokio::fs::read(location)
                .await
                .map_err(|source| SourceError::Io {
                    location: location.to_string(),
                    source,
                });
        }

        debug!("GET {}", location);
        let response = self.client.get(location).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status {
                location: location.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
