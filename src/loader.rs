//! Reads the location and metadata inputs and decodes them into typed records.
//!
//! A source is either a local file or an `http(s)` URL. Decoding is strict:
//! the document must be a JSON array whose every element matches the record
//! schema, otherwise the whole load fails.

use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{LoadError, Result};
use crate::fetch::{FetchError, HttpClient, fetch_bytes};
use crate::model::{Location, Metadata};

/// Where a dataset is read from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    /// Strings starting with `http://` or `https://` are URLs; anything else
    /// is a filesystem path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Source::Url(raw.to_string())
        } else {
            Source::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
        }
    }
}

/// Both decoded inputs, in input order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub locations: Vec<Location>,
    pub metadata: Vec<Metadata>,
}

/// Returns the raw bytes of `source`.
#[tracing::instrument(skip(client, source), fields(source = %source))]
pub async fn read_source<C: HttpClient>(client: &C, source: &Source) -> Result<Vec<u8>> {
    let source_name = source.to_string();
    let bytes = match source {
        Source::Path(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|e| LoadError::DataSource {
                    source_name,
                    source: e,
                })?
        }
        Source::Url(url) => fetch_bytes(client, url).await.map_err(|e| match e {
            FetchError::InvalidUrl { reason, .. } => LoadError::InvalidUrl {
                source_name,
                reason,
            },
            FetchError::Http(e) => LoadError::Fetch {
                source_name,
                source: e,
            },
        })?,
    };

    debug!(bytes = bytes.len(), "Source bytes read");
    Ok(bytes)
}

/// Decodes a JSON array of `T`. Fails without partial results if any element
/// is malformed.
pub fn decode_records<T: DeserializeOwned>(source_name: &str, bytes: &[u8]) -> Result<Vec<T>> {
    serde_json::from_slice(bytes).map_err(|e| LoadError::Decode {
        source_name: source_name.to_string(),
        source: e,
    })
}

pub fn decode_locations(source_name: &str, bytes: &[u8]) -> Result<Vec<Location>> {
    decode_records(source_name, bytes)
}

pub fn decode_metadata(source_name: &str, bytes: &[u8]) -> Result<Vec<Metadata>> {
    decode_records(source_name, bytes)
}

/// Reads and decodes both datasets. Either failure aborts the load.
pub async fn load_dataset<C: HttpClient>(
    client: &C,
    locations: &Source,
    metadata: &Source,
) -> Result<Dataset> {
    let location_bytes = read_source(client, locations).await?;
    let locations = decode_locations(&locations.to_string(), &location_bytes)?;

    let metadata_bytes = read_source(client, metadata).await?;
    let metadata = decode_metadata(&metadata.to_string(), &metadata_bytes)?;

    info!(
        locations = locations.len(),
        metadata = metadata.len(),
        "Datasets loaded"
    );

    Ok(Dataset {
        locations,
        metadata,
    })
}
