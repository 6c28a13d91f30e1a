use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Failures raised while reading or decoding an input dataset.
///
/// `DataSource` and `Fetch` mean the input could not be obtained at all;
/// `Decode` means it was obtained but is not an array of well-formed records.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read data source '{source_name}': {source}")]
    DataSource {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot fetch data source '{source_name}': {source}")]
    Fetch {
        source_name: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid URL for data source '{source_name}': {reason}")]
    InvalidUrl { source_name: String, reason: String },

    #[error("malformed records in '{source_name}': {source}")]
    Decode {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// True when the input itself was missing or unreachable.
    pub fn is_data_source(&self) -> bool {
        matches!(
            self,
            LoadError::DataSource { .. } | LoadError::Fetch { .. } | LoadError::InvalidUrl { .. }
        )
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, LoadError::Decode { .. })
    }

    pub fn source_name(&self) -> &str {
        match self {
            LoadError::DataSource { source_name, .. }
            | LoadError::Fetch { source_name, .. }
            | LoadError::InvalidUrl { source_name, .. }
            | LoadError::Decode { source_name, .. } => source_name,
        }
    }
}
