use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error reading '{source_name}': {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{source_name}': {message}")]
    Parse { source_name: String, message: String },

    #[error("Malformed catalog '{source_name}': missing <{missing}> element")]
    MalformedCatalog {
        source_name: String,
        missing: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Identifier of the source a load-time error refers to, if any.
    pub fn source_name(&self) -> Option<&str> {
        match self {
            CatalogError::Io { source_name, .. }
            | CatalogError::Parse { source_name, .. }
            | CatalogError::MalformedCatalog { source_name, .. } => Some(source_name),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
