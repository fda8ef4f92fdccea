use thiserror::Error;

/// Failures while retrieving the source document.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP request could not be completed.
    #[error("Request to {url} failed: {source}")]
    Http {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Request to {url} returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },

    /// A local document could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that was read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON of the expected shape.
    #[error("Malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors produced by a generation run.
#[derive(Error, Debug)]
pub enum ForgeError {
    /// The source document could not be retrieved.
    #[error("Failed to fetch document: {0}")]
    Fetch(#[from] FetchError),

    /// A section lacks the structure its kind requires.
    #[error("Failed to extract section {section_name}: {reason}")]
    Extraction {
        /// Heading of the section being extracted.
        section_name: String,
        /// What was missing or malformed.
        reason: String,
    },

    /// The target file has no usable marker pair.
    #[error("Failed to splice generated code: {0}")]
    Splice(String),

    /// The formatter could not be started or reported failure.
    #[error("Formatter error: {0}")]
    Formatter(String),

    /// Reading or writing the target file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ForgeError {
    /// Build an extraction error for the named section.
    pub fn extraction(section_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Extraction {
            section_name: section_name.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ForgeError>;
