use std::{fs, path::PathBuf, time::Duration};

use tracing::info;

use crate::error::{FetchError, Result};

/// User agent sent with remote requests.
pub const USER_AGENT: &str = concat!("apiforge/", env!("CARGO_PKG_VERSION"));

/// Where a source document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// An HTTP(S) URL.
    Url(String),
    /// A local file.
    Path(PathBuf),
}

impl Location {
    /// Interpret `text` as a URL when it has an http(s) scheme, otherwise as a path.
    pub fn parse(text: &str) -> Self {
        if text.starts_with("http://") || text.starts_with("https://") {
            Self::Url(text.to_string())
        } else {
            Self::Path(PathBuf::from(text))
        }
    }

    /// Human readable form used in logs and frontmatter.
    pub fn display(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

/// Retrieve the raw document. One request or file read, no retries.
pub fn fetch(location: &Location, timeout: Duration) -> Result<String> {
    match location {
        Location::Url(url) => fetch_url(url, timeout),
        Location::Path(path) => {
            info!(path = %path.display(), "reading document");
            fs::read_to_string(path).map_err(|source| {
                FetchError::Read {
                    path: path.display().to_string(),
                    source,
                }
                .into()
            })
        }
    }
}

fn fetch_url(url: &str, timeout: Duration) -> Result<String> {
    info!(url, "fetching document");
    let http = |source| FetchError::Http {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(http)?;
    let response = client.get(url).send().map_err(http)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        }
        .into());
    }
    Ok(response.text().map_err(http)?)
}
