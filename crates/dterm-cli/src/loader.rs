//! `load-json` over HTTP(S), with local files as the fallback.

use std::time::Duration;

use dterm::{FileLoader, LoadError, RemoteLoader};
use reqwest::blocking::Client;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct HttpLoader {
    client: Client,
}

impl HttpLoader {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

fn is_http(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl RemoteLoader for HttpLoader {
    fn fetch(&self, url: &str) -> std::result::Result<String, LoadError> {
        if !is_http(url) {
            return FileLoader.fetch(url);
        }
        tracing::debug!(target: "dterm.cli", url, "fetching");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| LoadError::Http(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }
        response.text().map_err(|err| LoadError::Http(err.to_string()))
    }
}
