use super::ManifestSource;
use crate::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// HTTP client for fetching playlists.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    headers: Vec<(String, String)>,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, headers: Vec<(String, String)>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hlstail/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, headers))
    }

    pub fn with_client(client: Client, headers: Vec<(String, String)>) -> Self {
        Self { client, headers }
    }

    /// Fetch content from a URL with the configured extra headers.
    pub async fn fetch(&self, url: &Url) -> Result<Bytes> {
        let mut request = self.client.get(url.as_str());

        for (key, value) in &self.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::FetchFailed {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl ManifestSource for HttpFetcher {
    async fn fetch_text(&self, url: &Url) -> Result<String> {
        let bytes = self.fetch(url).await?;
        tracing::debug!(%url, bytes = bytes.len(), "Fetched playlist");

        String::from_utf8(bytes.to_vec()).map_err(|e| Error::FetchFailed {
            url: url.to_string(),
            reason: format!("Invalid UTF-8: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let fetcher = HttpFetcher::new(Duration::from_secs(2), Vec::new()).unwrap();
        // Port 9 on the loopback interface has nothing listening.
        let url = Url::parse("http://127.0.0.1:9/master.m3u8").unwrap();

        let err = fetcher.fetch_text(&url).await.unwrap_err();
        assert!(err.is_fetch());
        assert!(err.is_recoverable());
    }
}
