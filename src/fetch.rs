pub mod client;

pub use client::HttpFetcher;

use crate::Result;
use async_trait::async_trait;
use url::Url;

/// Anything that can return the text of a playlist by URL.
///
/// No retries: a failure is reported for that one request only.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    async fn fetch_text(&self, url: &Url) -> Result<String>;
}
