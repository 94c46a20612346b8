use async_trait::async_trait;

use crate::FetchError;

/// Extracts legal-document text from a web page. Implementations live
/// outside this workspace's scope; the core only needs the seam.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
