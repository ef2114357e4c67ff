use async_trait::async_trait;

use crate::show::{EncodedAsset, SeriesDetails};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found")]
    NotFound,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[async_trait]
pub trait ShowProvider: Send + Sync {
    /// Resolve a normalized show name to the provider's canonical series id
    async fn search(&self, slug: &str) -> Result<String, ProviderError>;

    /// Fetch the full series document, episodes included
    async fn fetch_series(&self, id: &str) -> Result<SeriesDetails, ProviderError>;

    /// Fetch the poster image and encode it as a self-contained asset.
    /// An empty path yields the empty asset without a request.
    async fn fetch_poster(&self, poster_path: &str) -> Result<EncodedAsset, ProviderError>;

    /// Get the provider name
    fn name(&self) -> &'static str;
}
