use std::sync::Arc;

use tracing::{debug, info};

use crate::database::ShowStore;
use crate::error::{Result, ShowError};
use crate::providers::{ProviderError, ShowProvider};
use crate::show::ShowRecord;
use crate::slug;

/// Orchestrates the show-import pipeline: normalize the requested name,
/// resolve it to a series id, fetch the series document, encode the poster,
/// assemble the record, and hand it to storage exactly once.
///
/// Stages run strictly in sequence; the first failure aborts the rest and
/// nothing partial reaches the store. The importer holds no per-request
/// state, so independent imports may run concurrently; dropping the returned
/// future cancels the in-flight request and prevents later stages from
/// starting.
pub struct ShowImporter {
    provider: Arc<dyn ShowProvider>,
    store: Arc<dyn ShowStore>,
}

impl ShowImporter {
    pub fn new(provider: Arc<dyn ShowProvider>, store: Arc<dyn ShowStore>) -> Self {
        Self { provider, store }
    }

    pub async fn import(&self, show_name: &str) -> Result<ShowRecord> {
        let slug = slug::normalize(show_name);
        if slug.is_empty() {
            return Err(ShowError::NotFound(show_name.to_string()));
        }
        debug!("Importing '{}' as '{}'", show_name, slug);

        let series_id = self.provider.search(&slug).await.map_err(|e| match e {
            ProviderError::NotFound => ShowError::NotFound(show_name.to_string()),
            other => other.into(),
        })?;
        debug!("Resolved '{}' to series {}", slug, series_id);

        let details = self.provider.fetch_series(&series_id).await?;

        let poster = self
            .provider
            .fetch_poster(details.poster_path.as_deref().unwrap_or_default())
            .await?;

        let show = ShowRecord::assemble(details, poster);
        self.store.insert(&show).await?;

        info!("Imported show {} ({})", show.name, show.id);

        Ok(show)
    }
}
