use async_trait::async_trait;

use crate::error::Result;
use crate::show::ShowRecord;

/// Storage collaborator for fully assembled shows. Uniqueness on the show id
/// is the store's guarantee; a duplicate insert surfaces as
/// [`ShowError::Conflict`](crate::ShowError::Conflict), never as a
/// backend-specific error code.
#[async_trait]
pub trait ShowStore: Send + Sync {
    /// Persist a show exactly once. Fails with `Conflict` if the id exists.
    async fn insert(&self, show: &ShowRecord) -> Result<()>;

    /// Look up a single show by its external series id.
    async fn find_by_id(&self, id: &str) -> Result<Option<ShowRecord>>;

    /// List shows, optionally restricted to those carrying `genre`.
    /// Unfiltered listings are capped at a bounded default size.
    async fn find_many(&self, genre: Option<&str>) -> Result<Vec<ShowRecord>>;
}
