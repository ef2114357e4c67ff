pub mod traits;
pub mod tvdb;

pub use traits::{ProviderError, ShowProvider};
pub use tvdb::TvdbProvider;
