pub mod config;
pub mod database;
pub mod error;
pub mod import;
pub mod providers;
pub mod show;
pub mod slug;

pub use config::{ConfigError, DatabaseConfig, TvdbConfig};
pub use database::{PostgresShowStore, ShowStore};
pub use error::{Result, ShowError};
pub use import::ShowImporter;
pub use providers::{ProviderError, ShowProvider, TvdbProvider};
pub use show::{EncodedAsset, Episode, SeriesDetails, ShowRecord};
