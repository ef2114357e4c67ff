//! Fake collaborators for exercising the import pipeline without a network
//! or a database. The provider records call counts so tests can assert which
//! stages ran; the store enforces the uniqueness guarantee under a lock.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use showdeck_core::{
    EncodedAsset, Episode, ProviderError, SeriesDetails, ShowError, ShowProvider, ShowRecord,
    ShowStore,
};

pub enum SearchOutcome {
    Found(String),
    Missing,
}

pub enum PosterOutcome {
    Encoded(EncodedAsset),
    TransportFailure,
}

pub struct FakeProvider {
    search_outcome: SearchOutcome,
    series: SeriesDetails,
    poster_outcome: PosterOutcome,
    search_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    poster_calls: AtomicUsize,
}

impl FakeProvider {
    /// A provider that resolves `series` and serves `poster` for it.
    pub fn resolving(series: SeriesDetails, poster: EncodedAsset) -> Self {
        Self {
            search_outcome: SearchOutcome::Found(series.id.clone()),
            series,
            poster_outcome: PosterOutcome::Encoded(poster),
            search_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            poster_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_missing_series(mut self) -> Self {
        self.search_outcome = SearchOutcome::Missing;
        self
    }

    pub fn with_poster_failure(mut self) -> Self {
        self.poster_outcome = PosterOutcome::TransportFailure;
        self
    }

    pub fn search_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn poster_count(&self) -> usize {
        self.poster_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ShowProvider for FakeProvider {
    async fn search(&self, _slug: &str) -> Result<String, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        match &self.search_outcome {
            SearchOutcome::Found(id) => Ok(id.clone()),
            SearchOutcome::Missing => Err(ProviderError::NotFound),
        }
    }

    async fn fetch_series(&self, _id: &str) -> Result<SeriesDetails, ProviderError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.series.clone())
    }

    async fn fetch_poster(&self, poster_path: &str) -> Result<EncodedAsset, ProviderError> {
        self.poster_calls.fetch_add(1, Ordering::SeqCst);
        if poster_path.is_empty() {
            return Ok(EncodedAsset::empty());
        }
        match &self.poster_outcome {
            PosterOutcome::Encoded(asset) => Ok(asset.clone()),
            PosterOutcome::TransportFailure => Err(ProviderError::ApiError(
                "banner host returned status: 504".to_string(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// In-memory `ShowStore` with the same uniqueness contract as the real one.
#[derive(Default)]
pub struct MemoryStore {
    shows: Mutex<HashMap<String, ShowRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shows.lock().unwrap().len()
    }

    pub fn get(&self, id: &str) -> Option<ShowRecord> {
        self.shows.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl ShowStore for MemoryStore {
    async fn insert(&self, show: &ShowRecord) -> Result<(), ShowError> {
        let mut shows = self.shows.lock().unwrap();
        if shows.contains_key(&show.id) {
            return Err(ShowError::Conflict(show.name.clone()));
        }
        shows.insert(show.id.clone(), show.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ShowRecord>, ShowError> {
        Ok(self.shows.lock().unwrap().get(id).cloned())
    }

    async fn find_many(&self, genre: Option<&str>) -> Result<Vec<ShowRecord>, ShowError> {
        let shows = self.shows.lock().unwrap();
        let mut result: Vec<ShowRecord> = shows
            .values()
            .filter(|show| genre.is_none_or(|g| show.genres.iter().any(|x| x == g)))
            .cloned()
            .collect();
        result.truncate(12);
        Ok(result)
    }
}

pub fn sample_series() -> SeriesDetails {
    SeriesDetails {
        id: "72099".to_string(),
        name: "Dexter".to_string(),
        airs_day_of_week: Some("Sunday".to_string()),
        airs_time: Some("9:00 PM".to_string()),
        first_aired: NaiveDate::from_ymd_opt(2006, 10, 1),
        genres: vec!["Drama".to_string(), "Crime".to_string()],
        network: Some("Showtime".to_string()),
        overview: Some("Dexter Morgan leads a double life.".to_string()),
        rating: Some(9.0),
        rating_count: Some(527),
        status: Some("Ended".to_string()),
        poster_path: Some("posters/72099-1.jpg".to_string()),
        episodes: vec![
            Episode {
                season: Some(1),
                episode_number: Some(1),
                episode_name: Some("Dexter".to_string()),
                first_aired: NaiveDate::from_ymd_opt(2006, 10, 1),
                overview: None,
            },
            Episode {
                season: Some(1),
                episode_number: Some(2),
                episode_name: Some("Crocodile".to_string()),
                first_aired: NaiveDate::from_ymd_opt(2006, 10, 8),
                overview: None,
            },
        ],
    }
}

pub fn jpeg_poster() -> EncodedAsset {
    EncodedAsset::from_bytes("image/jpeg", &[0xFF, 0xD8])
}
