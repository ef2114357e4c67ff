use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One episode as carried by the series document. Episodes have no identity
/// of their own; they live and die with their parent show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub season: Option<u32>,
    pub episode_number: Option<u32>,
    pub episode_name: Option<String>,
    pub first_aired: Option<NaiveDate>,
    pub overview: Option<String>,
}

/// Series metadata as returned by the fetch stage, poster still unresolved.
///
/// `genres` never contains empty strings; `episodes` keeps the document's
/// ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDetails {
    pub id: String,
    pub name: String,
    pub airs_day_of_week: Option<String>,
    pub airs_time: Option<String>,
    pub first_aired: Option<NaiveDate>,
    pub genres: Vec<String>,
    pub network: Option<String>,
    pub overview: Option<String>,
    pub rating: Option<f32>,
    pub rating_count: Option<u32>,
    pub status: Option<String>,
    pub poster_path: Option<String>,
    pub episodes: Vec<Episode>,
}

/// A self-contained image representation: a mime type plus base64 payload,
/// renderable as a `data:` URI with no further fetching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedAsset {
    pub mime_type: String,
    pub payload: String,
}

impl EncodedAsset {
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: STANDARD.encode(bytes),
        }
    }

    /// The "no image" sentinel used when a series carries no poster path.
    pub fn empty() -> Self {
        Self {
            mime_type: String::new(),
            payload: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn data_uri(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("data:{};base64,{}", self.mime_type, self.payload)
    }
}

/// The fully assembled record handed to storage, identified by the external
/// series id. Built exactly once per import and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowRecord {
    pub id: String,
    pub name: String,
    pub airs_day_of_week: Option<String>,
    pub airs_time: Option<String>,
    pub first_aired: Option<NaiveDate>,
    pub genres: Vec<String>,
    pub network: Option<String>,
    pub overview: Option<String>,
    pub rating: Option<f32>,
    pub rating_count: Option<u32>,
    pub status: Option<String>,
    /// `data:` URI of the poster, empty when the series has no image.
    pub poster: String,
    pub episodes: Vec<Episode>,
}

impl ShowRecord {
    /// Replace the relative poster path with its encoded asset to form the
    /// record that gets persisted.
    pub fn assemble(details: SeriesDetails, poster: EncodedAsset) -> Self {
        Self {
            id: details.id,
            name: details.name,
            airs_day_of_week: details.airs_day_of_week,
            airs_time: details.airs_time,
            first_aired: details.first_aired,
            genres: details.genres,
            network: details.network,
            overview: details.overview,
            rating: details.rating,
            rating_count: details.rating_count,
            status: details.status,
            poster: poster.data_uri(),
            episodes: details.episodes,
        }
    }
}
