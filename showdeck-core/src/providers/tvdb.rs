use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use reqwest::Client;

use super::traits::{ProviderError, ShowProvider};
use crate::config::TvdbConfig;
use crate::show::{EncodedAsset, Episode, SeriesDetails};

/// Client for the legacy TheTVDB XML API: name search, per-series metadata
/// document, and the banner host for poster images.
pub struct TvdbProvider {
    config: TvdbConfig,
    client: Arc<Client>,
}

impl TvdbProvider {
    pub fn new(config: TvdbConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }
}

#[async_trait]
impl ShowProvider for TvdbProvider {
    async fn search(&self, slug: &str) -> Result<String, ProviderError> {
        if slug.is_empty() {
            return Err(ProviderError::NotFound);
        }

        tracing::info!("TVDB search for: {}", slug);

        let url = format!("{}/GetSeries.php", self.config.api_base);
        let response = self
            .client
            .get(&url)
            .query(&[("seriesname", slug)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "TVDB search returned status: {}",
                response.status()
            )));
        }

        let body = response.bytes().await?;
        let candidates = parse_series_refs(&body)?;

        tracing::info!("TVDB search returned {} candidates", candidates.len());

        first_series_id(candidates).ok_or(ProviderError::NotFound)
    }

    async fn fetch_series(&self, id: &str) -> Result<SeriesDetails, ProviderError> {
        tracing::debug!("TVDB fetch for series {}", id);

        let url = format!(
            "{}/{}/series/{}/all/en.xml",
            self.config.api_base, self.config.api_key, id
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "TVDB series endpoint returned status: {}",
                response.status()
            )));
        }

        let body = response.bytes().await?;
        let details = parse_series_document(&body)?;

        tracing::info!(
            "TVDB series {} resolved with {} episodes",
            details.name,
            details.episodes.len()
        );

        Ok(details)
    }

    async fn fetch_poster(&self, poster_path: &str) -> Result<EncodedAsset, ProviderError> {
        if poster_path.is_empty() {
            return Ok(EncodedAsset::empty());
        }

        let url = format!(
            "{}/{}",
            self.config.banner_base.trim_end_matches('/'),
            poster_path.trim_start_matches('/')
        );
        tracing::debug!("TVDB poster request URL: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "TVDB banner host returned status: {}",
                response.status()
            )));
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = response.bytes().await?;

        Ok(EncodedAsset::from_bytes(mime_type, &bytes))
    }

    fn name(&self) -> &'static str {
        "TheTVDB"
    }
}

/// Extract the `seriesid` of every `<Series>` element in a search response.
///
/// The endpoint returns zero, one, or many `<Series>` elements; collecting
/// them into a list here keeps that structural quirk out of the callers.
fn parse_series_refs(xml: &[u8]) -> Result<Vec<String>, ProviderError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut ids = Vec::new();
    let mut buf = Vec::new();

    let mut in_series = false;
    let mut current_element = String::new();
    let mut current_id: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
                if name == "series" {
                    in_series = true;
                    current_id = None;
                } else {
                    current_element = name;
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
                if name == "series" {
                    in_series = false;
                    ids.push(current_id.take().unwrap_or_default());
                } else {
                    current_element.clear();
                }
            }
            Ok(Event::Text(e)) => {
                if in_series && current_element == "seriesid" {
                    let text = e.unescape().unwrap_or_default().to_string();
                    if !text.is_empty() {
                        current_id = Some(text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ProviderError::Parse(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(ids)
}

/// The first candidate's id wins; anything else about the result list is
/// ignored. An empty id counts as absent.
fn first_series_id(candidates: Vec<String>) -> Option<String> {
    match candidates.into_iter().next() {
        Some(id) if !id.is_empty() => Some(id),
        _ => None,
    }
}

#[derive(Default)]
struct SeriesFields {
    id: Option<String>,
    name: Option<String>,
    airs_day_of_week: Option<String>,
    airs_time: Option<String>,
    first_aired: Option<String>,
    genre: Option<String>,
    network: Option<String>,
    overview: Option<String>,
    rating: Option<String>,
    rating_count: Option<String>,
    status: Option<String>,
    poster: Option<String>,
}

#[derive(Default)]
struct EpisodeFields {
    season: Option<String>,
    episode_number: Option<String>,
    episode_name: Option<String>,
    first_aired: Option<String>,
    overview: Option<String>,
}

impl EpisodeFields {
    fn build(self) -> Episode {
        Episode {
            season: self.season.as_deref().and_then(parse_number),
            episode_number: self.episode_number.as_deref().and_then(parse_number),
            episode_name: self.episode_name,
            first_aired: self.first_aired.as_deref().and_then(parse_date),
            overview: self.overview,
        }
    }
}

enum Section {
    Outside,
    Series,
    SkippedSeries,
    Episode,
}

/// Parse a full series document: one `<Series>` element (the first, if the
/// endpoint ever returns several) plus `<Episode>` elements in document
/// order. Tag names are matched case-insensitively. A document without a
/// series id and name is malformed; everything else coerces leniently.
fn parse_series_document(xml: &[u8]) -> Result<SeriesDetails, ProviderError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut section = Section::Outside;
    let mut series_done = false;
    let mut current_element = String::new();

    let mut fields = SeriesFields::default();
    let mut episode: Option<EpisodeFields> = None;
    let mut episodes = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
                match name.as_str() {
                    "series" => {
                        section = if series_done {
                            Section::SkippedSeries
                        } else {
                            Section::Series
                        };
                    }
                    "episode" => {
                        section = Section::Episode;
                        episode = Some(EpisodeFields::default());
                    }
                    _ => current_element = name,
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
                match name.as_str() {
                    "series" => {
                        if matches!(section, Section::Series) {
                            series_done = true;
                        }
                        section = Section::Outside;
                    }
                    "episode" => {
                        if let Some(fields) = episode.take() {
                            episodes.push(fields.build());
                        }
                        section = Section::Outside;
                    }
                    _ => current_element.clear(),
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                if text.is_empty() {
                    buf.clear();
                    continue;
                }
                match section {
                    Section::Series => match current_element.as_str() {
                        "id" => fields.id = Some(text),
                        "seriesname" => fields.name = Some(text),
                        "airs_dayofweek" => fields.airs_day_of_week = Some(text),
                        "airs_time" => fields.airs_time = Some(text),
                        "firstaired" => fields.first_aired = Some(text),
                        "genre" => fields.genre = Some(text),
                        "network" => fields.network = Some(text),
                        "overview" => fields.overview = Some(text),
                        "rating" => fields.rating = Some(text),
                        "ratingcount" => fields.rating_count = Some(text),
                        "status" => fields.status = Some(text),
                        "poster" => fields.poster = Some(text),
                        _ => {}
                    },
                    Section::Episode => {
                        if let Some(ref mut ep) = episode {
                            match current_element.as_str() {
                                "seasonnumber" => ep.season = Some(text),
                                "episodenumber" => ep.episode_number = Some(text),
                                "episodename" => ep.episode_name = Some(text),
                                "firstaired" => ep.first_aired = Some(text),
                                "overview" => ep.overview = Some(text),
                                _ => {}
                            }
                        }
                    }
                    Section::Outside | Section::SkippedSeries => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ProviderError::Parse(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    let id = fields
        .id
        .ok_or_else(|| ProviderError::Parse("series document missing id".to_string()))?;
    let name = fields
        .name
        .ok_or_else(|| ProviderError::Parse("series document missing name".to_string()))?;

    Ok(SeriesDetails {
        id,
        name,
        airs_day_of_week: fields.airs_day_of_week,
        airs_time: fields.airs_time,
        first_aired: fields.first_aired.as_deref().and_then(parse_date),
        genres: fields.genre.as_deref().map(split_genres).unwrap_or_default(),
        network: fields.network,
        overview: fields.overview,
        rating: fields.rating.as_deref().and_then(parse_number),
        rating_count: fields.rating_count.as_deref().and_then(parse_number),
        status: fields.status,
        poster_path: fields.poster,
        episodes,
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

/// Split the pipe-delimited genre field, dropping empty segments (TheTVDB
/// wraps the list in pipes, e.g. `|Drama|Mystery|`).
fn split_genres(raw: &str) -> Vec<String> {
    raw.split('|')
        .filter(|genre| !genre.is_empty())
        .map(str::to_string)
        .collect()
}
