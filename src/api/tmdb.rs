//! TMDB (The Movie Database) API client
//!
//! Provides trending, discovery, search and detail metadata for movies and TV shows.
//! API docs: https://developer.themoviedb.org/docs

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::Gateway;
use crate::models::{
    CastMember, CatalogItem, DetailRecord, FilterState, Genre, MediaType, Video,
};

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default locale sent with every request
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Keys at least this long are v4 read tokens and go in the Authorization header
const BEARER_MIN_LEN: usize = 64;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Rate limited (429), retries exhausted")]
    RateLimited,

    #[error("Server error: {0}")]
    Server(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// TMDB API client
pub struct TmdbClient {
    api_key: String,
    language: String,
    base_url: String,
    client: reqwest::Client,
    /// Retries after a 429, on top of the first attempt
    max_retries: u32,
}

impl TmdbClient {
    /// Create a new TMDB client with the given credential and locale
    pub fn new(api_key: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            language: language.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
        }
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::new(api_key, DEFAULT_LANGUAGE)
        }
    }

    /// Override the locale parameter
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Make an authenticated GET request with retry logic for rate limits
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("language", self.language.clone()));
        let bearer = self.api_key.len() >= BEARER_MIN_LEN;
        if !bearer {
            query.push(("api_key", self.api_key.clone()));
        }

        let mut retries = 0;

        loop {
            debug!(endpoint, "GET");
            let mut request = self
                .client
                .get(&url)
                .query(&query)
                .header("Accept", "application/json");
            if bearer {
                request = request.header("Authorization", format!("Bearer {}", self.api_key));
            }

            let response = request.send().await.map_err(GatewayError::from)?;

            match response.status() {
                StatusCode::OK => {
                    let body = response.text().await.map_err(GatewayError::from)?;
                    let parsed: T = serde_json::from_str(&body).map_err(|e| {
                        GatewayError::InvalidResponse(format!("JSON parse error: {}", e))
                    })?;
                    return Ok(parsed);
                }
                StatusCode::NOT_FOUND => {
                    return Err(GatewayError::NotFound.into());
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    retries += 1;
                    if retries > self.max_retries {
                        return Err(GatewayError::RateLimited.into());
                    }

                    // Get Retry-After header or default to exponential backoff
                    let wait_secs = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(2u64.pow(retries));

                    warn!(endpoint, wait_secs, "rate limited, backing off");
                    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
                    continue;
                }
                status => {
                    return Err(GatewayError::Server(status.as_u16()).into());
                }
            }
        }
    }
}

#[async_trait]
impl Gateway for TmdbClient {
    async fn trending(&self, media_type: MediaType, page: u32) -> Result<Vec<CatalogItem>> {
        let endpoint = format!("/trending/{}/day", media_type.as_path());
        let response: PageResponse = self.get(&endpoint, &[("page", page.to_string())]).await?;
        Ok(response.into_items(media_type))
    }

    async fn discover(
        &self,
        media_type: MediaType,
        filter: &FilterState,
        page: u32,
    ) -> Result<Vec<CatalogItem>> {
        let endpoint = format!("/discover/{}", media_type.as_path());
        let params = discover_params(media_type, filter, page);
        let response: PageResponse = self.get(&endpoint, &params).await?;
        Ok(response.into_items(media_type))
    }

    async fn genres(&self, media_type: MediaType) -> Result<Vec<Genre>> {
        let endpoint = format!("/genre/{}/list", media_type.as_path());
        let response: GenresResponse = self.get(&endpoint, &[]).await?;
        Ok(response.genres)
    }

    async fn details(&self, media_type: MediaType, id: u64) -> Result<DetailRecord> {
        let endpoint = format!("/{}/{}", media_type.as_path(), id);
        let params = [("append_to_response", "credits,videos,similar".to_string())];
        let response: DetailResponse = self.get(&endpoint, &params).await?;
        Ok(response.into_record(media_type))
    }

    async fn search(&self, media_type: MediaType, query: &str) -> Result<Vec<CatalogItem>> {
        let endpoint = format!("/search/{}", media_type.as_path());
        let response: PageResponse = self.get(&endpoint, &[("query", query.to_string())]).await?;
        Ok(response.into_items(media_type))
    }
}

/// Query parameters for a discovery request; absent filters are omitted
pub fn discover_params(
    media_type: MediaType,
    filter: &FilterState,
    page: u32,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page", page.to_string()),
        ("sort_by", filter.sort.as_param().to_string()),
    ];

    if let Some(genre) = filter.genre {
        params.push(("with_genres", genre.to_string()));
    }
    if let Some(actor) = &filter.actor {
        params.push(("with_cast", actor.id.to_string()));
    }
    if filter.min_rating > 0.0 {
        params.push(("vote_average.gte", filter.min_rating.to_string()));
    }
    if let Some(year) = filter.year {
        let (gte, lte) = match media_type {
            MediaType::Movie => ("primary_release_date.gte", "primary_release_date.lte"),
            MediaType::Tv => ("first_air_date.gte", "first_air_date.lte"),
        };
        params.push((gte, format!("{}-01-01", year)));
        params.push((lte, format!("{}-12-31", year)));
    }

    params
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct PageResponse {
    #[serde(default)]
    results: Vec<ItemRaw>,
}

impl PageResponse {
    fn into_items(self, default_type: MediaType) -> Vec<CatalogItem> {
        self.results
            .into_iter()
            .filter_map(|r| r.into_item(default_type))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ItemRaw {
    id: u64,
    // Only trending/multi endpoints include it
    media_type: Option<String>,
    // Movies use "title", TV uses "name"
    title: Option<String>,
    name: Option<String>,
    // Movies use "release_date", TV uses "first_air_date"
    release_date: Option<String>,
    first_air_date: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f32>,
}

impl ItemRaw {
    fn into_item(self, default_type: MediaType) -> Option<CatalogItem> {
        let media_type = match self.media_type.as_deref() {
            None => default_type,
            Some(s) => MediaType::from_path(s)?, // drops "person" and friends
        };

        Some(CatalogItem {
            id: self.id,
            title: self.title.or(self.name).unwrap_or_default(),
            poster_path: self.poster_path,
            release_date: non_empty(self.release_date).or(non_empty(self.first_air_date)),
            vote_average: self.vote_average.unwrap_or(0.0),
            media_type,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenresResponse {
    #[serde(default)]
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f32>,
    #[serde(default)]
    genres: Vec<Genre>,
    runtime: Option<u32>,
    #[serde(default)]
    episode_run_time: Vec<u32>,
    overview: Option<String>,
    credits: Option<CreditsRaw>,
    videos: Option<VideosRaw>,
    similar: Option<PageResponse>,
}

impl DetailResponse {
    fn into_record(self, media_type: MediaType) -> DetailRecord {
        let runtime = self
            .runtime
            .or_else(|| self.episode_run_time.first().copied())
            .filter(|r| *r > 0);

        DetailRecord {
            id: self.id,
            title: self.title.or(self.name).unwrap_or_default(),
            poster_path: self.poster_path,
            release_date: non_empty(self.release_date).or(non_empty(self.first_air_date)),
            vote_average: self.vote_average.unwrap_or(0.0),
            media_type,
            genres: self.genres,
            runtime,
            overview: self.overview.unwrap_or_default(),
            cast: self
                .credits
                .map(|c| c.cast.into_iter().map(CastRaw::into_member).collect())
                .unwrap_or_default(),
            similar: self
                .similar
                .map(|s| s.into_items(media_type))
                .unwrap_or_default(),
            videos: self
                .videos
                .map(|v| v.results.into_iter().map(VideoRaw::into_video).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreditsRaw {
    #[serde(default)]
    cast: Vec<CastRaw>,
}

#[derive(Debug, Deserialize)]
struct CastRaw {
    id: u64,
    name: String,
    character: Option<String>,
    profile_path: Option<String>,
}

impl CastRaw {
    fn into_member(self) -> CastMember {
        CastMember {
            id: self.id,
            name: self.name,
            character: self.character.unwrap_or_default(),
            profile_path: self.profile_path,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VideosRaw {
    #[serde(default)]
    results: Vec<VideoRaw>,
}

#[derive(Debug, Deserialize)]
struct VideoRaw {
    key: String,
    site: String,
    #[serde(rename = "type")]
    kind: String,
    name: Option<String>,
}

impl VideoRaw {
    fn into_video(self) -> Video {
        Video {
            key: self.key,
            site: self.site,
            kind: self.kind,
            name: self.name.unwrap_or_default(),
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}
