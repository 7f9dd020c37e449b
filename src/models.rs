//! Data structures and types for Fluxify
//!
//! Contains all shared models used across the application organized by domain:
//! - **Catalog**: browsable items returned by trending, discovery and search
//! - **Detail**: extended records with cast, videos and similar titles
//! - **Filter**: discovery filter and sort configuration
//! - **Images**: poster/profile URL composition

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Catalog Models
// =============================================================================

/// Media type discriminator for catalog items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment used by the gateway (`movie` / `tv`)
    pub fn as_path(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// The other media type
    pub fn toggled(self) -> Self {
        match self {
            MediaType::Movie => MediaType::Tv,
            MediaType::Tv => MediaType::Movie,
        }
    }

    /// Parse from the gateway's string form
    pub fn from_path(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(MediaType::Movie),
            "tv" => Some(MediaType::Tv),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Tv => write!(f, "TV Show"),
        }
    }
}

/// A browsable movie or TV show
///
/// Snapshots of this type are what the favorites file and synthesis slots
/// hold, so the serialized shape is part of the on-disk format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub media_type: MediaType,
}

impl CatalogItem {
    /// Release (or first air) year
    pub fn year(&self) -> Option<u16> {
        self.release_date.as_deref().and_then(extract_year)
    }

    /// Poster URL at the given size
    pub fn poster_url(&self, size: ImageSize) -> Option<String> {
        self.poster_path.as_deref().map(|p| size.url(p))
    }
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.media_type)
    }
}

/// Genre id/name pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

// =============================================================================
// Detail Models
// =============================================================================

/// Cast member from the credits block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: String,
    pub profile_path: Option<String>,
}

/// Video attached to a title (trailers, teasers, featurettes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub site: String,
    pub kind: String,
    pub name: String,
}

impl Video {
    pub const YOUTUBE: &'static str = "YouTube";

    /// Watch URL on the hosting site
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }
}

/// Extended record for an opened title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f32,
    pub media_type: MediaType,
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    pub overview: String,
    pub cast: Vec<CastMember>,
    pub similar: Vec<CatalogItem>,
    pub videos: Vec<Video>,
}

impl DetailRecord {
    /// Release (or first air) year
    pub fn year(&self) -> Option<u16> {
        self.release_date.as_deref().and_then(extract_year)
    }

    /// Catalog snapshot of this record (for favorites and slots)
    pub fn to_item(&self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
            media_type: self.media_type,
        }
    }

    /// Trailer to offer: first YouTube "Trailer", else first YouTube "Teaser"
    pub fn trailer(&self) -> Option<&Video> {
        let youtube = |kind: &str| {
            self.videos
                .iter()
                .find(|v| v.site == Video::YOUTUBE && v.kind == kind)
        };
        youtube("Trailer").or_else(|| youtube("Teaser"))
    }

    /// Comma-separated genre names
    pub fn genres_str(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Text offered by the share action
    pub fn share_text(&self) -> String {
        format!("Discover this on Fluxify: {}", self.title)
    }
}

impl fmt::Display for DetailRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self.year().map(|y| y.to_string()).unwrap_or_else(|| "N/A".into());
        match self.runtime {
            Some(runtime) if runtime > 0 => write!(
                f,
                "{} ({}) - {}h {}m - ⭐ {:.1}",
                self.title,
                year,
                runtime / 60,
                runtime % 60,
                self.vote_average
            ),
            _ => write!(f, "{} ({}) - ⭐ {:.1}", self.title, year, self.vote_average),
        }
    }
}

// =============================================================================
// Filter Models
// =============================================================================

/// Server-side sort order for discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "popularity.desc")]
    PopularityDesc,
    #[serde(rename = "vote_average.desc")]
    RatingDesc,
}

impl SortKey {
    /// Value of the `sort_by` query parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "popularity.desc",
            SortKey::RatingDesc => "vote_average.desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::PopularityDesc => write!(f, "Popular"),
            SortKey::RatingDesc => write!(f, "Top Rated"),
        }
    }
}

/// Cast member scoping the discovery query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorFilter {
    pub id: u64,
    pub name: String,
}

/// Discovery filter configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub genre: Option<u32>,
    pub year: Option<u16>,
    pub min_rating: f32,
    pub sort: SortKey,
    pub actor: Option<ActorFilter>,
}

impl FilterState {
    /// Whether discovery (rather than trending) should back the catalog
    pub fn is_active(&self) -> bool {
        self.genre.is_some()
            || self.year.is_some()
            || self.min_rating > 0.0
            || self.sort != SortKey::default()
            || self.actor.is_some()
    }
}

/// Partial update to a [`FilterState`]
///
/// Outer `None` leaves a field untouched; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub genre: Option<Option<u32>>,
    pub year: Option<Option<u16>>,
    pub min_rating: Option<f32>,
    pub sort: Option<SortKey>,
    pub actor: Option<Option<ActorFilter>>,
}

impl FilterPatch {
    pub fn genre(genre: Option<u32>) -> Self {
        Self {
            genre: Some(genre),
            ..Self::default()
        }
    }

    pub fn year(year: Option<u16>) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn min_rating(rating: f32) -> Self {
        Self {
            min_rating: Some(rating),
            ..Self::default()
        }
    }

    pub fn sort(sort: SortKey) -> Self {
        Self {
            sort: Some(sort),
            ..Self::default()
        }
    }

    /// Apply to a filter; returns true if any field changed
    pub fn apply(self, filter: &mut FilterState) -> bool {
        let before = filter.clone();
        if let Some(genre) = self.genre {
            filter.genre = genre;
        }
        if let Some(year) = self.year {
            filter.year = year;
        }
        if let Some(rating) = self.min_rating {
            filter.min_rating = rating.clamp(0.0, 10.0);
        }
        if let Some(sort) = self.sort {
            filter.sort = sort;
        }
        if let Some(actor) = self.actor {
            filter.actor = actor;
        }
        *filter != before
    }
}

// =============================================================================
// Images
// =============================================================================

/// Size variants on the image host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Search thumbnails and cast portraits
    Thumb,
    /// Catalog cards
    Card,
    /// Full detail poster
    Poster,
}

impl ImageSize {
    pub const BASE_URL: &'static str = "https://image.tmdb.org/t/p";

    pub fn prefix(&self) -> &'static str {
        match self {
            ImageSize::Thumb => "w200",
            ImageSize::Card => "w300",
            ImageSize::Poster => "w500",
        }
    }

    /// Compose the full URL for a relative image path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}{}", Self::BASE_URL, self.prefix(), path)
    }
}

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

// =============================================================================
// Unit Tests
// =============================================================================
