//! Remote catalog gateway
//!
//! - `Gateway`: the operations the stores need from a metadata provider
//! - `tmdb`: HTTP implementation against The Movie Database v3 API

pub mod tmdb;

pub use tmdb::{GatewayError, TmdbClient};

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{CatalogItem, DetailRecord, FilterState, Genre, MediaType};

/// Trait for catalog metadata providers
///
/// Every store talks to the provider through this seam, which keeps the
/// stores testable without a network.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Trending titles for the day, one page at a time
    async fn trending(&self, media_type: MediaType, page: u32) -> Result<Vec<CatalogItem>>;

    /// Filtered/sorted discovery, one page at a time
    async fn discover(
        &self,
        media_type: MediaType,
        filter: &FilterState,
        page: u32,
    ) -> Result<Vec<CatalogItem>>;

    /// Genre list for a media type
    async fn genres(&self, media_type: MediaType) -> Result<Vec<Genre>>;

    /// Extended record with cast, videos and similar titles attached
    async fn details(&self, media_type: MediaType, id: u64) -> Result<DetailRecord>;

    /// Incremental title search
    async fn search(&self, media_type: MediaType, query: &str) -> Result<Vec<CatalogItem>>;
}
