//! Detail loader
//!
//! At most one record is open at a time. Each open issues a new sequence
//! number and only the response for the latest one is applied.

use anyhow::Result;
use tracing::{debug, warn};

use crate::api::Gateway;
use crate::models::{DetailRecord, MediaType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest {
    pub seq: u64,
    pub media_type: MediaType,
    pub id: u64,
}

impl DetailRequest {
    pub async fn execute(&self, gateway: &dyn Gateway) -> Result<DetailRecord> {
        gateway.details(self.media_type, self.id).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct DetailLoader {
    current: Option<DetailRecord>,
    seq: u64,
    pending: bool,
}

impl DetailLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// The open record, if any
    pub fn current(&self) -> Option<&DetailRecord> {
        self.current.as_ref()
    }

    /// A record is shown or on its way
    pub fn is_open(&self) -> bool {
        self.current.is_some() || self.pending
    }

    /// A details request is in flight
    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// Issue a details request; the open record stays until it resolves
    pub fn open_details(&mut self, media_type: MediaType, id: u64) -> DetailRequest {
        self.seq += 1;
        self.pending = true;
        DetailRequest {
            seq: self.seq,
            media_type,
            id,
        }
    }

    /// Whether `request` is the latest one issued
    pub fn is_current(&self, request: &DetailRequest) -> bool {
        request.seq == self.seq
    }

    /// Apply a details response; returns true if it became the open record
    pub fn finish(&mut self, request: &DetailRequest, result: Result<DetailRecord>) -> bool {
        if !self.is_current(request) {
            debug!(seq = request.seq, latest = self.seq, "dropping stale details response");
            return false;
        }
        self.pending = false;
        match result {
            Ok(record) => {
                self.current = Some(record);
                true
            }
            Err(e) => {
                warn!(id = request.id, error = %e, "details load failed");
                false
            }
        }
    }

    /// Clear the open record; in-flight responses will not reopen it
    pub fn close_details(&mut self) {
        self.current = None;
        self.pending = false;
        self.seq += 1;
    }

    pub async fn load(&mut self, media_type: MediaType, id: u64, gateway: &dyn Gateway) -> bool {
        let request = self.open_details(media_type, id);
        let result = request.execute(gateway).await;
        self.finish(&request, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, title: &str) -> DetailRecord {
        DetailRecord {
            id,
            title: title.into(),
            poster_path: None,
            release_date: None,
            vote_average: 0.0,
            media_type: MediaType::Movie,
            genres: vec![],
            runtime: None,
            overview: String::new(),
            cast: vec![],
            similar: vec![],
            videos: vec![],
        }
    }

    #[test]
    fn test_latest_open_wins() {
        let mut loader = DetailLoader::new();
        let first = loader.open_details(MediaType::Movie, 1);
        let second = loader.open_details(MediaType::Movie, 2);

        assert!(loader.finish(&second, Ok(record(2, "B"))));
        assert!(!loader.finish(&first, Ok(record(1, "A"))));
        assert_eq!(loader.current().unwrap().id, 2);
    }

    #[test]
    fn test_error_keeps_previous_record() {
        let mut loader = DetailLoader::new();
        let request = loader.open_details(MediaType::Movie, 1);
        loader.finish(&request, Ok(record(1, "A")));

        let request = loader.open_details(MediaType::Tv, 9);
        assert!(loader.is_loading());
        assert!(!loader.finish(&request, Err(anyhow::anyhow!("404"))));
        assert!(!loader.is_loading());
        assert_eq!(loader.current().unwrap().id, 1);
    }

    #[test]
    fn test_close_ignores_late_response() {
        let mut loader = DetailLoader::new();
        let request = loader.open_details(MediaType::Movie, 1);
        assert!(loader.is_open());
        loader.close_details();

        assert!(!loader.finish(&request, Ok(record(1, "A"))));
        assert!(!loader.is_open());
    }
}
