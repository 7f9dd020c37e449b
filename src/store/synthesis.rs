//! Synthesis engine
//!
//! Three seed titles go in; the union of their "similar" lists is shuffled
//! and the first twelve come out, after an artificial scanning delay.

use anyhow::Result;
use futures::future::try_join_all;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, warn};

use crate::api::Gateway;
use crate::models::CatalogItem;

/// Seed slots required for a run
pub const MAX_SLOTS: usize = 3;

/// Results kept after shuffling
pub const MAX_RESULTS: usize = 12;

pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Shuffle the concatenated lists and keep the first [`MAX_RESULTS`]
pub fn synthesize<R: Rng + ?Sized>(lists: Vec<Vec<CatalogItem>>, rng: &mut R) -> Vec<CatalogItem> {
    let mut pool: Vec<CatalogItem> = lists.into_iter().flatten().collect();
    pool.shuffle(rng);
    pool.truncate(MAX_RESULTS);
    pool
}

/// One synthesis run over a fixed set of seeds
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub seq: u64,
    pub seeds: Vec<CatalogItem>,
    pub delay: Duration,
}

impl SynthesisRequest {
    pub async fn execute(&self, gateway: &dyn Gateway) -> Result<Vec<CatalogItem>> {
        let fetches = self
            .seeds
            .iter()
            .map(|seed| gateway.details(seed.media_type, seed.id));
        let details = try_join_all(fetches).await?;

        let lists = details.into_iter().map(|d| d.similar).collect();
        let results = synthesize(lists, &mut StdRng::from_entropy());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(results)
    }
}

#[derive(Debug, Clone)]
pub struct SynthesisEngine {
    slots: Vec<CatalogItem>,
    results: Vec<CatalogItem>,
    scanning: bool,
    delay: Duration,
    seq: u64,
}

impl Default for SynthesisEngine {
    fn default() -> Self {
        Self {
            slots: Vec::with_capacity(MAX_SLOTS),
            results: Vec::new(),
            scanning: false,
            delay: DEFAULT_DELAY,
            seq: 0,
        }
    }
}

impl SynthesisEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different scanning delay (zero disables it)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn slots(&self) -> &[CatalogItem] {
        &self.slots
    }

    pub fn results(&self) -> &[CatalogItem] {
        &self.results
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= MAX_SLOTS
    }

    /// Add a seed; false when full or already present
    pub fn add_slot(&mut self, item: &CatalogItem) -> bool {
        if self.is_full() || self.slots.iter().any(|s| s.id == item.id) {
            return false;
        }
        self.slots.push(item.clone());
        true
    }

    pub fn remove_slot(&mut self, index: usize) -> Option<CatalogItem> {
        (index < self.slots.len()).then(|| self.slots.remove(index))
    }

    /// Start a run; `None` unless exactly three seeds and idle
    pub fn begin_run(&mut self) -> Option<SynthesisRequest> {
        if self.slots.len() != MAX_SLOTS || self.scanning {
            return None;
        }
        self.seq += 1;
        self.scanning = true;
        Some(SynthesisRequest {
            seq: self.seq,
            seeds: self.slots.clone(),
            delay: self.delay,
        })
    }

    /// Publish a run's outcome; failures keep the previous results
    pub fn finish_run(&mut self, request: &SynthesisRequest, result: Result<Vec<CatalogItem>>) -> bool {
        if request.seq != self.seq {
            return false;
        }
        self.scanning = false;
        match result {
            Ok(results) => {
                debug!(count = results.len(), "synthesis complete");
                self.results = results;
                true
            }
            Err(e) => {
                warn!(error = %e, "synthesis failed");
                false
            }
        }
    }

    pub async fn run(&mut self, gateway: &dyn Gateway) -> bool {
        match self.begin_run() {
            Some(request) => {
                let result = request.execute(gateway).await;
                self.finish_run(&request, result)
            }
            None => false,
        }
    }
}
