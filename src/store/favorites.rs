//! Favorites store
//!
//! An ordered, id-unique list of catalog snapshots, newest first. The whole
//! set is written back to a JSON file after every mutation.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::models::CatalogItem;

#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    items: Vec<CatalogItem>,
    path: Option<PathBuf>,
}

impl FavoritesStore {
    /// Default location of the favorites file
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("fluxify").join("favorites.json"))
    }

    /// Store that never touches the disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the set persisted at `path`
    ///
    /// A missing file yields an empty set. So does an unreadable or corrupt
    /// one, after logging a warning.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<CatalogItem>>(&content) {
                Ok(items) => dedup_by_id(items),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt favorites file, starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable favorites file, starting empty");
                Vec::new()
            }
        };
        debug!(count = items.len(), "favorites loaded");

        Self {
            items,
            path: Some(path),
        }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// Remove the item if present (by id), otherwise prepend a snapshot
    ///
    /// Returns whether the item is a favorite afterwards. The in-memory
    /// change stands even when persisting fails.
    pub fn toggle_favorite(&mut self, item: &CatalogItem) -> Result<bool> {
        let added = match self.items.iter().position(|i| i.id == item.id) {
            Some(idx) => {
                self.items.remove(idx);
                false
            }
            None => {
                self.items.insert(0, item.clone());
                true
            }
        };

        if let Err(e) = self.persist() {
            warn!(error = %e, "failed to persist favorites");
            return Err(e);
        }
        Ok(added)
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(&self.items)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

fn dedup_by_id(items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    let mut seen = std::collections::HashSet::new();
    items.into_iter().filter(|i| seen.insert(i.id)).collect()
}
