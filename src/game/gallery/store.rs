//! Gallery storage backends
//!
//! Both backends keep the whole gallery in one [`GalleryDocument`]. The
//! file backend rewrites its JSON file after every change, writing to a
//! sibling temp file first and renaming it over the old one.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::{GalleryError, Painting, Worry};

/// Storage operations the API handlers need.
pub trait GalleryStore {
    /// All paintings, newest first.
    fn list_paintings(&self) -> Result<Vec<Painting>, GalleryError>;

    fn insert_painting(&mut self, painting: Painting) -> Result<(), GalleryError>;

    /// Remove a painting. Returns `false` if no painting had that id.
    fn delete_painting(&mut self, id: &str) -> Result<bool, GalleryError>;

    fn insert_worry(&mut self, worry: Worry) -> Result<(), GalleryError>;

    /// Up to `n` worries in random order.
    fn sample_worries(&self, n: usize) -> Result<Vec<Worry>, GalleryError>;
}

/// Everything stored by the gallery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryDocument {
    pub paintings: Vec<Painting>,
    pub worries: Vec<Worry>,
}

impl GalleryDocument {
    fn newest_first(&self) -> Vec<Painting> {
        // Reverse first so that equal timestamps keep the later insert on top
        let mut paintings: Vec<Painting> = self.paintings.iter().rev().cloned().collect();
        paintings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        paintings
    }

    fn remove_painting(&mut self, id: &str) -> bool {
        let before = self.paintings.len();
        self.paintings.retain(|p| p.id != id);
        self.paintings.len() != before
    }

    fn sample(&self, n: usize) -> Vec<Worry> {
        self.worries
            .choose_multiple(&mut rand::thread_rng(), n)
            .cloned()
            .collect()
    }
}

/// Ephemeral store for tests and throwaway servers.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: GalleryDocument,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &GalleryDocument {
        &self.document
    }
}

impl GalleryStore for MemoryStore {
    fn list_paintings(&self) -> Result<Vec<Painting>, GalleryError> {
        Ok(self.document.newest_first())
    }

    fn insert_painting(&mut self, painting: Painting) -> Result<(), GalleryError> {
        self.document.paintings.push(painting);
        Ok(())
    }

    fn delete_painting(&mut self, id: &str) -> Result<bool, GalleryError> {
        Ok(self.document.remove_painting(id))
    }

    fn insert_worry(&mut self, worry: Worry) -> Result<(), GalleryError> {
        self.document.worries.push(worry);
        Ok(())
    }

    fn sample_worries(&self, n: usize) -> Result<Vec<Worry>, GalleryError> {
        Ok(self.document.sample(n))
    }
}

/// Store backed by a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    document: GalleryDocument,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts an empty gallery.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, GalleryError> {
        let path = path.into();
        let document = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No gallery at {}, starting empty", path.display());
                GalleryDocument::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), GalleryError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(&self.document)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Apply a change, then write it out. The change is rolled back if writing fails.
    fn commit<T>(&mut self, change: impl FnOnce(&mut GalleryDocument) -> T) -> Result<T, GalleryError> {
        let previous = self.document.clone();
        let result = change(&mut self.document);
        if let Err(e) = self.persist() {
            self.document = previous;
            return Err(e);
        }
        Ok(result)
    }
}

impl GalleryStore for JsonFileStore {
    fn list_paintings(&self) -> Result<Vec<Painting>, GalleryError> {
        Ok(self.document.newest_first())
    }

    fn insert_painting(&mut self, painting: Painting) -> Result<(), GalleryError> {
        self.commit(|doc| doc.paintings.push(painting))
    }

    fn delete_painting(&mut self, id: &str) -> Result<bool, GalleryError> {
        if !self.document.paintings.iter().any(|p| p.id == id) {
            return Ok(false);
        }
        self.commit(|doc| doc.remove_painting(id))
    }

    fn insert_worry(&mut self, worry: Worry) -> Result<(), GalleryError> {
        self.commit(|doc| doc.worries.push(worry))
    }

    fn sample_worries(&self, n: usize) -> Result<Vec<Worry>, GalleryError> {
        Ok(self.document.sample(n))
    }
}
