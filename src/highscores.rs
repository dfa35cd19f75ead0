//! High score persistence
//!
//! A single integer per player: read when a game starts, written whenever the
//! running score beats it. Native builds keep it in a JSON file, the web
//! build in LocalStorage.

#[cfg(not(target_arch = "wasm32"))]
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Key-value store for the best score
pub trait HighScoreStore {
    /// Stored high score, if one was ever written
    fn get(&self) -> Option<u64>;
    fn set(&mut self, score: u64);
}

/// In-memory store (tests and headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self { value: Some(score) }
    }
}

impl HighScoreStore for MemoryStore {
    fn get(&self) -> Option<u64> {
        self.value
    }

    fn set(&mut self, score: u64) {
        self.value = Some(score);
    }
}

/// On-disk document
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u64,
}

/// High score kept in a small JSON file
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    value: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    /// Open the store at `path`; a missing file means no high score yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let value = match std::fs::read_to_string(&path) {
            Ok(json) => Some(serde_json::from_str::<HighScoreFile>(&json)?.high_score),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        log::info!("High score store at {} ({:?})", path.display(), value);
        Ok(Self { path, value })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, score: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&HighScoreFile { high_score: score })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for JsonFileStore {
    fn get(&self) -> Option<u64> {
        self.value
    }

    fn set(&mut self, score: u64) {
        self.value = Some(score);
        if let Err(e) = self.write(score) {
            log::warn!("Failed to save high score to {}: {}", self.path.display(), e);
        }
    }
}

/// High score kept in browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "highscore";

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn get(&self) -> Option<u64> {
        let storage = Self::storage().ok()?;
        let raw = storage.get_item(Self::STORAGE_KEY).ok()??;
        raw.parse().ok()
    }

    fn set(&mut self, score: u64) {
        let saved = Self::storage().and_then(|s| {
            s.set_item(Self::STORAGE_KEY, &score.to_string())
                .map_err(|_| StoreError::Unavailable)
        });
        if let Err(e) = saved {
            log::warn!("Failed to save high score: {}", e);
        }
    }
}
