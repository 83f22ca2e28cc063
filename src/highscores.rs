//! Persistent best score
//!
//! A single integer survives across sessions: localStorage in the
//! browser, a small JSON file natively. Anything missing or malformed
//! reads as zero; failed writes are logged and otherwise ignored.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use serde::{Deserialize, Serialize};

/// Where the best score lives between sessions
pub trait HighScoreStore {
    /// Stored best score; 0 when nothing usable is stored
    fn read(&self) -> u32;
    /// Best-effort write of a new best score
    fn write(&mut self, score: u32);
}

/// Normalize a raw stored value: missing, non-numeric, or out-of-range
/// all count as no score.
#[allow(dead_code)]
fn parse_stored(raw: Option<String>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0)
}

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "drive_mad_high";

/// Browser store backed by `window.localStorage`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalScore;

#[cfg(target_arch = "wasm32")]
impl LocalScore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalScore {
    fn read(&self) -> u32 {
        let raw = Self::storage().and_then(|s| s.get_item(STORAGE_KEY).ok()).flatten();
        parse_stored(raw)
    }

    fn write(&mut self, score: u32) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(STORAGE_KEY, &score.to_string());
            log::info!("High score saved: {score}");
        } else {
            log::warn!("High score not saved, storage unavailable");
        }
    }
}

/// On-disk record for the native build
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    best: u32,
}

/// Native store backed by a little JSON file
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileScore {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for FileScore {
    fn default() -> Self {
        Self::new("drive_mad_high.json")
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileScore {
    fn read(&self) -> u32 {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|json| serde_json::from_str::<HighScoreRecord>(&json).ok())
            .map(|record| record.best)
            .unwrap_or(0)
    }

    fn write(&mut self, score: u32) {
        let record = HighScoreRecord { best: score };
        match serde_json::to_string(&record) {
            Ok(json) => {
                if std::fs::write(&self.path, json).is_ok() {
                    log::info!("High score saved: {score}");
                } else {
                    log::warn!("High score not saved, cannot write {:?}", self.path);
                }
            }
            Err(e) => log::warn!("High score not saved: {e}"),
        }
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryScore {
    best: u32,
}

impl MemoryScore {
    pub fn with_best(best: u32) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryScore {
    fn read(&self) -> u32 {
        self.best
    }

    fn write(&mut self, score: u32) {
        self.best = score;
    }
}
