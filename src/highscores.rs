//! Best-score persistence
//!
//! The session reads the stored best once at init and writes it once per run
//! that beats it. Stores are collaborators: a failure is logged by the caller
//! and never stops the game.

use serde::{Deserialize, Serialize};

/// Errors from a high score store
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    /// Backing storage doesn't exist on this platform/context
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Serialization(e) => write!(f, "Serialization error: {}", e),
            StoreError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err)
    }
}

/// Somewhere to keep the best score between sessions
pub trait HighScoreStore {
    /// Stored best, 0 if nothing has been stored yet
    fn load(&mut self) -> Result<u64, StoreError>;
    fn save(&mut self, score: u64) -> Result<(), StoreError>;
}

/// On-disk / LocalStorage JSON shape
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    score: u64,
}

/// In-process store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScores {
    pub best: u64,
    /// Number of `save` calls received
    pub saves: usize,
}

impl MemoryHighScores {
    pub fn new(best: u64) -> Self {
        Self { best, saves: 0 }
    }
}

impl HighScoreStore for MemoryHighScores {
    fn load(&mut self) -> Result<u64, StoreError> {
        Ok(self.best)
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.best = score;
        self.saves += 1;
        Ok(())
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for &mut S {
    fn load(&mut self) -> Result<u64, StoreError> {
        (**self).load()
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        (**self).save(score)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileHighScores;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::{HighScoreRecord, HighScoreStore, StoreError};

    /// JSON file store for native builds
    #[derive(Debug, Clone)]
    pub struct FileHighScores {
        path: PathBuf,
    }

    impl FileHighScores {
        const FILE_NAME: &'static str = "highscore.json";

        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        /// `<data dir>/shield-runner/highscore.json`, if the platform has a data dir
        pub fn default_location() -> Option<Self> {
            dirs::data_dir().map(|dir| Self::new(dir.join("shield-runner").join(Self::FILE_NAME)))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl HighScoreStore for FileHighScores {
        fn load(&mut self) -> Result<u64, StoreError> {
            if !self.path.exists() {
                log::info!("No high score file at {}, starting fresh", self.path.display());
                return Ok(0);
            }
            let json = fs::read_to_string(&self.path)?;
            let record: HighScoreRecord = serde_json::from_str(&json)?;
            log::info!("Loaded high score {}", record.score);
            Ok(record.score)
        }

        fn save(&mut self, score: u64) -> Result<(), StoreError> {
            if let Some(dir) = self.path.parent() {
                fs::create_dir_all(dir)?;
            }
            let json = serde_json::to_string_pretty(&HighScoreRecord { score })?;
            fs::write(&self.path, json)?;
            log::info!("High score {} saved to {}", score, self.path.display());
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageHighScores;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{HighScoreRecord, HighScoreStore, StoreError};

    /// Browser LocalStorage store
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorageHighScores;

    impl LocalStorageHighScores {
        const STORAGE_KEY: &'static str = "shield_runner_highscore";

        fn storage() -> Result<web_sys::Storage, StoreError> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or_else(|| StoreError::Unavailable("LocalStorage".to_string()))
        }
    }

    impl HighScoreStore for LocalStorageHighScores {
        fn load(&mut self) -> Result<u64, StoreError> {
            let storage = Self::storage()?;
            match storage.get_item(Self::STORAGE_KEY) {
                Ok(Some(json)) => {
                    let record: HighScoreRecord = serde_json::from_str(&json)?;
                    log::info!("Loaded high score {}", record.score);
                    Ok(record.score)
                }
                Ok(None) => {
                    log::info!("No high score found, starting fresh");
                    Ok(0)
                }
                Err(_) => Err(StoreError::Unavailable("LocalStorage read".to_string())),
            }
        }

        fn save(&mut self, score: u64) -> Result<(), StoreError> {
            let storage = Self::storage()?;
            let json = serde_json::to_string(&HighScoreRecord { score })?;
            storage
                .set_item(Self::STORAGE_KEY, &json)
                .map_err(|_| StoreError::Unavailable("LocalStorage write".to_string()))?;
            log::info!("High score {} saved", score);
            Ok(())
        }
    }
}
