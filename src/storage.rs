use std::path::PathBuf;

use thiserror::Error;

use crate::models::screen::ScreenState;

pub mod json;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to load state from '{path}': {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON from '{path}': {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to save state to '{path}': {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize state to JSON: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },
}

pub trait Storage {
    fn load(&self) -> Result<ScreenState, StorageError>;
    fn save(&self, screen: &ScreenState) -> Result<(), StorageError>;
}
