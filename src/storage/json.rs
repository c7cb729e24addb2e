use std::{
    fs::{OpenOptions, rename, write},
    path::PathBuf,
};

use fs2::FileExt;
use serde_json::to_string_pretty;
use tracing::debug;
use uuid::Uuid;

use crate::{
    models::screen::ScreenState,
    storage::{Storage, StorageError},
};

pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<ScreenState, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let screen: ScreenState =
                    serde_json::from_str(&content).map_err(|e| StorageError::ParseFailed {
                        path: self.path.clone(),
                        source: e,
                    })?;
                debug!(
                    file = %self.path.display(),
                    tasks = screen.tasks.len(),
                    "loaded state"
                );
                Ok(screen)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(file = %self.path.display(), "no state file, using defaults");
                Ok(ScreenState::default())
            }
            Err(e) => Err(StorageError::LoadFailed {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn save(&self, screen: &ScreenState) -> Result<(), StorageError> {
        let json =
            to_string_pretty(screen).map_err(|e| StorageError::SerializeFailed { source: e })?;

        // Write to a uniquely named sibling first so a crash mid-write never
        // clobbers the current snapshot.
        let unique_temp = format!("{}.tmp.{}", self.path.display(), Uuid::new_v4());
        let temp_path = PathBuf::from(&unique_temp);
        write(&temp_path, json).map_err(|e| StorageError::SaveFailed {
            path: temp_path.clone(),
            source: e,
        })?;

        let lock_file_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .open(&lock_file_path)
            .map_err(|e| StorageError::SaveFailed {
                path: lock_file_path.clone(),
                source: e,
            })?;
        lock_file
            .lock_exclusive()
            .map_err(|e| StorageError::SaveFailed {
                path: lock_file_path,
                source: e,
            })?;

        rename(&temp_path, &self.path).map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            source: e,
        })?;

        lock_file.unlock().map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(
            file = %self.path.display(),
            tasks = screen.tasks.len(),
            "saved state"
        );
        Ok(())
    }
}
