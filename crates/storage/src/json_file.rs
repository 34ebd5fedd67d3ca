//! JSON-file snapshot store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use farber_workflow::{SnapshotStore, StorageError};

/// One-file-per-key snapshot store rooted at a directory.
///
/// The local, single-actor equivalent of browser local storage: each key maps
/// to `<root>/<key>.json`. Writes go through a temp file + rename so a crash
/// mid-write never leaves a half-written snapshot behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn write_atomically(&self, path: &Path, state: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create snapshot directory {:?}", self.root))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, state).with_context(|| format!("failed to write {tmp:?}"))?;
        fs::rename(&tmp, path).with_context(|| format!("failed to move {tmp:?} into place"))?;
        Ok(())
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .with_context(|| format!("failed to read snapshot {path:?}"))
            .map(Some)
            .map_err(|err| StorageError::Io(format!("{err:#}")))
    }

    fn save(&self, key: &str, state: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        self.write_atomically(&path, state)
            .map_err(|err| StorageError::Io(format!("{err:#}")))
    }
}
