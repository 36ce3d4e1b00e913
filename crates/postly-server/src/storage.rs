use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use postly_store::StoreSnapshot;

/// JSON file holding a full store snapshot.
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot, or `None` if no file has been written yet.
    pub fn load(&self) -> Result<Option<StoreSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading snapshot {}", self.path.display()))?;
        let snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("parsing snapshot {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    /// Written to a temp file, then renamed into place.
    pub fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(snapshot)?)?;
        fs::rename(&tmp, &self.path)?;

        info!(
            "Snapshot of {} user(s) written to {}",
            snapshot.users.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postly_store::{FeedStore, PasswordAlgorithm, StoreConfig};

    fn store() -> FeedStore {
        FeedStore::new(StoreConfig {
            password_algorithm: PasswordAlgorithm::Sha256,
        })
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("absent.json"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("nested/postly.json"));

        let source = store();
        source.register("john", "pw").unwrap();
        source.add_post("john", "#hello world").unwrap();
        source.toggle_like("john", 1).unwrap();
        file.save(&source.snapshot().unwrap()).unwrap();
        assert!(!file.path().with_extension("tmp").exists());

        let target = store();
        target.restore(file.load().unwrap().unwrap()).unwrap();
        assert!(target.authenticate("john", "pw"));
        assert_eq!(target.get_post(1).unwrap().likes(), 1);
        assert_eq!(target.current_timestamp().unwrap(), 1);
    }

    #[test]
    fn test_garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(SnapshotFile::new(path).load().is_err());
    }
}
