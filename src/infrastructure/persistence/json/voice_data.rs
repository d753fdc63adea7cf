//! JSON Voice Data Store Implementation
//!
//! 授权数据的版本化 JSON 快照文件。
//! 项目级存储机制可整体替换此适配器，端口不变。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{
    VoiceDataError, VoiceDataSnapshot, VoiceDataStorePort, SNAPSHOT_VERSION,
};

/// JSON 快照存储
pub struct JsonVoiceDataStore {
    path: PathBuf,
}

impl JsonVoiceDataStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VoiceDataStorePort for JsonVoiceDataStore {
    fn load(&self) -> Result<VoiceDataSnapshot, VoiceDataError> {
        if !self.path.exists() {
            return Err(VoiceDataError::NotFound(
                self.path.display().to_string(),
            ));
        }

        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| VoiceDataError::IoError(e.to_string()))?;

        let snapshot: VoiceDataSnapshot = serde_json::from_str(&raw)
            .map_err(|e| VoiceDataError::SerializationError(e.to_string()))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(VoiceDataError::SerializationError(format!(
                "Unsupported snapshot version: {}",
                snapshot.version
            )));
        }

        tracing::debug!(
            path = %self.path.display(),
            lines = snapshot.lines.len(),
            "Voice data snapshot loaded"
        );

        Ok(snapshot)
    }

    fn save(&self, snapshot: &VoiceDataSnapshot) -> Result<(), VoiceDataError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| VoiceDataError::IoError(e.to_string()))?;
        }

        let raw = serde_json::to_string_pretty(snapshot)
            .map_err(|e| VoiceDataError::SerializationError(e.to_string()))?;

        std::fs::write(&self.path, raw).map_err(|e| VoiceDataError::IoError(e.to_string()))?;

        tracing::debug!(
            path = %self.path.display(),
            lines = snapshot.lines.len(),
            "Voice data snapshot saved"
        );

        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::VoiceLineRecord;
    use std::collections::BTreeMap;

    fn sample_snapshot() -> VoiceDataSnapshot {
        let mut assets = BTreeMap::new();
        assets.insert("en".to_string(), "a_en_line1".to_string());
        assets.insert("fr".to_string(), "a_fr_line1".to_string());
        VoiceDataSnapshot::new(vec![VoiceLineRecord {
            id: "line1".to_string(),
            assets,
        }])
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonVoiceDataStore::new(dir.path().join("voice_lines.json"));

        let snapshot = sample_snapshot();
        store.save(&snapshot).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonVoiceDataStore::new(dir.path().join("absent.json"));

        assert!(!store.exists());
        assert!(matches!(store.load(), Err(VoiceDataError::NotFound(_))));
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voice_lines.json");
        std::fs::write(&path, r#"{"version": 99, "lines": []}"#).unwrap();

        let store = JsonVoiceDataStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(VoiceDataError::SerializationError(_))
        ));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voice_lines.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonVoiceDataStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(VoiceDataError::SerializationError(_))
        ));
    }
}
