//! ファイル永続化ストア
//!
//! データディレクトリ内の1つのJSONファイルに全キーを保存する。
//! ファイルが無い・壊れている場合は空として扱う。

use super::KeyValueStore;
use crate::error::Result;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const STORAGE_FILE_NAME: &str = "storage.json";

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// データディレクトリのストアを開く
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STORAGE_FILE_NAME);
        let entries = Self::read_entries(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> BTreeMap<String, String> {
        if !path.exists() {
            return BTreeMap::new();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "storage file unreadable, starting empty");
                return BTreeMap::new();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "storage file corrupted, starting empty");
                BTreeMap::new()
            }
        }
    }

    /// 一時ファイルに書いてから置き換える
    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, entries)?;
        }
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());

        if let Err(e) = self.write_entries(&entries) {
            tracing::warn!(path = %self.path.display(), key, error = %e, "failed to persist storage");
        }
    }

    fn save_all(&self, new_entries: &[(&str, &str)]) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        for (key, value) in new_entries {
            entries.insert(key.to_string(), value.to_string());
        }

        if let Err(e) = self.write_entries(&entries) {
            tracing::warn!(path = %self.path.display(), keys = new_entries.len(), error = %e, "failed to persist storage");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = FileStore::open(dir.path());
        assert_eq!(store.load("userPoints"), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_visible_on_next_open() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = FileStore::open(&dir.path().join("profile"));
        store.save("userPoints", "380");

        let reopened = FileStore::open(&dir.path().join("profile"));
        assert_eq!(reopened.load("userPoints").as_deref(), Some("380"));
        assert!(!reopened.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupted_file_is_empty() {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join(STORAGE_FILE_NAME), "[1, 2").unwrap();

        let store = FileStore::open(dir.path());
        assert_eq!(store.load("collection"), None);
    }

    #[test]
    fn test_save_all_writes_once() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = FileStore::open(dir.path());
        store.save_all(&[("userPoints", "420"), ("collection", "[]")]);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let on_disk: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(on_disk.get("userPoints").map(String::as_str), Some("420"));
        assert_eq!(on_disk.get("collection").map(String::as_str), Some("[]"));
    }
}
