//! 永続化アダプタ
//!
//! 文字列のキー・値を保存する。呼び出し側には通常の保存失敗を返さず、
//! ログに残すだけにする（状態ストアは保存失敗で止まらない）。

mod file;

pub use file::{FileStore, STORAGE_FILE_NAME};

use std::collections::HashMap;
use std::sync::Mutex;

/// キー・値ストア
pub trait KeyValueStore: Send + Sync {
    /// 値を読み込む（なければ None）
    fn load(&self, key: &str) -> Option<String>;

    /// 値を保存する
    fn save(&self, key: &str, value: &str);

    /// 複数の値をまとめて保存する
    ///
    /// 1回の変更で書く値は一度に反映する（途中の状態を残さない）
    fn save_all(&self, entries: &[(&str, &str)]) {
        for (key, value) in entries {
            self.save(key, value);
        }
    }
}

/// プロセス内のみのストア（テスト・一時セッション用）
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値入りで作成
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
    }

    fn save_all(&self, new_entries: &[(&str, &str)]) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        for (key, value) in new_entries {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}
