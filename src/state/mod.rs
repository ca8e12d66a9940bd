//! アプリケーション状態ストア
//!
//! ポイント合計とコレクションを保持する唯一の書き込み役。
//! 変更のたびに両方のキーを永続化アダプタへ書き戻す。

mod ids;

pub use ids::IdGenerator;

use crate::storage::KeyValueStore;
use chrono::Utc;
use object_finder_common::{ApplicationState, CollectionItem, NewCollectionItem, DEFAULT_POINTS};
use object_finder_common::catalog::seed_collection;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// ポイント合計のキー（10進整数文字列）
pub const POINTS_KEY: &str = "userPoints";
/// コレクションのキー（CollectionItemのJSON配列）
pub const COLLECTION_KEY: &str = "collection";

struct Inner {
    state: ApplicationState,
    ids: IdGenerator,
}

/// 状態ストアへのハンドル
///
/// クローンは同じ状態を共有する
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<Mutex<Inner>>,
    backend: Arc<dyn KeyValueStore>,
}

impl AppStore {
    /// 保存済みの状態を読み込んで開く（なければ初期値）
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        let state = load_state(backend.as_ref());
        tracing::debug!(
            points = state.points,
            items = state.collection.len(),
            "application state loaded"
        );
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state,
                ids: IdGenerator::new(),
            })),
            backend,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// ポイントを加算して新しい合計を返す
    pub fn add_points(&self, delta: u64) -> u64 {
        let mut inner = self.lock();
        inner.state.points = inner.state.points.saturating_add(delta);
        persist(self.backend.as_ref(), &inner.state);
        tracing::info!(delta, total = inner.state.points, "points added");
        inner.state.points
    }

    /// IDと今日の日付（UTC）を付けてコレクション末尾に追加
    pub fn add_to_collection(&self, item: NewCollectionItem) -> CollectionItem {
        let now = Utc::now();
        let now_millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();

        let mut inner = self.lock();
        let Inner { state, ids } = &mut *inner;
        let id = {
            let taken: HashSet<&str> = state.collection.iter().map(|i| i.id.as_str()).collect();
            ids.next_id(now_millis, &taken)
        };

        let stored = CollectionItem::from_new(item, id, now.date_naive());
        state.collection.push(stored.clone());
        persist(self.backend.as_ref(), state);
        tracing::info!(id = %stored.id, name = %stored.name, "added to collection");
        stored
    }

    /// 読み取り専用のスナップショット
    pub fn snapshot(&self) -> ApplicationState {
        self.lock().state.clone()
    }

    pub fn points(&self) -> u64 {
        self.lock().state.points
    }

    pub fn collection_len(&self) -> usize {
        self.lock().state.collection.len()
    }
}

fn load_state(backend: &dyn KeyValueStore) -> ApplicationState {
    let points = match backend.load(POINTS_KEY) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(points) => points,
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "stored points unreadable, using default");
                DEFAULT_POINTS
            }
        },
        None => DEFAULT_POINTS,
    };

    let collection = match backend.load(COLLECTION_KEY) {
        Some(raw) => match serde_json::from_str::<Vec<CollectionItem>>(&raw) {
            Ok(collection) => collection,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse stored collection, using seed data");
                seed_collection()
            }
        },
        None => seed_collection(),
    };

    ApplicationState { points, collection }
}

fn persist(backend: &dyn KeyValueStore, state: &ApplicationState) {
    let points = state.points.to_string();
    match serde_json::to_string(&state.collection) {
        Ok(json) => backend.save_all(&[(POINTS_KEY, points.as_str()), (COLLECTION_KEY, json.as_str())]),
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize collection");
            backend.save(POINTS_KEY, &points);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn new_item(name: &str, points: u32) -> NewCollectionItem {
        NewCollectionItem {
            name: name.to_string(),
            image: "data:image/png;base64,AAAA".to_string(),
            description: "test".to_string(),
            rarity: 5,
            points,
        }
    }

    #[test]
    fn test_fresh_session_defaults() {
        let store = AppStore::open(Arc::new(MemoryStore::new()));
        let state = store.snapshot();
        assert_eq!(state.points, 260);
        assert_eq!(state.collection.len(), 3);
    }

    #[test]
    fn test_add_points_persists() {
        let backend = Arc::new(MemoryStore::new());
        let store = AppStore::open(backend.clone());

        assert_eq!(store.add_points(120), 380);
        assert_eq!(backend.load(POINTS_KEY).as_deref(), Some("380"));
        assert!(backend.load(COLLECTION_KEY).is_some());
    }

    #[test]
    fn test_add_to_collection_assigns_id_and_date() {
        let store = AppStore::open(Arc::new(MemoryStore::new()));
        let item = store.add_to_collection(new_item("Lady Bug", 40));

        assert!(item.id.starts_with("item-"));
        assert_eq!(item.date_found, Utc::now().date_naive());
        assert_eq!(store.collection_len(), 4);
        assert_eq!(store.snapshot().collection.last(), Some(&item));
    }

    #[test]
    fn test_rapid_adds_have_unique_ids() {
        let store = AppStore::open(Arc::new(MemoryStore::new()));
        let ids: HashSet<String> = (0..50)
            .map(|i| store.add_to_collection(new_item(&format!("thing {}", i), 10)).id)
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_unreadable_points_fall_back() {
        let backend = Arc::new(MemoryStore::with_entries([(POINTS_KEY, "lots")]));
        let store = AppStore::open(backend);
        assert_eq!(store.points(), 260);
    }

    /// 書き込み回数を数えるストア
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        saves: std::sync::atomic::AtomicUsize,
    }

    impl KeyValueStore for CountingStore {
        fn load(&self, key: &str) -> Option<String> {
            self.inner.load(key)
        }

        fn save(&self, key: &str, value: &str) {
            self.saves.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.inner.save(key, value);
        }

        fn save_all(&self, entries: &[(&str, &str)]) {
            self.saves.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.inner.save_all(entries);
        }
    }

    #[test]
    fn test_each_mutation_is_one_write() {
        let backend = Arc::new(CountingStore::default());
        let store = AppStore::open(backend.clone());

        store.add_points(40);
        store.add_to_collection(new_item("Lady Bug", 40));
        assert_eq!(backend.saves.load(std::sync::atomic::Ordering::SeqCst), 2);
        assert_eq!(backend.load(POINTS_KEY).as_deref(), Some("300"));
        assert!(backend.load(COLLECTION_KEY).is_some());
    }

    #[test]
    fn test_clones_share_state() {
        let store = AppStore::open(Arc::new(MemoryStore::new()));
        let other = store.clone();
        other.add_points(40);
        assert_eq!(store.points(), 300);
    }
}
