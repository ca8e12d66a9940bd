//! セッション単位の状態ストア登録
//!
//! CLIは起動時に一度だけ `provide` し、登録後は `use_app` でも取り出せる。
//! `provide` 前の `use_app` はプログラムの誤りなので即座にパニックする。

use crate::error::{ObjectFinderError, Result};
use crate::state::AppStore;
use std::sync::OnceLock;

static APP: OnceLock<AppStore> = OnceLock::new();

/// このプロセスの状態ストアを登録
pub fn provide(store: AppStore) -> Result<&'static AppStore> {
    APP.set(store)
        .map_err(|_| ObjectFinderError::SessionAlreadyProvided)?;
    Ok(use_app())
}

/// 登録済みの状態ストアを取得
///
/// # Panics
/// `provide` より前に呼ばれた場合
pub fn use_app() -> &'static AppStore {
    match APP.get() {
        Some(store) => store,
        None => panic!("use_app must be called after session::provide"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // このモジュールのテストでは provide を呼ばない
    #[test]
    #[should_panic(expected = "use_app must be called after session::provide")]
    fn test_use_before_provide_panics() {
        let _ = use_app();
    }
}
