use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObjectFinderError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("識別に失敗: {0}")]
    Identification(String),

    #[error("識別レスポンスが不正: {0}")]
    InvalidIdentification(#[from] object_finder_common::Error),

    #[error("識別がタイムアウトしました ({0}秒)")]
    Timeout(u64),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error("{action} は {state} 状態では実行できません")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("セッションは既に初期化されています")]
    SessionAlreadyProvided,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ObjectFinderError>;
