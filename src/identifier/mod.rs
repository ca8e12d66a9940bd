//! 識別サービス
//!
//! 画像から名前・レアリティ・ポイント・豆知識を得る境界。
//! 実装は構成時に選ぶ:
//! - MockIdentifier: カタログからランダムに選ぶスタブ
//! - CliIdentifier: 外部AI CLI（claude/codex/gemini）で識別
//! - ScriptedIdentifier: 画像ごとに応答を決めたテスト用ダブル

mod cli_provider;
mod mock;
mod scripted;

pub use cli_provider::CliIdentifier;
pub use mock::MockIdentifier;
pub use scripted::ScriptedIdentifier;

use crate::ai_provider::AiProvider;
use crate::capture::ImagePayload;
use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;
use object_finder_common::IdentificationResult;
use std::sync::Arc;
use std::time::Duration;

#[async_trait]
pub trait Identifier: Send + Sync {
    /// 画像を識別する。失敗時は不正な結果ではなく `Err` を返す
    async fn identify(&self, image: &ImagePayload) -> Result<IdentificationResult>;
}

/// 設定に従って識別サービスを組み立てる
pub fn build_identifier(provider: AiProvider, config: &Config) -> Arc<dyn Identifier> {
    match provider {
        AiProvider::Mock => Arc::new(MockIdentifier::new(Duration::from_millis(
            config.identify_delay_ms,
        ))),
        _ => Arc::new(CliIdentifier::new(
            provider,
            Duration::from_secs(config.timeout_seconds),
            std::env::temp_dir().join("object-finder"),
        )),
    }
}
