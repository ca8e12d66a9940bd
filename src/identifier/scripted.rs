use super::Identifier;
use crate::capture::ImagePayload;
use crate::error::{ObjectFinderError, Result};
use async_trait::async_trait;
use object_finder_common::IdentificationResult;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Script {
    delay: Duration,
    outcome: std::result::Result<IdentificationResult, String>,
}

/// 画像ごとに応答を決めておく決定的な識別サービス
///
/// 応答の無い画像は失敗として扱う
#[derive(Debug, Default)]
pub struct ScriptedIdentifier {
    scripts: HashMap<String, Script>,
    fallback: Option<Script>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl ScriptedIdentifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// `image` に対して `delay` 後に `result` を返す
    pub fn respond(mut self, image: &ImagePayload, delay: Duration, result: IdentificationResult) -> Self {
        self.scripts.insert(
            image.fingerprint().to_string(),
            Script { delay, outcome: Ok(result) },
        );
        self
    }

    /// `image` に対して `delay` 後に失敗する
    pub fn fail(mut self, image: &ImagePayload, delay: Duration, message: impl Into<String>) -> Self {
        self.scripts.insert(
            image.fingerprint().to_string(),
            Script { delay, outcome: Err(message.into()) },
        );
        self
    }

    /// 応答を決めていない画像への既定の応答
    pub fn otherwise(mut self, delay: Duration, result: IdentificationResult) -> Self {
        self.fallback = Some(Script { delay, outcome: Ok(result) });
        self
    }

    /// identify の呼び出し回数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 呼び出された画像のフィンガープリント（呼び出し順）
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Identifier for ScriptedIdentifier {
    async fn identify(&self, image: &ImagePayload) -> Result<IdentificationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(image.fingerprint().to_string());

        let script = self
            .scripts
            .get(image.fingerprint())
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| ObjectFinderError::Identification("no scripted response".into()))?;

        tokio::time::sleep(script.delay).await;
        script.outcome.map_err(ObjectFinderError::Identification)
    }
}
