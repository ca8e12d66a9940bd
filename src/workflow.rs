//! 撮影から報酬までのワークフロー
//!
//! 1回の発見サイクルを明示的な状態で管理する:
//!
//! ```text
//! Idle -> Capturing -> Identifying -> Identified -> Saved
//!                          |  ^           |
//!                          |  | 再撮影     +-> (reset) -> Idle
//!                          v  |
//!                        Failed -> (reset) -> Idle
//! ```
//!
//! 識別はタスクとして起動し、完了はチケット番号と画像フィンガープリント付きで
//! チャネルに戻ってくる。識別中に画像が差し替わった場合、古い完了は捨てる
//! （中断はしない）。

use crate::capture::{ImagePayload, ImageSource};
use crate::error::{ObjectFinderError, Result};
use crate::identifier::Identifier;
use crate::notice::{Notice, Notifier};
use crate::state::AppStore;
use object_finder_common::{CollectionItem, IdentificationResult};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// ワークフローの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    /// 画像なし
    Idle,
    /// 画像取得中
    Capturing,
    /// 識別中
    Identifying { image: ImagePayload, ticket: u64 },
    /// 識別成功（ポイント付与済み）
    Identified {
        image: ImagePayload,
        result: IdentificationResult,
    },
    /// 識別失敗
    Failed { image: ImagePayload, reason: String },
    /// コレクションに保存済み
    Saved {
        image: ImagePayload,
        result: IdentificationResult,
        item: CollectionItem,
    },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "Idle",
            WorkflowState::Capturing => "Capturing",
            WorkflowState::Identifying { .. } => "Identifying",
            WorkflowState::Identified { .. } => "Identified",
            WorkflowState::Failed { .. } => "Failed",
            WorkflowState::Saved { .. } => "Saved",
        }
    }

    /// 識別が終わった状態か
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            WorkflowState::Identified { .. } | WorkflowState::Failed { .. } | WorkflowState::Saved { .. }
        )
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        match self {
            WorkflowState::Idle | WorkflowState::Capturing => None,
            WorkflowState::Identifying { image, .. }
            | WorkflowState::Identified { image, .. }
            | WorkflowState::Failed { image, .. }
            | WorkflowState::Saved { image, .. } => Some(image),
        }
    }

    pub fn result(&self) -> Option<&IdentificationResult> {
        match self {
            WorkflowState::Identified { result, .. } | WorkflowState::Saved { result, .. } => Some(result),
            _ => None,
        }
    }
}

/// 保存操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Added(CollectionItem),
    /// 既に保存済み（何もしない）
    AlreadySaved,
}

/// 識別タスクの完了通知
struct Completion {
    ticket: u64,
    fingerprint: String,
    outcome: Result<IdentificationResult>,
}

pub struct Workflow {
    identifier: Arc<dyn Identifier>,
    store: AppStore,
    notifier: Arc<dyn Notifier>,
    state: WorkflowState,
    next_ticket: u64,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
}

impl Workflow {
    pub fn new(identifier: Arc<dyn Identifier>, store: AppStore, notifier: Arc<dyn Notifier>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            identifier,
            store,
            notifier,
            state: WorkflowState::Idle,
            next_ticket: 0,
            completions_tx,
            completions_rx,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    fn invalid(&self, action: &'static str) -> ObjectFinderError {
        ObjectFinderError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }

    fn transition(&mut self, next: WorkflowState) {
        let from = self.state.name();
        self.transition_from(from, next);
    }

    /// 状態を取り出した後の遷移用（取り出し前の状態名を渡す）
    fn transition_from(&mut self, from: &'static str, next: WorkflowState) {
        tracing::debug!(from, to = next.name(), "workflow transition");
        self.state = next;
    }

    /// Idle -> Capturing
    pub fn start_capture(&mut self) -> Result<()> {
        match self.state {
            WorkflowState::Idle => {
                self.transition(WorkflowState::Capturing);
                Ok(())
            }
            _ => Err(self.invalid("start_capture")),
        }
    }

    /// 取得元から1枚取得して識別を開始する
    ///
    /// 取得できなければ通知して `Capturing` のまま `Ok(false)` を返す。
    /// 識別タスクを起動するので tokio ランタイム内で呼ぶこと
    pub fn capture(&mut self, source: &dyn ImageSource) -> Result<bool> {
        match self.acquire(source)? {
            Some(image) => {
                self.accept_photo(image)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 取得元から1枚取得する（識別はまだ始めない）
    ///
    /// 撮り直しの確認を挟む場合はこちらを使い、採用時に `accept_photo` を呼ぶ
    pub fn acquire(&mut self, source: &dyn ImageSource) -> Result<Option<ImagePayload>> {
        if !matches!(self.state, WorkflowState::Capturing) {
            return Err(self.invalid("capture"));
        }

        match source.capture() {
            Ok(Some(image)) => Ok(Some(image)),
            Ok(None) => {
                tracing::warn!("image source unavailable");
                self.notifier.notify(Notice::CaptureFailed);
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "capture failed");
                self.notifier.notify(Notice::CaptureFailed);
                Ok(None)
            }
        }
    }

    /// 取得した写真を採用して識別を開始する
    pub fn accept_photo(&mut self, image: ImagePayload) -> Result<()> {
        if !matches!(self.state, WorkflowState::Capturing) {
            return Err(self.invalid("accept_photo"));
        }
        self.notifier.notify(Notice::PhotoCaptured);
        self.submit_image(image)
    }

    /// Capturing -> Idle
    pub fn cancel_capture(&mut self) -> Result<()> {
        match self.state {
            WorkflowState::Capturing => {
                self.transition(WorkflowState::Idle);
                Ok(())
            }
            _ => Err(self.invalid("cancel_capture")),
        }
    }

    /// 画像を渡して識別を開始する
    ///
    /// `Identifying` 中に呼ぶと新しい画像で識別し直し、前の識別結果は無視される。
    /// 識別タスクを起動するので tokio ランタイム内で呼ぶこと
    pub fn submit_image(&mut self, image: ImagePayload) -> Result<()> {
        match self.state {
            WorkflowState::Capturing => {}
            WorkflowState::Identifying { ticket, .. } => {
                tracing::debug!(superseded = ticket, "image changed while identifying");
            }
            _ => return Err(self.invalid("submit_image")),
        }

        self.next_ticket += 1;
        let ticket = self.next_ticket;

        let identifier = Arc::clone(&self.identifier);
        let tx = self.completions_tx.clone();
        let task_image = image.clone();
        let fingerprint = image.fingerprint().to_string();
        tokio::spawn(async move {
            // 識別サービスが panic しても完了は必ず返す
            let task = tokio::spawn(async move { identifier.identify(&task_image).await });
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(ticket, error = %e, "identification task aborted");
                    Err(ObjectFinderError::Identification(format!(
                        "identification task aborted: {}",
                        e
                    )))
                }
            };
            let _ = tx.send(Completion {
                ticket,
                fingerprint,
                outcome,
            });
        });

        tracing::debug!(ticket, image = image.short_id(), "identification started");
        self.transition(WorkflowState::Identifying { image, ticket });
        Ok(())
    }

    /// 識別中なら現在の画像の結果が届くまで待ち、解決後の状態を返す
    ///
    /// 差し替え前の画像の結果は捨てる。識別中でなければすぐに返す
    pub async fn resolve(&mut self) -> &WorkflowState {
        while matches!(self.state, WorkflowState::Identifying { .. }) {
            let Some(completion) = self.completions_rx.recv().await else {
                break;
            };
            self.apply(completion);
        }
        &self.state
    }

    fn apply(&mut self, completion: Completion) {
        let is_current = match &self.state {
            WorkflowState::Identifying { image, ticket } => {
                *ticket == completion.ticket && image.fingerprint() == completion.fingerprint
            }
            _ => false,
        };
        if !is_current {
            tracing::debug!(ticket = completion.ticket, "stale identification discarded");
            return;
        }

        let WorkflowState::Identifying { image, .. } =
            std::mem::replace(&mut self.state, WorkflowState::Idle)
        else {
            return;
        };

        match completion.outcome {
            Ok(result) => {
                self.store.add_points(u64::from(result.points));
                self.notifier.notify(Notice::Identified {
                    name: result.name.clone(),
                    points: result.points,
                });
                self.transition_from("Identifying", WorkflowState::Identified { image, result });
            }
            Err(e) => {
                tracing::warn!(error = %e, "identification failed");
                let reason = e.to_string();
                self.notifier.notify(Notice::IdentificationFailed {
                    reason: reason.clone(),
                });
                self.transition_from("Identifying", WorkflowState::Failed { image, reason });
            }
        }
    }

    /// Identified -> Saved
    ///
    /// `Saved` で再度呼んでも追加しない
    pub fn save_to_collection(&mut self) -> Result<SaveOutcome> {
        match std::mem::replace(&mut self.state, WorkflowState::Idle) {
            WorkflowState::Identified { image, result } => {
                let item = self
                    .store
                    .add_to_collection(result.to_new_item(image.data_uri()));
                self.notifier.notify(Notice::AddedToCollection {
                    name: item.name.clone(),
                });
                self.transition_from(
                    "Identified",
                    WorkflowState::Saved {
                        image,
                        result,
                        item: item.clone(),
                    },
                );
                Ok(SaveOutcome::Added(item))
            }
            saved @ WorkflowState::Saved { .. } => {
                self.state = saved;
                Ok(SaveOutcome::AlreadySaved)
            }
            other => {
                self.state = other;
                Err(self.invalid("save_to_collection"))
            }
        }
    }

    /// 結果を捨てて Idle に戻る（もう1枚撮る）
    ///
    /// 識別中に呼んだ場合、その識別結果は届いても無視される
    pub fn reset(&mut self) {
        match self.state {
            WorkflowState::Idle => {}
            WorkflowState::Capturing
            | WorkflowState::Identifying { .. }
            | WorkflowState::Identified { .. }
            | WorkflowState::Failed { .. }
            | WorkflowState::Saved { .. } => self.transition(WorkflowState::Idle),
        }
    }
}
