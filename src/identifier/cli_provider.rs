//! 外部AI CLI連携
//!
//! 画像を一時ファイルに書き出し、AI CLIに識別プロンプトを渡して
//! レスポンスのJSONを IdentificationResult としてパースする。

use super::Identifier;
use crate::ai_provider::AiProvider;
use crate::capture::ImagePayload;
use crate::error::{ObjectFinderError, Result};
use async_trait::async_trait;
use object_finder_common::{build_identify_prompt, parse_identification_response, IdentificationResult};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::process::Command;

pub struct CliIdentifier {
    provider: AiProvider,
    timeout: Duration,
    temp_dir: PathBuf,
    temp_seq: AtomicU64,
}

impl CliIdentifier {
    pub fn new(provider: AiProvider, timeout: Duration, temp_dir: PathBuf) -> Self {
        Self {
            provider,
            timeout,
            temp_dir,
            temp_seq: AtomicU64::new(0),
        }
    }

    async fn write_temp_image(&self, image: &ImagePayload) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.temp_dir).await?;
        // 同じ画像が並行して識別されても別ファイルにする
        let seq = self.temp_seq.fetch_add(1, Ordering::Relaxed);
        let path = self.temp_dir.join(format!(
            "capture-{}-{}-{}.{}",
            image.short_id(),
            std::process::id(),
            seq,
            image.extension()
        ));
        tokio::fs::write(&path, image.decode()?).await?;
        // 絶対パスに変換
        Ok(tokio::fs::canonicalize(&path).await?)
    }

    async fn run_cli(&self, prompt: &str) -> Result<String> {
        let command = self.provider.command_name().ok_or_else(|| {
            ObjectFinderError::Config(format!("{} は外部CLIを持ちません", self.provider))
        })?;

        // Windowsではcmd /c経由
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.args(["/c", command]);
            cmd
        };
        #[cfg(not(windows))]
        let mut cmd = Command::new(command);

        cmd.args(self.provider.prompt_args(prompt)).kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| ObjectFinderError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| ObjectFinderError::CliExecution(format!("{} 実行エラー: {}", command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ObjectFinderError::CliExecution(format!(
                "{} failed (code {:?}): {}",
                command,
                output.status.code(),
                stderr
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();
        let preview: String = response.chars().take(500).collect();
        tracing::debug!(provider = %self.provider, response = %preview, "cli response");
        Ok(response)
    }
}

#[async_trait]
impl Identifier for CliIdentifier {
    async fn identify(&self, image: &ImagePayload) -> Result<IdentificationResult> {
        let path = self.write_temp_image(image).await?;
        let prompt = build_identify_prompt(&display_path(&path));
        // 改行をスペースに置換してコマンド引数で渡す
        let prompt = prompt.replace('\n', " ");

        let response = self.run_cli(&prompt).await;

        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::debug!(path = %path.display(), error = %e, "temp image not removed");
        }

        Ok(parse_identification_response(&response?)?)
    }
}

fn display_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
