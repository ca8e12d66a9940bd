use crate::ai_provider::AiProvider;
use crate::error::{ObjectFinderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// データディレクトリを上書きする環境変数
pub const DATA_DIR_ENV: &str = "OBJECT_FINDER_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: AiProvider,
    pub data_dir: Option<PathBuf>,
    /// モック識別の待ち時間
    pub identify_delay_ms: u64,
    /// 外部AI CLIのタイムアウト
    pub timeout_seconds: u64,
    /// カメラロールとして扱うフォルダ
    pub camera_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: AiProvider::Mock,
            data_dir: None,
            identify_delay_ms: 1500,
            timeout_seconds: 120,
            camera_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ObjectFinderError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("object-finder").join("config.json"))
    }

    /// 保存データの置き場所
    ///
    /// 環境変数 > 設定ファイル > OS標準のデータディレクトリ の順
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        dirs::data_dir()
            .map(|d| d.join("object-finder"))
            .ok_or_else(|| ObjectFinderError::Config("データディレクトリが見つかりません".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.identify_delay_ms, 1500);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            provider: AiProvider::Claude,
            camera_dir: Some(PathBuf::from("/photos")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"provider": "gemini"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.provider, AiProvider::Gemini);
        assert_eq!(config.timeout_seconds, 120);
    }

    #[test]
    fn test_corrupted_config_is_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ObjectFinderError::JsonParse(_))
        ));
    }
}
