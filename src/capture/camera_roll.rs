//! カメラロール取得元
//!
//! フォルダ直下の画像のうち、最も新しいもの（更新日時）を撮影結果として扱う。
//! フォルダが無い・画像が無い場合はカメラ利用不可として `None` を返す。

use super::{ImagePayload, ImageSource};
use crate::error::Result;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "JPG", "JPEG", "PNG", "WEBP"];

#[derive(Debug, Clone)]
pub struct CameraRoll {
    folder: PathBuf,
}

impl CameraRoll {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self { folder: folder.into() }
    }

    /// 最新の画像ファイルのパス
    pub fn latest_image(&self) -> Option<PathBuf> {
        if !self.folder.is_dir() {
            return None;
        }

        WalkDir::new(&self.folder)
            .max_depth(1)  // 直下のみ
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_image_path(e.path()))
            .filter_map(|e| {
                let modified = e.metadata().ok()?.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                Some((modified, e.into_path()))
            })
            // 同時刻ならファイル名の大きい方
            .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
            .map(|(_, path)| path)
    }
}

impl ImageSource for CameraRoll {
    fn capture(&self) -> Result<Option<ImagePayload>> {
        match self.latest_image() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "captured from camera roll");
                ImagePayload::from_file(&path).map(Some)
            }
            None => Ok(None),
        }
    }
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            IMAGE_EXTENSIONS.iter().any(|&e| e == ext)
        })
        .unwrap_or(false)
}
