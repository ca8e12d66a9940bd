//! 画像取得の境界
//!
//! カメラ（またはファイル）から静止画を1枚取得し、
//! data URI 形式の `ImagePayload` にする。取得できない場合は `None`。

mod camera_roll;

pub use camera_roll::CameraRoll;

use crate::error::{ObjectFinderError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

lazy_static! {
    static ref DATA_URI_RE: Regex =
        Regex::new(r"^data:(image/[A-Za-z0-9.+-]+);base64,([A-Za-z0-9+/]+=*)$").unwrap();
}

/// 取得した静止画
///
/// `fingerprint` は data URI の SHA-256。識別中に画像が差し替わったかの判定に使う
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    data_uri: String,
    fingerprint: String,
}

impl ImagePayload {
    /// 画像バイト列から作成（形式はマジックバイトで判定）
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let format = image::guess_format(bytes)
            .map_err(|e| ObjectFinderError::ImageLoad(format!("unknown image format: {}", e)))?;
        let data_uri = format!("data:{};base64,{}", format.to_mime_type(), STANDARD.encode(bytes));
        Ok(Self::new_unchecked(data_uri))
    }

    /// data URI 文字列から作成
    pub fn from_data_uri(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        if !DATA_URI_RE.is_match(&uri) {
            return Err(ObjectFinderError::ImageLoad("not a base64 image data URI".into()));
        }
        Ok(Self::new_unchecked(uri))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ObjectFinderError::FileNotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    fn new_unchecked(data_uri: String) -> Self {
        let fingerprint = hex::encode(Sha256::digest(data_uri.as_bytes()));
        Self { data_uri, fingerprint }
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// 表示用の短いフィンガープリント
    pub fn short_id(&self) -> &str {
        &self.fingerprint[..12]
    }

    pub fn mime(&self) -> &str {
        DATA_URI_RE
            .captures(&self.data_uri)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .unwrap_or("application/octet-stream")
    }

    /// ファイルに書き出すときの拡張子
    pub fn extension(&self) -> &'static str {
        ImageFormat::from_mime_type(self.mime())
            .and_then(|f| f.extensions_str().first().copied())
            .unwrap_or("img")
    }

    /// base64部分をデコード
    pub fn decode(&self) -> Result<Vec<u8>> {
        let encoded = self
            .data_uri
            .split_once(',')
            .map(|(_, data)| data)
            .unwrap_or_default();
        STANDARD
            .decode(encoded)
            .map_err(|e| ObjectFinderError::ImageLoad(format!("invalid base64 payload: {}", e)))
    }
}

/// 静止画の取得元（カメラの代わり）
pub trait ImageSource {
    /// 1枚取得する。取得元が使えない場合は `Ok(None)`
    fn capture(&self) -> Result<Option<ImagePayload>>;
}

/// 指定ファイルをそのまま使う取得元
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageSource for FileSource {
    fn capture(&self) -> Result<Option<ImagePayload>> {
        ImagePayload::from_file(&self.path).map(Some)
    }
}
