//! エラーケーステスト
//!
//! 画像取得・識別レスポンスのエラー条件を検証

use object_finder::capture::{CameraRoll, FileSource, ImagePayload, ImageSource};
use object_finder::error::ObjectFinderError;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを取得した場合
#[test]
fn test_capture_nonexistent_file() {
    let result = FileSource::new("/nonexistent/path/12345.jpg").capture();
    assert!(matches!(result, Err(ObjectFinderError::FileNotFound(_))));
}

/// 画像でないファイルを取得した場合
#[test]
fn test_capture_non_image_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.jpg");
    std::fs::write(&path, "just text").unwrap();

    let result = FileSource::new(&path).capture();
    assert!(matches!(result, Err(ObjectFinderError::ImageLoad(_))));
}

/// 空のカメラロールは利用不可（エラーではない）
#[test]
fn test_empty_camera_roll() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = CameraRoll::new(dir.path()).capture();
    assert!(result.unwrap().is_none());
}

/// カメラロールは最新の画像を選ぶ
#[test]
fn test_camera_roll_picks_latest() {
    let dir = tempdir().expect("Failed to create temp dir");
    let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1];
    let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10];

    let old = dir.path().join("old.png");
    let new = dir.path().join("new.jpg");
    std::fs::write(&old, png).unwrap();
    std::fs::write(&new, jpeg).unwrap();

    let old_time = std::time::SystemTime::now() - std::time::Duration::from_secs(3600);
    std::fs::File::options()
        .write(true)
        .open(&old)
        .unwrap()
        .set_modified(old_time)
        .unwrap();

    let roll = CameraRoll::new(dir.path());
    assert_eq!(roll.latest_image().as_deref(), Some(Path::new(&new)));
    assert_eq!(roll.capture().unwrap().unwrap().mime(), "image/jpeg");
}

/// 不正な識別レスポンスは専用のエラーになる
#[test]
fn test_invalid_identification_error() {
    let err = object_finder_common::parse_identification_response("no json").unwrap_err();
    let err: ObjectFinderError = err.into();
    assert!(matches!(err, ObjectFinderError::InvalidIdentification(_)));
    assert!(format!("{}", err).contains("識別レスポンスが不正"));
}

/// 不正な data URI
#[test]
fn test_invalid_data_uri() {
    assert!(matches!(
        ImagePayload::from_data_uri("data:text/plain;base64,QUFB"),
        Err(ObjectFinderError::ImageLoad(_))
    ));
}

/// ObjectFinderErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ObjectFinderError::Config("テスト設定エラー".to_string()),
        ObjectFinderError::FileNotFound("test.jpg".to_string()),
        ObjectFinderError::Identification("service unavailable".to_string()),
        ObjectFinderError::Timeout(120),
        ObjectFinderError::InvalidTransition { action: "save_to_collection", state: "Idle" },
        ObjectFinderError::SessionAlreadyProvided,
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }

    let err = ObjectFinderError::InvalidTransition { action: "save_to_collection", state: "Idle" };
    assert_eq!(format!("{}", err), "save_to_collection は Idle 状態では実行できません");
}
