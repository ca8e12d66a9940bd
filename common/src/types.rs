//! 図鑑データの型定義
//!
//! CLIとWebで共有される型:
//! - IdentificationResult: 識別サービスの出力（一時的、保存されない）
//! - NewCollectionItem: コレクション追加前のアイテム（id・発見日なし）
//! - CollectionItem: コレクションに保存されたアイテム
//! - ApplicationState: ポイント合計とコレクション

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// レアリティの範囲（1〜10）
pub const RARITY_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// 識別結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationResult {
    pub name: String,
    pub description: String,
    pub rarity: u8,
    pub points: u32,
    #[serde(default)]
    pub facts: Vec<String>,
}

impl IdentificationResult {
    /// 外部境界から受け取った結果の形を検証
    pub fn validate(self) -> Result<Self> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidResult("name is empty".into()));
        }
        if !RARITY_RANGE.contains(&self.rarity) {
            return Err(Error::InvalidResult(format!(
                "rarity {} is out of range 1-10",
                self.rarity
            )));
        }
        Ok(self)
    }

    /// コレクション追加用のアイテムに変換
    pub fn to_new_item(&self, image: impl Into<String>) -> NewCollectionItem {
        NewCollectionItem {
            name: self.name.clone(),
            image: image.into(),
            description: self.description.clone(),
            rarity: self.rarity,
            points: self.points,
        }
    }
}

/// id と発見日を持たないコレクションアイテム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollectionItem {
    pub name: String,
    pub image: String,
    pub description: String,
    pub rarity: u8,
    pub points: u32,
}

/// コレクションに保存されたアイテム
///
/// rarity と points は作成後に変更しない（発見時の記録）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    pub id: String,
    pub name: String,
    pub image: String,
    pub description: String,
    pub date_found: NaiveDate,
    pub rarity: u8,
    pub points: u32,
}

impl CollectionItem {
    pub fn from_new(item: NewCollectionItem, id: String, date_found: NaiveDate) -> Self {
        Self {
            id,
            name: item.name,
            image: item.image,
            description: item.description,
            date_found,
            rarity: item.rarity,
            points: item.points,
        }
    }
}

/// アプリケーション状態のスナップショット
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    pub points: u64,
    /// 挿入順 = 発見順
    pub collection: Vec<CollectionItem>,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self {
            points: crate::catalog::DEFAULT_POINTS,
            collection: crate::catalog::seed_collection(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IdentificationResult {
        IdentificationResult {
            name: "Lady Bug".to_string(),
            description: "A small, round, typically red beetle with black spots.".to_string(),
            rarity: 2,
            points: 40,
            facts: vec![],
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rarity_out_of_range() {
        let mut result = sample();
        result.rarity = 0;
        assert!(matches!(result.validate(), Err(Error::InvalidResult(_))));

        let mut result = sample();
        result.rarity = 11;
        assert!(matches!(result.validate(), Err(Error::InvalidResult(_))));
    }

    #[test]
    fn test_validate_empty_name() {
        let mut result = sample();
        result.name = "  ".to_string();
        assert!(result.validate().is_err());
    }

    #[test]
    fn test_collection_item_json_layout() {
        let item = CollectionItem::from_new(
            sample().to_new_item("data:image/png;base64,AAAA"),
            "item-1".to_string(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "item-1");
        assert_eq!(json["dateFound"], "2024-05-01");
        assert_eq!(json["rarity"], 2);
        assert_eq!(json["points"], 40);
        assert_eq!(json["image"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_identification_facts_default() {
        let json = r#"{"name":"Red Oak Tree","description":"d","rarity":3,"points":60}"#;
        let result: IdentificationResult = serde_json::from_str(json).unwrap();
        assert!(result.facts.is_empty());
    }

    #[test]
    fn test_default_state() {
        let state = ApplicationState::default();
        assert_eq!(state.points, 260);
        assert_eq!(state.collection.len(), 3);
    }
}
