//! コレクション表示用の並び替えと集計

use crate::types::CollectionItem;

/// 並び順
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// 発見順（保存順）
    #[default]
    All,
    /// レアリティ降順
    Rarity,
    /// 発見日降順
    Recent,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(SortOrder::All),
            "rarity" => Ok(SortOrder::Rarity),
            "recent" | "most-recent" => Ok(SortOrder::Recent),
            _ => Err(format!("Unknown sort: {}. Use all, rarity, or recent", s)),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::All => write!(f, "all"),
            SortOrder::Rarity => write!(f, "rarity"),
            SortOrder::Recent => write!(f, "recent"),
        }
    }
}

/// 並び替えたコピーを返す
///
/// 安定ソートなので、同じキーのアイテムは発見順を保つ
pub fn sorted(items: &[CollectionItem], order: SortOrder) -> Vec<CollectionItem> {
    let mut items = items.to_vec();
    match order {
        SortOrder::All => {}
        SortOrder::Rarity => items.sort_by(|a, b| b.rarity.cmp(&a.rarity)),
        SortOrder::Recent => items.sort_by(|a, b| b.date_found.cmp(&a.date_found)),
    }
    items
}

/// コレクションの集計
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSummary {
    pub count: usize,
    /// アイテムのポイント合計（ユーザーのポイント合計とは別）
    pub total_points: u64,
}

pub fn summarize(items: &[CollectionItem]) -> CollectionSummary {
    CollectionSummary {
        count: items.len(),
        total_points: items.iter().map(|i| u64::from(i.points)).sum(),
    }
}
