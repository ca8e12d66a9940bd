//! ランクと実績
//!
//! ポイント合計からランクと次ランクまでの進捗を求める。
//! 実績は保存済みデータから判定できるものだけを扱う。

/// ランク
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub name: &'static str,
    /// このランクに必要なポイント
    pub points: u64,
}

/// ランク閾値（昇順）
pub const RANKS: [Rank; 5] = [
    Rank { name: "Beginner", points: 0 },
    Rank { name: "Explorer", points: 100 },
    Rank { name: "Naturalist", points: 500 },
    Rank { name: "Scientist", points: 1000 },
    Rank { name: "Master Discoverer", points: 2500 },
];

/// ランク進捗
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankProgress {
    pub current: Rank,
    /// 最上位ランクなら None
    pub next: Option<Rank>,
    /// 0.0〜100.0
    pub percent: f64,
}

pub fn rank_progress(points: u64) -> RankProgress {
    let index = RANKS
        .iter()
        .rposition(|r| points >= r.points)
        .unwrap_or(0);
    let current = RANKS[index];
    let next = RANKS.get(index + 1).copied();

    let percent = match next {
        Some(next) => (points as f64 / next.points as f64 * 100.0).min(100.0),
        None => 100.0,
    };

    RankProgress { current, next, percent }
}

/// 実績
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub name: &'static str,
    pub description: &'static str,
    pub completed: bool,
}

/// (名前, 説明, 必要アイテム数)
const COLLECTION_ACHIEVEMENTS: [(&str, &str, usize); 2] = [
    ("First Discovery", "Found your first object", 1),
    ("Collection Starter", "Add 3 objects to your collection", 3),
];

pub fn achievements(collection_len: usize) -> Vec<Achievement> {
    COLLECTION_ACHIEVEMENTS
        .iter()
        .map(|&(name, description, required)| Achievement {
            name,
            description,
            completed: collection_len >= required,
        })
        .collect()
}
