//! 識別カタログとシードデータ
//!
//! モック識別サービスが選ぶ5種類の典型オブジェクトと、
//! 初回起動時のコレクション（3件）を定義する。
//! ポイントはレアリティから計算せず、カタログの値をそのまま使う。

use chrono::NaiveDate;

use crate::types::{CollectionItem, IdentificationResult};

/// 初回起動時のポイント
pub const DEFAULT_POINTS: u64 = 260;

/// カタログの1エントリ
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: u8,
    pub points: u32,
    pub facts: &'static [&'static str],
}

impl CatalogEntry {
    pub fn to_result(&self) -> IdentificationResult {
        IdentificationResult {
            name: self.name.to_string(),
            description: self.description.to_string(),
            rarity: self.rarity,
            points: self.points,
            facts: self.facts.iter().map(|f| f.to_string()).collect(),
        }
    }
}

pub const CATALOG: [CatalogEntry; 5] = [
    CatalogEntry {
        name: "Monarch Butterfly",
        description: "A migratory butterfly known for its distinctive orange and black wings.",
        rarity: 6,
        points: 120,
        facts: &[
            "Migrates up to 3,000 miles annually",
            "Population has declined by 80% in the last 20 years",
            "Caterpillars only eat milkweed plants",
        ],
    },
    CatalogEntry {
        name: "Red Oak Tree",
        description: "A common hardwood tree in North America with pointed-lobed leaves.",
        rarity: 3,
        points: 60,
        facts: &[
            "Can live for over 500 years",
            "Produces acorns that are a vital food source for wildlife",
            "Has distinctive pointed lobes on its leaves",
        ],
    },
    CatalogEntry {
        name: "Limestone Building",
        description: "A structure made from sedimentary rock composed of calcium carbonate.",
        rarity: 4,
        points: 80,
        facts: &[
            "Limestone is formed from the accumulation of marine fossils",
            "Common in historic buildings due to its durability",
            "Susceptible to acid rain damage",
        ],
    },
    CatalogEntry {
        name: "Lady Bug",
        description: "A small, round, typically red beetle with black spots.",
        rarity: 2,
        points: 40,
        facts: &[
            "They can eat up to 5,000 aphids in their lifetime",
            "Their bright colors warn predators of their bad taste",
            "Some can have up to 24 spots on their wings",
        ],
    },
    CatalogEntry {
        name: "Blue Morpho Butterfly",
        description: "A tropical butterfly with iridescent blue wings.",
        rarity: 8,
        points: 160,
        facts: &[
            "One of the largest butterflies with a wingspan up to 8 inches",
            "The blue color is not from pigment but from light reflection",
            "Native to tropical rainforests of Latin America",
        ],
    },
];

/// シードアイテム: (id, name, image, description, (年, 月, 日), rarity, points)
const SEED: [(&str, &str, &str, &str, (i32, u32, u32), u8, u32); 3] = [
    (
        "1",
        "Monarch Butterfly",
        "https://images.unsplash.com/photo-1617192029920-feee76078f99?w=800&auto=format&fit=crop",
        "A migratory butterfly known for its distinctive orange and black wings.",
        (2023, 7, 15),
        6,
        120,
    ),
    (
        "2",
        "Red Oak Tree",
        "https://images.unsplash.com/photo-1596339302350-8705e6f32da6?w=800&auto=format&fit=crop",
        "A common hardwood tree in North America with pointed-lobed leaves.",
        (2023, 7, 20),
        3,
        60,
    ),
    (
        "3",
        "Limestone Building",
        "https://images.unsplash.com/photo-1570129476815-ba368ac77013?w=800&auto=format&fit=crop",
        "A structure made from sedimentary rock composed of calcium carbonate.",
        (2023, 8, 5),
        4,
        80,
    ),
];

/// 初回起動時のコレクション
pub fn seed_collection() -> Vec<CollectionItem> {
    SEED.iter()
        .filter_map(|&(id, name, image, description, (y, m, d), rarity, points)| {
            Some(CollectionItem {
                id: id.to_string(),
                name: name.to_string(),
                image: image.to_string(),
                description: description.to_string(),
                date_found: NaiveDate::from_ymd_opt(y, m, d)?,
                rarity,
                points,
            })
        })
        .collect()
}
