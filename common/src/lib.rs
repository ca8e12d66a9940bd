//! Object Finder Common Library
//!
//! CLIと将来のWebフロントエンドで共有される型とユーティリティ

pub mod types;
pub mod catalog;
pub mod collection;
pub mod rank;
pub mod error;
pub mod parser;
pub mod prompts;

pub use types::{ApplicationState, CollectionItem, IdentificationResult, NewCollectionItem};
pub use catalog::{CATALOG, seed_collection, DEFAULT_POINTS};
pub use collection::{CollectionSummary, SortOrder, sorted, summarize};
pub use rank::{Achievement, Rank, RankProgress, RANKS, achievements, rank_progress};
pub use error::{Error, Result};
pub use parser::{extract_json_object, parse_identification_response};
pub use prompts::build_identify_prompt;
