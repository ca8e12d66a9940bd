use clap::{Parser, Subcommand};
use crate::ai_provider::AiProvider;
use object_finder_common::SortOrder;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "object-finder")]
#[command(about = "写真で身の回りの物を集めるオブジェクト図鑑", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 識別プロバイダ（省略時は設定ファイルの値）
    #[arg(long, global = true)]
    pub ai_provider: Option<AiProvider>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話的に撮影・識別・コレクション追加を繰り返す
    Hunt {
        /// カメラロールとして使うフォルダ（最新の画像を撮影結果とみなす）
        #[arg(short, long)]
        camera_dir: Option<PathBuf>,
    },

    /// 画像1枚を識別してポイントを獲得
    Identify {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 識別結果をコレクションに追加
        #[arg(long)]
        save: bool,
    },

    /// コレクションを表示
    Collection {
        /// 並び順 (all/rarity/recent)
        #[arg(short, long, default_value = "all")]
        sort: SortOrder,
    },

    /// ポイント・ランク・実績を表示
    Profile,

    /// 設定を表示/編集
    Config {
        /// 既定の識別プロバイダを設定
        #[arg(long)]
        provider: Option<AiProvider>,

        /// モック識別の待ち時間（ミリ秒）
        #[arg(long)]
        delay_ms: Option<u64>,

        /// 既定のカメラロールフォルダを設定
        #[arg(long)]
        camera_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
