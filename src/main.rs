use anyhow::Context;
use clap::Parser;
use object_finder::{cli, config, hunt, identifier, session, state, storage, workflow};
use object_finder::capture::{CameraRoll, FileSource, ImageSource};
use object_finder_common::{achievements, rank_progress, sorted, summarize};
use cli::{Cli, Commands};
use config::Config;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use workflow::{SaveOutcome, Workflow, WorkflowState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().context("設定の読み込みに失敗しました")?;
    let provider = cli.ai_provider.unwrap_or(config.provider);

    let data_dir = config.data_dir()?;
    tracing::debug!(data_dir = %data_dir.display(), %provider, "starting");
    let backend = Arc::new(storage::FileStore::open(&data_dir));
    let app = session::provide(state::AppStore::open(backend))?;

    match cli.command {
        Commands::Hunt { camera_dir } => {
            println!("📷 object-finder - ハント\n");

            let identifier = identifier::build_identifier(provider, &config);
            let mut workflow = Workflow::new(identifier, app.clone(), Arc::new(hunt::ConsoleNotifier));

            let source: Box<dyn ImageSource> = match camera_dir.or_else(|| config.camera_dir.clone()) {
                Some(dir) => {
                    println!("カメラロール: {}\n", dir.display());
                    Box::new(CameraRoll::new(dir))
                }
                None => Box::new(hunt::PromptedFile),
            };

            hunt::run_hunt(&mut workflow, source.as_ref()).await?;
        }

        Commands::Identify { image, save } => {
            println!("🔍 object-finder - 識別\n");

            let identifier = identifier::build_identifier(provider, &config);
            let mut workflow = Workflow::new(identifier, app.clone(), Arc::new(hunt::ConsoleNotifier));

            workflow.start_capture()?;
            if !workflow.capture(&FileSource::new(&image))? {
                anyhow::bail!("画像を取得できませんでした: {}", image.display());
            }

            match hunt::resolve_with_spinner(&mut workflow).await {
                WorkflowState::Identified { result, .. } => hunt::print_identification(&result),
                WorkflowState::Failed { reason, .. } => anyhow::bail!("識別に失敗しました: {}", reason),
                other => anyhow::bail!("予期しない状態: {}", other.name()),
            }

            if save {
                if let SaveOutcome::Added(item) = workflow.save_to_collection()? {
                    println!("  id: {}", item.id);
                }
            }

            println!("\nYour Points: {}", app.points());
        }

        Commands::Collection { sort } => {
            let state = app.snapshot();
            let summary = summarize(&state.collection);

            println!("My Collection");
            println!(
                "{} objects discovered • {} total points\n",
                summary.count, summary.total_points
            );

            if state.collection.is_empty() {
                println!("Your collection is empty");
                println!("Start taking pictures of objects to build your collection!");
            }

            for item in sorted(&state.collection, sort) {
                println!("{} ({} points)", item.name, item.points);
                println!("  Found on {}", item.date_found);
                println!("  Rarity: {}", hunt::rarity_bar(item.rarity));
                println!("  {}", item.description);
            }
        }

        Commands::Profile => {
            let state = app.snapshot();
            let progress = rank_progress(state.points);

            println!("{}", progress.current.name);
            if let Some(next) = progress.next {
                println!(
                    "  {} / {} points to {} ({:.0}%)",
                    state.points, next.points, next.name, progress.percent
                );
            }
            println!("  Total Points:  {}", state.points);
            println!("  Objects Found: {}", state.collection.len());

            println!("\nAchievements");
            for achievement in achievements(state.collection.len()) {
                println!(
                    "  [{}] {} - {}",
                    if achievement.completed { "✓" } else { "?" },
                    achievement.name,
                    achievement.description
                );
            }
        }

        Commands::Config { provider, delay_ms, camera_dir, show } => {
            let mut config = config;
            let changed = provider.is_some() || delay_ms.is_some() || camera_dir.is_some();

            if let Some(provider) = provider {
                config.provider = provider;
            }
            if let Some(delay_ms) = delay_ms {
                config.identify_delay_ms = delay_ms;
            }
            if let Some(dir) = camera_dir {
                config.camera_dir = Some(dir);
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  プロバイダ: {}", config.provider);
                println!("  識別待ち時間: {}ms", config.identify_delay_ms);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  カメラロール: {}",
                    config
                        .camera_dir
                        .as_ref()
                        .map(|d| d.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                );
                println!("  データ: {}", data_dir.display());
            }
        }
    }

    Ok(())
}
