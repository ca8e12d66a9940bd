//! 対話式ハント（撮影 → 識別 → コレクション追加）
//!
//! 1サイクルの状態遷移は Workflow が持ち、ここは入力と表示だけを担当する

use crate::capture::{ImagePayload, ImageSource};
use crate::error::{ObjectFinderError, Result};
use crate::notice::{Notice, Notifier};
use crate::workflow::{SaveOutcome, Workflow, WorkflowState};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use object_finder_common::IdentificationResult;
use std::path::PathBuf;
use std::time::Duration;

/// 通知をコンソールに出す
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            eprintln!("✖ {}", notice);
        } else {
            println!("✔ {}", notice);
        }
    }
}

/// 画像パスを毎回入力してもらう取得元（カメラロール未指定時）
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptedFile;

impl ImageSource for PromptedFile {
    fn capture(&self) -> Result<Option<ImagePayload>> {
        let input: String = Input::new()
            .with_prompt("Image path (empty: cancel)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ObjectFinderError::CliExecution(e.to_string()))?;

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        ImagePayload::from_file(&PathBuf::from(trimmed)).map(Some)
    }
}

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    TakePicture,
    Quit,
}

/// 撮影した写真の確認操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    UsePhoto,
    Retake,
    Cancel,
}

/// 識別後の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    AddToCollection,
    TakeAnother,
    Quit,
}

pub fn parse_menu_action(input: &str) -> Option<MenuAction> {
    match input.trim() {
        "" | "t" => Some(MenuAction::TakePicture),
        "q" | "Q" => Some(MenuAction::Quit),
        _ => None,
    }
}

pub fn parse_review_action(input: &str) -> Option<ReviewAction> {
    match input.trim() {
        "" | "u" => Some(ReviewAction::UsePhoto),
        "r" => Some(ReviewAction::Retake),
        "c" | "q" => Some(ReviewAction::Cancel),
        _ => None,
    }
}

pub fn parse_result_action(input: &str) -> Option<ResultAction> {
    match input.trim() {
        "a" => Some(ResultAction::AddToCollection),
        "" | "n" => Some(ResultAction::TakeAnother),
        "q" | "Q" => Some(ResultAction::Quit),
        _ => None,
    }
}

fn prompt<T>(text: &str, parse: fn(&str) -> Option<T>) -> Result<T> {
    loop {
        let input: String = Input::new()
            .with_prompt(text)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ObjectFinderError::CliExecution(e.to_string()))?;
        if let Some(action) = parse(&input) {
            return Ok(action);
        }
        println!("  unknown command: {}", input.trim());
    }
}

/// レアリティバー（10段階）
pub fn rarity_bar(rarity: u8) -> String {
    let filled = usize::from(rarity.min(10));
    format!("[{}{}] {}/10", "#".repeat(filled), "-".repeat(10 - filled), rarity)
}

/// 識別結果を表示
pub fn print_identification(result: &IdentificationResult) {
    println!("\n{}", result.name);
    println!("  {}", result.description);
    println!("  Rarity Score:  {}", rarity_bar(result.rarity));
    println!("  Points Earned: +{}", result.points);
    if !result.facts.is_empty() {
        println!("  Fun Facts:");
        for fact in &result.facts {
            println!("    - {}", fact);
        }
    }
    println!();
}

/// 識別完了までスピナーを出して待つ
pub async fn resolve_with_spinner(workflow: &mut Workflow) -> WorkflowState {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Identifying object...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let state = workflow.resolve().await.clone();

    spinner.finish_and_clear();
    state
}

/// 対話ループ
pub async fn run_hunt(workflow: &mut Workflow, source: &dyn ImageSource) -> Result<()> {
    println!("Object Finder: take pictures of objects around you and build your collection\n");

    loop {
        println!("Your Points: {}", workflow.store().points());
        match prompt("Take a picture? [Enter/t] or quit [q]", parse_menu_action)? {
            MenuAction::TakePicture => {}
            MenuAction::Quit => break,
        }

        workflow.start_capture()?;
        let mut accepted = false;
        while !accepted {
            let Some(image) = workflow.acquire(source)? else {
                // 取得元が使えない場合は撮影をやめる
                workflow.cancel_capture()?;
                break;
            };
            println!("  captured {} ({})", image.short_id(), image.mime());

            match prompt("Use this photo [Enter/u], retake [r], cancel [c]", parse_review_action)? {
                ReviewAction::UsePhoto => {
                    workflow.accept_photo(image)?;
                    accepted = true;
                }
                ReviewAction::Retake => continue,
                ReviewAction::Cancel => {
                    workflow.cancel_capture()?;
                    break;
                }
            }
        }
        if !accepted {
            continue;
        }

        let state = resolve_with_spinner(workflow).await;
        if !state.is_resolved() {
            tracing::warn!(state = state.name(), "identification did not resolve");
            workflow.reset();
            continue;
        }
        match state {
            WorkflowState::Identified { result, .. } => print_identification(&result),
            WorkflowState::Failed { .. } => {
                println!("Identification Failed. We couldn't identify this object.\n");
                workflow.reset();
                continue;
            }
            _ => {}
        }

        let mut quit = false;
        loop {
            match prompt("Add to collection [a], take another photo [Enter/n], quit [q]", parse_result_action)? {
                ResultAction::AddToCollection => match workflow.save_to_collection()? {
                    SaveOutcome::Added(_) => {}
                    SaveOutcome::AlreadySaved => println!("  already added to collection"),
                },
                ResultAction::TakeAnother => break,
                ResultAction::Quit => {
                    quit = true;
                    break;
                }
            }
        }
        workflow.reset();
        if quit {
            break;
        }
    }

    println!("\nFinal Points: {}", workflow.store().points());
    Ok(())
}
