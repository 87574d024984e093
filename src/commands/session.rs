/// 対話セッションコマンド
///
/// 1つのアップロードセッションを使い回し、
/// 選択 → 送信 → (コピー) → リセット を繰り返す。
/// 失敗・中断後はファイルを保持したまま再送信できる。
use crate::commands::result::{CommandResult, SessionResult, UploadResult};
use crate::commands::{Context, spawn_interrupt_watcher};
use crate::api::error::InfraError;
use crate::domain::validator;
use crate::flow::{SubmitOutcome, UploadController};
use crate::presentation::clipboard::SystemClipboard;
use crate::presentation::console::ConsoleObserver;
use crate::presentation::input::{self, PathInput};
use anyhow::{Context as _, Result};
use std::sync::Arc;
use tracing::debug;

const COMPLETED_MENU: &str = "[c] copy link  [n] upload another file  [q] quit:";
const COMPLETED_CHOICES: [char; 3] = ['c', 'n', 'q'];
const RETRY_MENU: &str = "[r] retry  [s] select another file  [q] quit:";
const RETRY_CHOICES: [char; 3] = ['r', 's', 'q'];

/// セッションの次の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Select,
    Submit,
    Completed,
    Retry,
}

/// 対話セッションを実行する
///
/// # 引数
/// * `ctx` - 実行コンテキスト
/// * `show_progress` - 進捗を表示するか
pub async fn execute(ctx: &Context, show_progress: bool) -> Result<CommandResult> {
    let observer = Arc::new(ConsoleObserver::new(ctx.machine_output, show_progress));
    let controller = ctx.controller(observer)?;

    let watcher = spawn_interrupt_watcher(Arc::clone(&controller));
    let uploads = run(ctx, &controller).await;
    watcher.abort();

    Ok(CommandResult::Session(SessionResult { uploads: uploads? }))
}

async fn run(ctx: &Context, controller: &UploadController) -> Result<Vec<UploadResult>> {
    let mut uploads: Vec<UploadResult> = Vec::new();
    // X11 ではクリップボードの所有者が生きている間だけ内容が残るため、セッション中は保持する
    let mut clipboard = SystemClipboard::new();

    eprintln!("shareup interactive session (Ctrl-C aborts a running upload)");

    let mut step = Step::Select;
    loop {
        step = match step {
            Step::Select => match prompt(input::read_file_path).await? {
                PathInput::Quit => break,
                PathInput::Empty => {
                    controller.select_file(None);
                    Step::Select
                }
                PathInput::Path(path) => match validator::validate_upload_file(&path) {
                    Ok(file) => {
                        controller.select_file(Some(file));
                        Step::Submit
                    }
                    Err(error) => {
                        eprintln!("✗ {}", error);
                        if let Some(hint) = error.hint() {
                            eprintln!("  Hint: {}", hint);
                        }
                        Step::Select
                    }
                },
            },
            Step::Submit => {
                let outcome = controller.submit().await;
                let next = step_after_submit(&outcome);

                match outcome {
                    Ok(SubmitOutcome::Completed {
                        upload_id,
                        share_url,
                    }) => {
                        if let Some(file) = controller.snapshot().file() {
                            if !ctx.machine_output {
                                eprintln!("Share link: {}", share_url);
                            }
                            let copied = ctx.user_config.copy_link
                                && controller.copy_share_link(&mut clipboard).is_ok()
                                && controller.snapshot().copied();
                            uploads.push(UploadResult::new(file, upload_id, share_url, copied));
                        }
                    }
                    Err(error) => {
                        // 失敗通知はコントローラーが出している
                        debug!(%error, "submission failed");
                        if !ctx.machine_output
                            && let Some(hint) = error.hint()
                        {
                            eprintln!("  Hint: {}", hint);
                        }
                    }
                    Ok(SubmitOutcome::Aborted) | Ok(SubmitOutcome::Skipped) => {}
                }
                next
            }
            Step::Completed => match read_choice(COMPLETED_MENU, &COMPLETED_CHOICES).await? {
                Some('c') => {
                    // 失敗時は通知済み
                    let _ = controller.copy_share_link(&mut clipboard);
                    if let Some(last) = uploads.last_mut() {
                        last.copied |= controller.snapshot().copied();
                    }
                    Step::Completed
                }
                Some('n') => {
                    controller.reset()?;
                    Step::Select
                }
                _ => break,
            },
            Step::Retry => match read_choice(RETRY_MENU, &RETRY_CHOICES).await? {
                Some('r') => Step::Submit,
                Some('s') => Step::Select,
                _ => break,
            },
        };
    }

    Ok(uploads)
}

/// stdin の読み取りをブロッキング用スレッドで行う
///
/// 読み取り待ちの間も Ctrl-C の監視タスクを動かし続けるため、ランタイムのスレッドでは読まない。
async fn prompt<T, F>(read: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(read)
        .await
        .context("Input prompt task failed")?
}

async fn read_choice(menu: &'static str, choices: &'static [char]) -> Result<Option<char>> {
    prompt(move || input::read_choice(menu, choices)).await
}

/// 送信結果から次の操作を決める
fn step_after_submit(outcome: &Result<SubmitOutcome, InfraError>) -> Step {
    match outcome {
        Ok(SubmitOutcome::Completed { .. }) => Step::Completed,
        Ok(SubmitOutcome::Aborted) | Err(_) => Step::Retry,
        Ok(SubmitOutcome::Skipped) => Step::Select,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_prompt_keeps_runtime_responsive() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let ticker = tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(5)).await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        // 入力待ちの代わりにスレッドを止める
        let value = prompt(|| {
            std::thread::sleep(Duration::from_millis(200));
            Ok(7)
        })
        .await
        .unwrap();
        ticker.abort();

        assert_eq!(value, 7);
        assert!(ticks.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn test_prompt_propagates_read_error() {
        let result: Result<PathInput> = prompt(|| anyhow::bail!("stdin closed")).await;
        assert!(result.unwrap_err().to_string().contains("stdin closed"));
    }

    #[test]
    fn test_step_after_submit() {
        let completed = Ok(SubmitOutcome::Completed {
            upload_id: "abc".to_string(),
            share_url: "http://localhost:3333/file/abc".to_string(),
        });
        assert_eq!(step_after_submit(&completed), Step::Completed);
        assert_eq!(step_after_submit(&Ok(SubmitOutcome::Aborted)), Step::Retry);
        assert_eq!(step_after_submit(&Ok(SubmitOutcome::Skipped)), Step::Select);
        assert_eq!(
            step_after_submit(&Err(InfraError::network("connection refused"))),
            Step::Retry
        );
    }
}
