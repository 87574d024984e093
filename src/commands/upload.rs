use crate::commands::result::{CommandResult, UploadResult};
use crate::commands::{Context, spawn_interrupt_watcher};
use crate::config::APP_CONFIG;
use crate::domain::error::DomainError;
use crate::domain::notification::Notification;
use crate::domain::validator;
use crate::flow::{ClipboardWriter, SubmitOutcome, UploadObserver};
use crate::presentation::clipboard::{self, SystemClipboard};
use crate::presentation::console::ConsoleObserver;
use anyhow::{Context as _, Result, bail};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// アップロードコマンドを実行する
///
/// # 引数
/// * `ctx` - 実行コンテキスト
/// * `file_path` - アップロード対象のアーカイブのパス
/// * `show_progress` - 進捗を表示するか
/// * `copy_link` - 完了後に共有リンクをコピーするか（config.toml の copy_link でも有効）
///
/// # エラー
/// このレイヤーでは anyhow::Result を返し、
/// ドメイン層・インフラ層のエラーを集約する。
/// Ctrl-C で中断した場合は `DomainError::UploadAborted` を返す。
pub async fn execute(
    ctx: &Context,
    file_path: &str,
    show_progress: bool,
    copy_link: bool,
) -> Result<CommandResult> {
    let mut clipboard = SystemClipboard::new();
    let hold = (!clipboard::outlives_process())
        .then(|| Duration::from_secs(APP_CONFIG.upload.clipboard_hold_seconds));

    execute_with_clipboard(ctx, file_path, show_progress, copy_link, &mut clipboard, hold).await
}

/// クリップボードを指定してアップロードコマンドを実行する
///
/// `hold` が `Some` の場合、コピーした共有リンクをコマンド終了前に最大 `hold` の間保持する。
async fn execute_with_clipboard(
    ctx: &Context,
    file_path: &str,
    show_progress: bool,
    copy_link: bool,
    clipboard: &mut dyn ClipboardWriter,
    hold: Option<Duration>,
) -> Result<CommandResult> {
    // DomainError は自動的に anyhow::Error に変換される
    let file = validator::validate_upload_file(file_path).context("File validation failed")?;

    let observer = Arc::new(ConsoleObserver::new(ctx.machine_output, show_progress));
    let controller = ctx.controller(observer.clone())?;
    controller.select_file(Some(file.clone()));

    let watcher = spawn_interrupt_watcher(Arc::clone(&controller));
    let outcome = controller.submit().await;
    watcher.abort();

    match outcome.context("Upload failed")? {
        SubmitOutcome::Completed {
            upload_id,
            share_url,
        } => {
            info!(upload_id = %upload_id, "upload command finished");

            // コピーの失敗は通知済みのため、アップロード自体は成功として扱う
            let mut copied = (copy_link || ctx.user_config.copy_link)
                && controller.copy_share_link(clipboard).is_ok()
                && controller.snapshot().copied();

            if copied && let Some(hold) = hold {
                if !ctx.machine_output {
                    eprintln!("Share link: {}", share_url);
                }
                copied = hold_share_link(&share_url, hold, ctx.machine_output, observer.as_ref()).await;
            }

            Ok(CommandResult::Upload(UploadResult::new(
                &file, upload_id, share_url, copied,
            )))
        }
        SubmitOutcome::Aborted => Err(DomainError::UploadAborted.into()),
        SubmitOutcome::Skipped => bail!("No file was selected for upload"),
    }
}

/// 共有リンクが他のアプリから貼り付けられるよう、終了前にクリップボードを保持する
///
/// 他の内容がコピーされる、`hold` が過ぎる、Ctrl-C のいずれかで戻る。
///
/// # Returns
/// 保持に失敗した場合 false（失敗通知を出す）
async fn hold_share_link(
    share_url: &str,
    hold: Duration,
    machine_output: bool,
    observer: &dyn UploadObserver,
) -> bool {
    if !machine_output {
        eprintln!(
            "Keeping the link on the clipboard for up to {}s (copy something else or press Ctrl-C to finish)...",
            hold.as_secs()
        );
    }

    // spawn_blocking だとランタイム終了時に保持の完了を待ってしまうため、専用スレッドで行う
    let (done_tx, done_rx) = oneshot::channel();
    let text = share_url.to_string();
    std::thread::spawn(move || {
        let _ = done_tx.send(clipboard::hold_text(&text, hold));
    });

    tokio::select! {
        result = done_rx => match result {
            Ok(Ok(())) => {
                debug!("clipboard hold finished");
                true
            }
            Ok(Err(error)) => {
                warn!(%error, "failed to hold clipboard contents");
                observer.notify(&Notification::failure(format!(
                    "Could not keep the link on the clipboard: {}",
                    error
                )));
                false
            }
            Err(_) => {
                warn!("clipboard hold thread exited without a result");
                false
            }
        },
        _ = tokio::signal::ctrl_c() => {
            debug!("clipboard hold interrupted");
            true
        }
    }
}
