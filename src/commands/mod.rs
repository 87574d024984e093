/// アプリケーション層: コマンド
///
/// 各コマンドは `Context` を受け取り `CommandResult` を返す。
/// 出力はプレゼンテーション層が担当する。
pub mod config;
pub mod result;
pub mod session;
pub mod upload;

pub use result::CommandResult;

use crate::api::ApiClient;
use crate::config::{ApiBaseUrl, APP_CONFIG, UserConfig};
use crate::error_severity::ErrorSeverity;
use crate::flow::{UploadController, UploadObserver};
use anyhow::{Context as _, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// コマンド共通の実行コンテキスト
#[derive(Debug, Clone)]
pub struct Context {
    pub base_url: ApiBaseUrl,
    pub user_config: UserConfig,
    pub machine_output: bool,
}

impl Context {
    /// ベースURLに接続するコントローラーを作成
    pub fn controller(&self, observer: Arc<dyn UploadObserver>) -> Result<Arc<UploadController>> {
        let client = ApiClient::new(self.base_url.value.as_str())
            .context("Failed to create API client")?;
        debug!(
            base_url = %self.base_url.value,
            source = %self.base_url.source,
            chunk_size = APP_CONFIG.upload.progress_chunk_size,
            transfer_timeout_seconds = APP_CONFIG.upload.transfer_timeout_seconds,
            "upload controller ready"
        );
        let controller = UploadController::new(client, observer)
            .with_transfer_timeout(transfer_timeout(APP_CONFIG.upload.transfer_timeout_seconds));
        Ok(Arc::new(controller))
    }
}

/// 転送タイムアウトの設定値（0 は無制限）
fn transfer_timeout(seconds: u64) -> Option<Duration> {
    (seconds > 0).then(|| Duration::from_secs(seconds))
}

/// Ctrl-C を監視する
///
/// 送信中なら中断し、そうでなければ終了コード 130 でプロセスを終了する。
/// 返されたハンドルはコマンド終了時に `abort` すること。
pub fn spawn_interrupt_watcher(controller: Arc<UploadController>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if !controller.abort() {
                eprintln!();
                std::process::exit(ErrorSeverity::Interrupted.exit_code());
            }
        }
    })
}
