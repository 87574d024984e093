/// アプリケーション層: アップロードフロー
///
/// `UploadController` がセッションを所有し、アップロード先の要求・転送・
/// 共有リンクの公開を順に実行する。通知と進捗の表示、クリップボードへの書き込みは
/// 下記のトレイトを通してプレゼンテーション層に委ねる。
use crate::api::error::InfraError;
use crate::domain::notification::Notification;
use crate::domain::progress::UploadProgress;

pub mod controller;

pub use controller::{SubmitOutcome, UploadController};

/// 通知と進捗イベントの受け手
///
/// 転送中の進捗はランタイムのワーカースレッドから呼ばれることがある。
pub trait UploadObserver: Send + Sync {
    fn notify(&self, notification: &Notification);

    fn progress(&self, progress: &UploadProgress);
}

/// 共有リンクの書き込み先
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), InfraError>;
}
