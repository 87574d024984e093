/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層（main.rs/cli.rs）で
/// 人間向けと機械向けの出力フォーマットを決定する。
use crate::config::BaseUrlSource;
use crate::domain::session::SelectedFile;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Upload(UploadResult),
    Session(SessionResult),
    Config(ConfigResult),
}

/// アップロードコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    /// ファイル名
    pub file_name: String,
    /// ファイルパス
    pub file_path: String,
    /// ファイルサイズ（bytes）
    pub file_size: u64,
    /// Content-Type
    pub content_type: String,
    /// アップロードID
    pub upload_id: String,
    /// 共有リンク
    pub share_url: String,
    /// 共有リンクをクリップボードにコピーしたか
    pub copied: bool,
    /// 完了日時
    pub uploaded_at: DateTime<Utc>,
}

impl UploadResult {
    pub fn new(file: &SelectedFile, upload_id: String, share_url: String, copied: bool) -> Self {
        Self {
            file_name: file.name.clone(),
            file_path: file.path.display().to_string(),
            file_size: file.size,
            content_type: file.content_type.clone(),
            upload_id,
            share_url,
            copied,
            uploaded_at: Utc::now(),
        }
    }
}

/// 対話セッションの結果
#[derive(Debug, Clone, Serialize)]
pub struct SessionResult {
    /// セッション中に完了したアップロード（完了順）
    pub uploads: Vec<UploadResult>,
}

/// 設定表示コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ConfigResult {
    pub api_base_url: String,
    pub api_base_url_source: BaseUrlSource,
    /// ユーザー設定ファイルのパス（取得できない環境では None）
    pub config_path: Option<String>,
    pub copy_link: bool,
    pub max_file_size: u64,
    pub supported_formats: Vec<String>,
    pub api_timeout_seconds: u64,
    /// 0 の場合は無制限
    pub transfer_timeout_seconds: u64,
}
