/// アプリケーション設定モジュール
///
/// コンパイル時定数として定義される静的設定を管理します。
/// これらの設定は実行時には変更できません。
/// APIのベースURLのみ、ユーザー設定・環境変数・CLIフラグで上書きできます。

/// 1MBあたりのバイト数
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// アプリケーション全体の設定
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub logging: LoggingConfig,
}

/// API関連の設定
#[derive(Debug, Clone, Copy)]
pub struct ApiConfig {
    /// バックエンドAPIのデフォルトのベースURL
    pub base_url: &'static str,

    /// アップロード先を払い出すエンドポイント
    pub upload_request_path: &'static str,

    /// 共有リンクのパス（`<base>/file/<id>`）
    pub share_path: &'static str,

    /// アップロード先リクエストのタイムアウト(秒)
    pub timeout_seconds: u64,

    /// 接続確立のタイムアウト(秒)
    pub connect_timeout_seconds: u64,
}

/// アップロード関連の設定
#[derive(Debug, Clone, Copy)]
pub struct UploadConfig {
    /// アップロード可能な最大ファイルサイズ (バイト)
    pub max_file_size: u64,

    /// 対応するアーカイブ形式（拡張子）
    pub supported_formats: &'static [&'static str],

    /// 進捗通知の単位となるチャンクサイズ (バイト)
    pub progress_chunk_size: usize,

    /// 転送全体のタイムアウト(秒)。0 の場合は無制限
    pub transfer_timeout_seconds: u64,

    /// `upload --copy` の後、共有リンクをクリップボードに保持する最大時間(秒)
    ///
    /// X11/Wayland ではクリップボードの所有プロセスが終了すると内容が消えるため、
    /// 他の内容がコピーされるか、この時間が過ぎるまで終了を待つ。
    pub clipboard_hold_seconds: u64,
}

/// ロギング関連の設定
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    /// RUST_LOG と -v が無い場合のログレベル
    pub default_level: &'static str,
}

/// 静的設定（グローバル定数）
pub const APP_CONFIG: AppConfig = AppConfig {
    api: ApiConfig {
        base_url: "http://localhost:3333",
        upload_request_path: "/file/upload",
        share_path: "/file",
        timeout_seconds: 30,
        connect_timeout_seconds: 10,
    },
    upload: UploadConfig {
        max_file_size: 1024 * BYTES_PER_MB,
        supported_formats: &["zip"],
        progress_chunk_size: 64 * 1024,
        transfer_timeout_seconds: 0,
        clipboard_hold_seconds: 30,
    },
    logging: LoggingConfig {
        default_level: "warn",
    },
};

/// APIのベースURLを上書きする環境変数
pub const API_URL_ENV: &str = "SHAREUP_API_URL";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_limits() {
        assert_eq!(APP_CONFIG.upload.max_file_size, 1_073_741_824);
        assert!(APP_CONFIG.upload.progress_chunk_size > 0);
        assert_eq!(APP_CONFIG.upload.supported_formats, &["zip"]);
    }

    #[test]
    fn test_api_paths() {
        assert!(APP_CONFIG.api.upload_request_path.starts_with('/'));
        assert_eq!(APP_CONFIG.api.share_path, "/file");
        assert!(!APP_CONFIG.api.base_url.ends_with('/'));
    }
}
