/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - コンパイル時定数として定義される静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれる動的設定
///
/// APIのベースURLだけは `endpoint::resolve_base_url` で
/// CLIフラグ・環境変数・UserConfig・APP_CONFIG の順に解決します。
pub mod app;
pub mod endpoint;
pub mod error;
pub mod user;

pub use app::{APP_CONFIG, BYTES_PER_MB};
pub use endpoint::{ApiBaseUrl, BaseUrlSource};
pub use user::UserConfig;
