/// インフラ層: HTTP通信
///
/// - `client`: バックエンドAPIとストレージへのHTTPクライアント
/// - `types`: APIのリクエスト・レスポンス型
/// - `error`: インフラ層のエラー
pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
