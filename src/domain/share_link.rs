/// ドメインサービス: 共有リンクの構築
use crate::config::APP_CONFIG;

/// `<base>/file/<id>` 形式の共有リンクを組み立てる
///
/// `base` 末尾の `/` は取り除く。
pub fn build_share_url(base_url: &str, upload_id: &str) -> String {
    format!(
        "{}{}/{}",
        base_url.trim_end_matches('/'),
        APP_CONFIG.api.share_path,
        upload_id
    )
}
