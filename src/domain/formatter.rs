/// ドメインサービス: 表示用フォーマット
///
/// バイト数と転送進捗を人間向けの文字列に変換する。
use crate::config::BYTES_PER_MB;

/// バイト数をMB表記にする（小数点以下2桁）
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB as f64)
}

/// 転送進捗の1行表示
///
/// 例: `42% (0.42 MB / 1.00 MB)`
pub fn format_transfer(loaded: u64, total: u64, percent: u8) -> String {
    format!(
        "{}% ({} / {})",
        percent,
        format_megabytes(loaded),
        format_megabytes(total)
    )
}
