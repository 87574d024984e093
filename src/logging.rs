/// ロギングの初期化
///
/// ログは stderr に出力する（stdout は --machine のJSON出力用）。
/// フィルタの優先順位: `RUST_LOG` > `-v` の回数 > ビルド時のデフォルト
use crate::config::APP_CONFIG;
use tracing_subscriber::EnvFilter;

/// `-v` の回数からフィルタ指定を決める
fn directive(verbosity: u8) -> String {
    match verbosity {
        0 => APP_CONFIG.logging.default_level.to_string(),
        1 => format!("{}=debug", env!("CARGO_CRATE_NAME")),
        _ => format!("{}=trace", env!("CARGO_CRATE_NAME")),
    }
}

pub fn init(verbosity: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(verbosity)));

    // テストなどで既に初期化済みの場合は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
