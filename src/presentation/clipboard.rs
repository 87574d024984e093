/// プレゼンテーション層: システムクリップボード
///
/// X11/Wayland ではクリップボードの内容は所有者が生きている間だけ保持されるため、
/// `arboard::Clipboard` は最初の書き込み時に作り、このオブジェクトが破棄されるまで保持する。
/// すぐに終了するコマンドは `hold_text` で内容が置き換わるまで待つ必要がある。
use crate::api::error::InfraError;
use crate::flow::ClipboardWriter;
use std::time::Duration;

#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), InfraError> {
        if self.inner.is_none() {
            self.inner = Some(open()?);
        }

        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| InfraError::clipboard(format!("Failed to write clipboard: {}", e))),
            None => Err(InfraError::clipboard("Clipboard is not available")),
        }
    }
}

fn open() -> Result<arboard::Clipboard, InfraError> {
    arboard::Clipboard::new()
        .map_err(|e| InfraError::clipboard(format!("Failed to open clipboard: {}", e)))
}

/// プロセス終了後もクリップボードの内容が残るプラットフォームか
pub fn outlives_process() -> bool {
    !cfg!(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))
}

/// `text` をクリップボードに置き、他の内容に置き換わるか `hold` が過ぎるまで提供し続ける
///
/// 呼び出し元のスレッドをブロックする。内容が残るプラットフォームでは何もしない。
#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
pub fn hold_text(text: &str, hold: Duration) -> Result<(), InfraError> {
    use arboard::SetExtLinux;

    let mut clipboard = open()?;
    clipboard
        .set()
        .wait_until(std::time::Instant::now() + hold)
        .text(text.to_string())
        .map_err(|e| InfraError::clipboard(format!("Failed to hold clipboard: {}", e)))
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
pub fn hold_text(_text: &str, _hold: Duration) -> Result<(), InfraError> {
    Ok(())
}
