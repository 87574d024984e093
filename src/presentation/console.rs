/// プレゼンテーション層: コンソールへの通知・進捗出力
///
/// - 人間向け: 通知は stderr に1行（✓ / ✗）、転送進捗は同じ行を上書き
/// - 機械向け（--machine）: 通知と進捗をJSON Lines で stdout に出力
use crate::domain::notification::Notification;
use crate::domain::progress::{UploadEvent, UploadProgress};
use crate::flow::UploadObserver;
use crate::presentation::progress::DisplayProgress;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};

/// まだ進捗率を表示していないことを表す値
const NO_PERCENT: u16 = u16::MAX;

pub struct ConsoleObserver {
    machine_output: bool,
    show_progress: bool,
    last_percent: AtomicU16,
    inline_open: AtomicBool,
}

impl ConsoleObserver {
    /// # Arguments
    /// * `machine_output` - JSON出力にするか
    /// * `show_progress` - 進捗イベントを出力するか（通知は常に出力）
    pub fn new(machine_output: bool, show_progress: bool) -> Self {
        Self {
            machine_output,
            show_progress,
            last_percent: AtomicU16::new(NO_PERCENT),
            inline_open: AtomicBool::new(false),
        }
    }

    /// 上書き中の進捗行を閉じる
    fn close_inline(&self) {
        if self.inline_open.swap(false, Ordering::SeqCst) {
            eprintln!();
        }
    }

    /// 同じ進捗率の更新は表示しない
    fn is_new_percent(&self, progress: &UploadProgress) -> bool {
        match &progress.event {
            UploadEvent::Transferring { percent, .. } => {
                let percent = u16::from(*percent);
                self.last_percent.swap(percent, Ordering::SeqCst) != percent
            }
            _ => true,
        }
    }
}

impl UploadObserver for ConsoleObserver {
    fn notify(&self, notification: &Notification) {
        if self.machine_output {
            let json = serde_json::json!({
                "type": "notification",
                "notification": notification,
            });
            println!("{}", json);
            return;
        }

        self.close_inline();
        let mark = if notification.is_failure() { "✗" } else { "✓" };
        eprintln!("{} {}", mark, notification.message());
    }

    fn progress(&self, progress: &UploadProgress) {
        if !self.show_progress || !self.is_new_percent(progress) {
            return;
        }

        if self.machine_output {
            let json = serde_json::json!({
                "type": "progress",
                "progress": progress,
            });
            println!("{}", json);
            return;
        }

        let Some(display) = Option::<DisplayProgress>::from(progress) else {
            return;
        };

        if display.is_inline() {
            eprint!("\r{}", display.message);
            let _ = std::io::stderr().flush();
            self.inline_open.store(true, Ordering::SeqCst);
        } else {
            self.close_inline();
            self.last_percent.store(NO_PERCENT, Ordering::SeqCst);
            eprintln!("{}", display.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transferring(percent: u8) -> UploadProgress {
        UploadProgress::new(UploadEvent::Transferring {
            loaded: u64::from(percent),
            total: 100,
            percent,
        })
    }

    #[test]
    fn test_repeated_percent_is_suppressed() {
        let observer = ConsoleObserver::new(false, true);
        assert!(observer.is_new_percent(&transferring(10)));
        assert!(!observer.is_new_percent(&transferring(10)));
        assert!(observer.is_new_percent(&transferring(11)));
    }

    #[test]
    fn test_non_transfer_events_always_pass() {
        let observer = ConsoleObserver::new(false, true);
        let event = UploadProgress::new(UploadEvent::RequestingDestination {
            file_name: "a.zip".to_string(),
        });
        assert!(observer.is_new_percent(&event));
        assert!(observer.is_new_percent(&event));
    }

    #[test]
    fn test_output_does_not_panic() {
        for machine in [false, true] {
            let observer = ConsoleObserver::new(machine, true);
            observer.progress(&transferring(50));
            observer.notify(&Notification::success("File uploaded successfully"));
            observer.notify(&Notification::failure("File upload aborted"));
        }
    }
}
