/// プレゼンテーション層: アップロード進捗表示DTO
///
/// ドメイン層の`UploadProgress`をUI表示に適した形式に変換します。
///
/// # 設計方針
/// - `From<&UploadProgress>`で借用による変換（所有権を奪わない）
/// - `Option<DisplayProgress>`で表示抑制を明示的に表現
///   （中断・失敗・完了は通知とコマンド結果で表示するため進捗としては出さない）
use crate::domain::formatter::{format_megabytes, format_transfer};
use crate::domain::progress::{UploadEvent, UploadProgress};

/// 進捗表示のカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressCategory {
    /// ファイル選択
    Selection,
    /// アップロード準備中
    Preparation,
    /// 転送中（同じ行を上書きして表示する）
    Transfer,
}

/// プレゼンテーション層用の進捗情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayProgress {
    pub message: String,
    pub category: ProgressCategory,
}

impl DisplayProgress {
    pub fn new(message: String, category: ProgressCategory) -> Self {
        Self { message, category }
    }

    /// 同じ行を上書きして表示すべきか
    pub fn is_inline(&self) -> bool {
        self.category == ProgressCategory::Transfer
    }
}

impl From<&UploadProgress> for Option<DisplayProgress> {
    fn from(progress: &UploadProgress) -> Self {
        match &progress.event {
            UploadEvent::FileSelected {
                file_name,
                size_bytes,
                ..
            } => Some(DisplayProgress::new(
                format!("Selected: {} ({})", file_name, format_megabytes(*size_bytes)),
                ProgressCategory::Selection,
            )),
            UploadEvent::RequestingDestination { file_name } => Some(DisplayProgress::new(
                format!("Requesting upload destination for: {}", file_name),
                ProgressCategory::Preparation,
            )),
            UploadEvent::DestinationCreated { upload_id } => Some(DisplayProgress::new(
                format!("Upload destination ready (ID: {})", upload_id),
                ProgressCategory::Preparation,
            )),
            UploadEvent::ReadingFile {
                file_name,
                size_bytes,
            } => Some(DisplayProgress::new(
                format!("Reading {} ({})...", file_name, format_megabytes(*size_bytes)),
                ProgressCategory::Preparation,
            )),
            UploadEvent::Transferring {
                loaded,
                total,
                percent,
            } => Some(DisplayProgress::new(
                format!("Uploading: {}", format_transfer(*loaded, *total, *percent)),
                ProgressCategory::Transfer,
            )),
            UploadEvent::Completed { .. } | UploadEvent::Aborted { .. } | UploadEvent::Failed { .. } => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_is_inline() {
        let progress = UploadProgress::new(UploadEvent::Transferring {
            loaded: 524_288,
            total: 1_048_576,
            percent: 50,
        });

        let display = Option::<DisplayProgress>::from(&progress).expect("update should be displayed");
        assert_eq!(display.message, "Uploading: 50% (0.50 MB / 1.00 MB)");
        assert!(display.is_inline());
    }

    #[test]
    fn test_file_selected() {
        let progress = UploadProgress::new(UploadEvent::FileSelected {
            file_name: "a.zip".to_string(),
            size_bytes: 10_485_760,
            content_type: "application/zip".to_string(),
        });

        let display = Option::<DisplayProgress>::from(&progress).expect("update should be displayed");
        assert_eq!(display.message, "Selected: a.zip (10.00 MB)");
        assert_eq!(display.category, ProgressCategory::Selection);
        assert!(!display.is_inline());
    }

    #[test]
    fn test_terminal_events_are_suppressed() {
        let events = [
            UploadEvent::Completed {
                upload_id: "abc123".to_string(),
                share_url: "http://api/file/abc123".to_string(),
            },
            UploadEvent::Aborted {
                file_name: "a.zip".to_string(),
            },
            UploadEvent::Failed {
                file_name: "a.zip".to_string(),
                reason: "boom".to_string(),
            },
        ];

        for event in events {
            let display = Option::<DisplayProgress>::from(&UploadProgress::new(event));
            assert!(display.is_none());
        }
    }
}
