/// ドメイン層のエラー定義
///
/// ビジネスロジックに関連するエラーを構造化して定義。
/// 外部クレートのエラーは含まず、純粋にドメインの制約違反を表現する。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    /// ファイルが見つからない
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// ファイル形式が無効
    #[error("invalid file format: {path} (expected: {expected}, found: {found})")]
    InvalidFormat {
        path: String,
        expected: String,
        found: String,
    },

    /// ファイルサイズが制限を超過
    #[error("file too large: {size} bytes (maximum allowed: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    /// ファイルが空
    #[error("file is empty: {path}")]
    EmptyFile { path: String },

    /// ディレクトリが指定された（ファイルが期待される場所）
    #[error("'{path}' is a directory, not a file")]
    NotAFile { path: String },

    /// 共有リンクがまだ無い
    #[error("no share link available yet")]
    ShareLinkUnavailable,

    /// アップロード完了前のリセット
    #[error("the current upload has not completed")]
    UploadNotCompleted,

    /// ユーザーがアップロードを中断した
    #[error("upload aborted by user")]
    UploadAborted,
}

impl DomainError {
    /// 無効なファイル形式エラーを生成
    pub fn invalid_format(
        path: impl Into<String>,
        supported_formats: &[&str],
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            expected: format!("one of: {}", supported_formats.join(", ")),
            found: found.into(),
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UploadAborted => ErrorSeverity::Interrupted,
            _ => ErrorSeverity::UserError,
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::FileNotFound { .. } => {
                Some("Please check the file path and ensure the file exists.")
            }
            Self::InvalidFormat { .. } => Some("Only .zip archives can be uploaded."),
            Self::FileTooLarge { .. } => Some("The maximum upload size is 1GB."),
            Self::EmptyFile { .. } => Some("The file appears to be empty or corrupted."),
            Self::NotAFile { .. } => Some("Please specify a file, not a directory."),
            Self::ShareLinkUnavailable => Some("Upload a file first, then copy its link."),
            Self::UploadNotCompleted => None,
            Self::UploadAborted => Some("Run the upload again to retry."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_lists_supported() {
        let err = DomainError::invalid_format("a.rar", &["zip"], "rar");
        assert_eq!(
            err.to_string(),
            "invalid file format: a.rar (expected: one of: zip, found: rar)"
        );
    }

    #[test]
    fn test_aborted_is_interrupted() {
        assert_eq!(
            DomainError::UploadAborted.severity(),
            ErrorSeverity::Interrupted
        );
        assert_eq!(
            DomainError::EmptyFile { path: "x".into() }.severity(),
            ErrorSeverity::UserError
        );
    }
}
