/// Config層のエラー定義
///
/// 設定ファイルの読み込み、作成、パース、検証に関するエラーを構造化して定義。
/// 外部エラー(std::io::Error, toml::de::Error等)の発信元を #[source] で保持する。
use crate::error_severity::ErrorSeverity;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// 設定ディレクトリの取得失敗
    #[error("failed to get config directory: {message}")]
    DirectoryNotFound { message: String },

    /// ファイルシステムエラー
    #[error("file system error: {context}")]
    FileSystem {
        context: String,
        #[source]
        source: io::Error,
    },

    /// 設定ファイルのパースエラー
    #[error("failed to parse config file: {context}")]
    ParseError {
        context: String,
        #[source]
        source: toml::de::Error,
    },

    /// APIのベースURLが不正
    #[error("invalid API base URL '{value}' (from {origin}): {reason}")]
    InvalidBaseUrl {
        value: String,
        origin: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn directory_not_found(message: impl Into<String>) -> Self {
        Self::DirectoryNotFound {
            message: message.into(),
        }
    }

    pub fn file_system(context: impl Into<String>, source: io::Error) -> Self {
        Self::FileSystem {
            context: context.into(),
            source,
        }
    }

    pub fn parse_error(context: impl Into<String>, source: toml::de::Error) -> Self {
        Self::ParseError {
            context: context.into(),
            source,
        }
    }

    pub fn invalid_base_url(
        value: impl Into<String>,
        origin: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidBaseUrl {
            value: value.into(),
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::FileSystem { .. } => ErrorSeverity::SystemError,
            Self::DirectoryNotFound { .. }
            | Self::ParseError { .. }
            | Self::InvalidBaseUrl { .. } => ErrorSeverity::ConfigError,
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::DirectoryNotFound { .. } => {
                Some("Unable to locate the configuration directory. Check your system environment.")
            }
            Self::FileSystem { .. } => {
                Some("Check file permissions and ensure the config directory is writable.")
            }
            Self::ParseError { .. } => {
                Some("The config file may be corrupted. Try deleting it to regenerate defaults.")
            }
            Self::InvalidBaseUrl { .. } => Some(
                "The API base URL must be an absolute http:// or https:// URL, e.g. https://api.example.com",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        let err = ConfigError::invalid_base_url("ftp://x", "--api-url", "unsupported scheme");
        assert_eq!(err.severity(), ErrorSeverity::ConfigError);

        let err = ConfigError::file_system(
            "read",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.severity(), ErrorSeverity::SystemError);
    }

    #[test]
    fn test_invalid_base_url_message() {
        let err = ConfigError::invalid_base_url("nope", "SHAREUP_API_URL", "relative URL without a base");
        let message = err.to_string();
        assert!(message.contains("nope"));
        assert!(message.contains("SHAREUP_API_URL"));
        assert!(err.hint().is_some());
    }
}
