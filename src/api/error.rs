use std::io;
/// インフラ層のエラー定義
///
/// 外部システム（ファイルシステム、バックエンドAPI、ストレージ、クリップボード）との
/// やり取りで発生するエラーを構造化して定義。
/// 失敗した段階（アップロード先の要求か転送か）を区別できるようにする。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    /// ネットワークエラー
    #[error("network error: {message}")]
    Network { message: String },

    /// バックエンドAPIのエラーレスポンス
    #[error("API error: {endpoint} - {message}")]
    Api {
        endpoint: String,
        message: String,
        status_code: Option<u16>,
    },

    /// バックエンドAPIのレスポンスが想定外の形式
    #[error("invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    /// ストレージへの転送がエラーステータスで終わった
    #[error("transfer rejected with status {status_code}: {message}")]
    Transfer { status_code: u16, message: String },

    /// タイムアウトエラー
    #[error("operation timed out: {operation}")]
    Timeout { operation: String },

    /// クリップボードへの書き込み失敗
    #[error("clipboard error: {message}")]
    Clipboard { message: String },

    /// その他のI/Oエラー
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl InfraError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn api(endpoint: impl Into<String>, message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            message: message.into(),
            status_code,
        }
    }

    pub fn invalid_response(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard {
            message: message.into(),
        }
    }

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::SystemError
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => {
                Some("Check your network connection and the API base URL (see 'shareup config').")
            }
            Self::Api { status_code: Some(code), .. } if *code >= 500 => {
                Some("The upload service is having problems. Try again later.")
            }
            Self::Transfer { .. } => {
                Some("The storage endpoint rejected the file. The upload link may have expired; try again.")
            }
            Self::Clipboard { .. } => Some("Copy the link shown above manually."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_infra_errors_are_system_errors() {
        let errors = [
            InfraError::network("down"),
            InfraError::api("/file/upload", "boom", Some(500)),
            InfraError::timeout("POST /file/upload"),
            InfraError::Transfer {
                status_code: 403,
                message: "expired".into(),
            },
        ];
        for err in errors {
            assert_eq!(err.severity(), ErrorSeverity::SystemError);
        }
    }

    #[test]
    fn test_server_error_hint() {
        let err = InfraError::api("/file/upload", "boom", Some(503));
        assert!(err.hint().unwrap().contains("Try again later"));

        let err = InfraError::api("/file/upload", "bad request", Some(400));
        assert!(err.hint().is_none());
    }
}
