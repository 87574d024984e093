/// API通信用の型定義
///
/// アップロード先の払い出しAPI（`POST /file/upload`）の
/// リクエスト・レスポンスを表す構造体を定義します。
use serde::{Deserialize, Serialize};

/// アップロード先の払い出しリクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDestinationRequest {
    /// ファイル名
    pub name: String,

    /// MIMEタイプ
    pub content_type: String,

    /// バイト数
    pub content_length: u64,
}

/// アップロード先の払い出しレスポンス
///
/// 未知のフィールドは無視する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadDestination {
    /// ファイル本体をPUTする先のURL（署名付きURL）
    pub url: String,

    /// 共有リンクに使う識別子
    pub id: String,
}

impl UploadDestination {
    /// レスポンスが有効かチェック
    pub fn is_valid(&self) -> bool {
        !self.url.trim().is_empty() && !self.id.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let request = UploadDestinationRequest {
            name: "a.zip".to_string(),
            content_type: "application/zip".to_string(),
            content_length: 1_048_576,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "a.zip",
                "contentType": "application/zip",
                "contentLength": 1048576
            })
        );
    }

    #[test]
    fn test_destination_ignores_extra_fields() {
        let json = r#"{
            "url": "https://s3/x",
            "id": "abc123",
            "expiresIn": 600
        }"#;

        let destination: UploadDestination = serde_json::from_str(json).expect("Failed to parse");
        assert_eq!(destination.url, "https://s3/x");
        assert_eq!(destination.id, "abc123");
        assert!(destination.is_valid());
    }

    #[test]
    fn test_destination_invalid() {
        let destination = UploadDestination {
            url: "https://s3/x".to_string(),
            id: " ".to_string(),
        };
        assert!(!destination.is_valid());
    }
}
