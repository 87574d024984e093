/// ドメイン層: ユーザー通知
///
/// アップロードフローがユーザーに知らせる成功・失敗のメッセージ。
/// 表示方法（stderr の一行、JSON）はプレゼンテーション層が決める。
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Notification {
    Success(String),
    Failure(String),
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failure(message) => message,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

pub const UPLOAD_SUCCEEDED: &str = "File uploaded successfully";
pub const UPLOAD_ABORTED: &str = "File upload aborted";
pub const LINK_COPIED: &str = "Link copied to clipboard";
