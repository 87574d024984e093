/// ドメイン層
///
/// 外部システムに依存しないアップロードのビジネスルールを置く。
pub mod error;
pub mod formatter;
pub mod notification;
pub mod progress;
pub mod session;
pub mod share_link;
pub mod validator;
