/// APIベースURLの解決
///
/// 優先順位: `--api-url` > `SHAREUP_API_URL` > config.toml > ビルド時のデフォルト
use crate::config::app::{API_URL_ENV, APP_CONFIG};
use crate::config::error::ConfigError;
use crate::config::user::UserConfig;
use serde::Serialize;
use std::fmt;
use url::Url;

/// ベースURLの取得元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseUrlSource {
    Flag,
    Environment,
    UserConfig,
    Default,
}

impl fmt::Display for BaseUrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "--api-url"),
            Self::Environment => write!(f, "{}", API_URL_ENV),
            Self::UserConfig => write!(f, "config.toml"),
            Self::Default => write!(f, "built-in default"),
        }
    }
}

/// 解決済みのベースURL（末尾の `/` は除去済み）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiBaseUrl {
    pub value: String,
    pub source: BaseUrlSource,
}

/// ベースURLを検証し、末尾の `/` を除いた形に正規化する
///
/// # Arguments
/// * `value` - 検証するURL
/// * `origin` - エラーメッセージ用の取得元
pub fn normalize_base_url(value: &str, origin: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    let parsed = Url::parse(trimmed)
        .map_err(|e| ConfigError::invalid_base_url(value, origin, e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::invalid_base_url(
            value,
            origin,
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::invalid_base_url(value, origin, "missing host"));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// 各設定源からベースURLを解決する
///
/// 空文字列の設定値は未設定として扱います。
pub fn resolve_base_url(
    flag: Option<&str>,
    env: Option<String>,
    user_config: &UserConfig,
) -> Result<ApiBaseUrl, ConfigError> {
    let candidates = [
        (flag.map(str::to_string), BaseUrlSource::Flag),
        (env, BaseUrlSource::Environment),
        (user_config.api_base_url.clone(), BaseUrlSource::UserConfig),
    ];

    for (value, source) in candidates {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            let normalized = normalize_base_url(&value, &source.to_string())?;
            return Ok(ApiBaseUrl {
                value: normalized,
                source,
            });
        }
    }

    Ok(ApiBaseUrl {
        value: APP_CONFIG.api.base_url.to_string(),
        source: BaseUrlSource::Default,
    })
}

/// 環境変数からベースURLを読み取る
pub fn base_url_from_env() -> Option<String> {
    std::env::var(API_URL_ENV).ok()
}
