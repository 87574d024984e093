/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\shareup\config.toml
/// macOS:   /Users/<User>/Library/Application Support/shareup/config.toml
/// Linux:   /home/<user>/.config/shareup/config.toml
///
/// 初回起動時にデフォルト値から自動的にconfig.tomlを作成します。
use crate::config::endpoint;
use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// ユーザー設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    /// バックエンドAPIのベースURL（未設定ならビルド時のデフォルト）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,

    /// アップロード完了後に共有リンクを自動でクリップボードへコピーするか
    #[serde(default)]
    pub copy_link: bool,
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("shareup").join("config.toml"))
    }

    /// ユーザー設定を読み込む
    ///
    /// 設定ファイルが存在しない場合は、デフォルトテンプレートから自動的に作成します。
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスからユーザー設定を読み込む
    ///
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        Ok(config)
    }

    /// デフォルト設定ファイルを作成
    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        fs::write(config_path, Self::default_toml_content()).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to create default config file: {}", config_path.display()),
                e,
            )
        })?;

        Ok(())
    }

    /// デフォルトTOML設定を生成
    fn default_toml_content() -> String {
        r#"# shareup - User Configuration

# Base URL of the upload API. Share links are built as <api_base_url>/file/<id>.
# Can also be set with the SHAREUP_API_URL environment variable or --api-url.
# api_base_url = "https://api.example.com"

# Copy the share link to the clipboard after every successful upload
copy_link = false
"#
        .to_string()
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - api_base_url: 設定されている場合は http/https の絶対URLであること
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base_url) = &self.api_base_url {
            endpoint::normalize_base_url(base_url, "config.toml")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let path = UserConfig::config_path().expect("Failed to get config path");
        assert!(path.to_string_lossy().contains("shareup"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_load_creates_default_if_not_exists() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = UserConfig::load_from(&config_path).expect("Default config should load");

        assert!(config_path.exists(), "Config file should be created");
        assert_eq!(config, UserConfig::default());

        let content = fs::read_to_string(&config_path).expect("Failed to read config");
        assert!(content.contains("SHAREUP_API_URL"));
        assert!(content.contains("copy_link"));
    }

    #[test]
    fn test_load_reads_user_values() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "api_base_url = \"https://api.example.com\"\ncopy_link = true\n",
        )
        .unwrap();

        let loaded = UserConfig::load_from(&config_path).expect("Failed to load config");
        assert_eq!(
            loaded,
            UserConfig {
                api_base_url: Some("https://api.example.com".to_string()),
                copy_link: true,
            }
        );
    }

    #[test]
    fn test_load_rejects_invalid_base_url() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "api_base_url = \"not a url\"\n").unwrap();

        let result = UserConfig::load_from(&config_path);
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "copy_link = \"maybe\n").unwrap();

        let result = UserConfig::load_from(&config_path);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_serialization_skips_unset_base_url() {
        let serialized = toml::to_string_pretty(&UserConfig::default()).unwrap();
        assert!(!serialized.contains("api_base_url"));
        assert!(serialized.contains("copy_link"));
    }
}
