use crate::commands::Context;
use crate::commands::result::{CommandResult, ConfigResult};
use crate::config::{APP_CONFIG, UserConfig};
use anyhow::Result;

/// 有効な設定を表示するコマンドを実行する
///
/// ベースURLはどの設定源から解決されたかも返す。
pub fn execute(ctx: &Context) -> Result<CommandResult> {
    let config_path = UserConfig::config_path()
        .ok()
        .map(|path| path.display().to_string());

    Ok(CommandResult::Config(ConfigResult {
        api_base_url: ctx.base_url.value.clone(),
        api_base_url_source: ctx.base_url.source,
        config_path,
        copy_link: ctx.user_config.copy_link,
        max_file_size: APP_CONFIG.upload.max_file_size,
        supported_formats: APP_CONFIG
            .upload
            .supported_formats
            .iter()
            .map(|format| format.to_string())
            .collect(),
        api_timeout_seconds: APP_CONFIG.api.timeout_seconds,
        transfer_timeout_seconds: APP_CONFIG.upload.transfer_timeout_seconds,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiBaseUrl, BaseUrlSource};

    #[test]
    fn test_reports_resolved_base_url() {
        let ctx = Context {
            base_url: ApiBaseUrl {
                value: "https://share.example.com".to_string(),
                source: BaseUrlSource::Environment,
            },
            user_config: UserConfig {
                api_base_url: None,
                copy_link: true,
            },
            machine_output: false,
        };

        let CommandResult::Config(result) = execute(&ctx).unwrap() else {
            panic!("expected config result");
        };
        assert_eq!(result.api_base_url, "https://share.example.com");
        assert_eq!(result.api_base_url_source, BaseUrlSource::Environment);
        assert!(result.copy_link);
        assert_eq!(result.supported_formats, vec!["zip".to_string()]);
    }
}
