mod api;
mod cli;
mod commands;
mod config;
mod domain;
mod error_severity;
mod flow;
mod logging;
mod presentation;

use api::error::InfraError;
use clap::Parser;
use config::error::ConfigError;
use domain::error::DomainError;
use error_severity::ErrorSeverity;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);

    let machine_output = cli.machine;
    let result = cli::run(&cli).await.and_then(|result| {
        presentation::output::output_result(&result, machine_output)
    });

    if let Err(e) = result {
        handle_error(e, machine_output);
    }
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とメッセージを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) {
    let exit_code = determine_exit_code(&error);
    let hint = get_error_hint(&error);

    if machine_output {
        let json = serde_json::json!({
            "success": false,
            "error": format!("{:#}", error),
            "exit_code": exit_code,
            "hint": hint,
        });
        println!("{}", json);
        std::process::exit(exit_code);
    }

    // エラーメッセージのヘッダー
    eprintln!("Error: {}", error);

    // エラーチェーンを辿って詳細を表示
    let chain: Vec<_> = error.chain().skip(1).collect();
    if !chain.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }

    // ユーザー向けのヒントを表示
    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }

    // 適切な終了コードで終了
    std::process::exit(exit_code);
}

/// エラーチェーンから適切な終了コードを決定
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    // エラーチェーン全体を探索
    for cause in error.chain() {
        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            return domain_err.severity().exit_code();
        }

        if let Some(infra_err) = cause.downcast_ref::<InfraError>() {
            return infra_err.severity().exit_code();
        }

        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.severity().exit_code();
        }
    }

    // 不明なエラーの場合はデフォルトの終了コード
    ErrorSeverity::UserError.exit_code()
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    for cause in error.chain() {
        if let Some(hint) = cause
            .downcast_ref::<DomainError>()
            .and_then(DomainError::hint)
        {
            return Some(hint.to_string());
        }

        if let Some(hint) = cause
            .downcast_ref::<InfraError>()
            .and_then(InfraError::hint)
        {
            return Some(hint.to_string());
        }

        if let Some(hint) = cause
            .downcast_ref::<ConfigError>()
            .and_then(ConfigError::hint)
        {
            return Some(hint.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_from_wrapped_errors() {
        let error = anyhow::Error::new(DomainError::UploadAborted).context("Upload command failed");
        assert_eq!(determine_exit_code(&error), 130);

        let error: anyhow::Result<()> = Err(InfraError::network("refused")).context("Upload failed");
        assert_eq!(determine_exit_code(&error.unwrap_err()), 3);

        let error = anyhow::anyhow!("something else");
        assert_eq!(determine_exit_code(&error), 1);
    }

    #[test]
    fn test_hint_from_wrapped_errors() {
        let error: anyhow::Result<()> =
            Err(InfraError::network("refused")).context("Upload command failed");
        let hint = get_error_hint(&error.unwrap_err()).unwrap();
        assert!(hint.contains("network connection"));
    }
}
