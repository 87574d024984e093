use crate::commands::{self, CommandResult, Context as CommandContext};
use crate::config::UserConfig;
use crate::config::endpoint::{base_url_from_env, resolve_base_url};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

/// shareup - Upload a .zip archive and get a shareable link
#[derive(Parser, Debug)]
#[command(name = "shareup")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Machine-Readable Output:
  --machine upload <file>            - JSON result on stdout
  --machine upload <file> --progress - JSON Lines progress and notifications, then the result

Error Output:
  Normal mode:   Human-readable error messages to stderr
  --machine:     JSON error object with exit_code and hint fields

Environment:
  SHAREUP_API_URL   Backend API base URL (overridden by --api-url)
  RUST_LOG          Log filter (overrides -v)")]
pub struct Cli {
    /// Output machine-readable JSON to stdout (for scripting)
    #[arg(long, global = true)]
    pub machine: bool,

    /// Backend API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a .zip archive and print its share link
    Upload {
        /// Path to the archive
        file: String,

        /// Show upload progress
        #[arg(long)]
        progress: bool,

        /// Copy the share link to the clipboard when done
        #[arg(long)]
        copy: bool,
    },
    /// Interactive session: select, upload, copy, repeat
    Session {
        /// Hide upload progress
        #[arg(long)]
        no_progress: bool,
    },
    /// Show the effective configuration
    Config,
}

/// 解析済みのCLI引数を適切なコマンドにディスパッチする
pub async fn run(cli: &Cli) -> Result<CommandResult> {
    // ユーザー設定を読み込み（自動検証される）
    let user_config = UserConfig::load()
        .context("Failed to load user configuration. Please check your config.toml file.")?;
    let base_url = resolve_base_url(cli.api_url.as_deref(), base_url_from_env(), &user_config)
        .context("Failed to resolve the API base URL")?;

    let ctx = CommandContext {
        base_url,
        user_config,
        machine_output: cli.machine,
    };

    match &cli.command {
        Command::Upload {
            file,
            progress,
            copy,
        } => commands::upload::execute(&ctx, file, *progress, *copy)
            .await
            .context("Upload command failed"),
        Command::Session { no_progress } => commands::session::execute(&ctx, !no_progress)
            .await
            .context("Session command failed"),
        Command::Config => commands::config::execute(&ctx).context("Config command failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_upload_with_global_flags() {
        let cli = Cli::try_parse_from([
            "shareup",
            "upload",
            "a.zip",
            "--progress",
            "--machine",
            "-vv",
            "--api-url",
            "https://share.example.com",
        ])
        .unwrap();

        assert!(cli.machine);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.api_url.as_deref(), Some("https://share.example.com"));
        match cli.command {
            Command::Upload {
                file,
                progress,
                copy,
            } => {
                assert_eq!(file, "a.zip");
                assert!(progress);
                assert!(!copy);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_upload_requires_file() {
        assert!(Cli::try_parse_from(["shareup", "upload"]).is_err());
    }
}
