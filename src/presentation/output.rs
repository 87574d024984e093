/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読）または
/// 機械向け（JSON）形式で出力する責務を担います。
use crate::commands::result::{CommandResult, UploadResult};
use crate::config::BYTES_PER_MB;
use crate::domain::formatter::format_megabytes;
use anyhow::Result;

/// コマンド結果を適切な形式で出力する
///
/// # Arguments
/// * `result` - コマンド実行結果
/// * `machine_output` - 機械可読出力フラグ
///
/// # Output
/// * `machine_output = false`: 人間向けの詳細メッセージ（stderr）
/// * `machine_output = true`: 機械可読JSON（stdout）
pub fn output_result(result: &CommandResult, machine_output: bool) -> Result<()> {
    if machine_output {
        println!("{}", machine_readable(result));
    } else {
        output_human_readable(result);
    }

    Ok(())
}

/// 人間向けの詳細メッセージを出力（stderr）
///
/// 共有リンクだけは stdout にも出力し、`$(shareup upload a.zip)` で取得できるようにする。
fn output_human_readable(result: &CommandResult) {
    match result {
        CommandResult::Upload(r) => {
            eprintln!();
            print_upload(r);
            println!("{}", r.share_url);
        }
        CommandResult::Session(r) => {
            eprintln!();
            if r.uploads.is_empty() {
                eprintln!("No files were uploaded in this session.");
                return;
            }
            eprintln!("Uploaded {} file(s) in this session:", r.uploads.len());
            for (idx, upload) in r.uploads.iter().enumerate() {
                eprintln!();
                eprintln!("File #{}", idx + 1);
                print_upload(upload);
            }
        }
        CommandResult::Config(r) => {
            eprintln!("API Base URL:      {} (from {})", r.api_base_url, r.api_base_url_source);
            match &r.config_path {
                Some(path) => eprintln!("Config File:       {}", path),
                None => eprintln!("Config File:       (not available)"),
            }
            eprintln!("Auto Copy Link:    {}", if r.copy_link { "yes" } else { "no" });
            eprintln!(
                "Max File Size:     {} MB",
                r.max_file_size / BYTES_PER_MB
            );
            eprintln!("Supported Formats: {}", r.supported_formats.join(", "));
            eprintln!("API Timeout:       {}s", r.api_timeout_seconds);
            if r.transfer_timeout_seconds == 0 {
                eprintln!("Transfer Timeout:  none");
            } else {
                eprintln!("Transfer Timeout:  {}s", r.transfer_timeout_seconds);
            }
        }
    }
}

fn print_upload(r: &UploadResult) {
    eprintln!("---");
    eprintln!("File:       {} ({})", r.file_name, format_megabytes(r.file_size));
    eprintln!("Upload ID:  {}", r.upload_id);
    eprintln!("Share Link: {}", r.share_url);
    if r.copied {
        eprintln!("            (copied to clipboard)");
    }
    eprintln!("Uploaded:   {}", r.uploaded_at.format("%Y-%m-%d %H:%M:%S UTC"));
    eprintln!("---");
}

/// 機械可読JSONを組み立てる
///
/// スクリプトやパイプライン処理のために、
/// コマンド結果を構造化されたJSON形式で出力します。
fn machine_readable(result: &CommandResult) -> serde_json::Value {
    match result {
        CommandResult::Upload(r) => {
            serde_json::json!({
                "success": true,
                "command": "upload",
                "file_name": r.file_name,
                "file_path": r.file_path,
                "file_size": r.file_size,
                "content_type": r.content_type,
                "upload_id": r.upload_id,
                "share_url": r.share_url,
                "copied": r.copied,
                "uploaded_at": r.uploaded_at.to_rfc3339()
            })
        }
        CommandResult::Session(r) => {
            serde_json::json!({
                "success": true,
                "command": "session",
                "uploads": r.uploads,
                "total_count": r.uploads.len()
            })
        }
        CommandResult::Config(r) => {
            serde_json::json!({
                "success": true,
                "command": "config",
                "api_base_url": r.api_base_url,
                "api_base_url_source": r.api_base_url_source,
                "config_path": r.config_path,
                "copy_link": r.copy_link,
                "max_file_size": r.max_file_size,
                "supported_formats": r.supported_formats,
                "api_timeout_seconds": r.api_timeout_seconds,
                "transfer_timeout_seconds": r.transfer_timeout_seconds
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::result::SessionResult;
    use chrono::Utc;

    fn upload() -> UploadResult {
        UploadResult {
            file_name: "a.zip".to_string(),
            file_path: "/tmp/a.zip".to_string(),
            file_size: 1_048_576,
            content_type: "application/zip".to_string(),
            upload_id: "abc123".to_string(),
            share_url: "http://localhost:3333/file/abc123".to_string(),
            copied: true,
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_upload_machine_output() {
        let json = machine_readable(&CommandResult::Upload(upload()));
        assert_eq!(json["success"], true);
        assert_eq!(json["command"], "upload");
        assert_eq!(json["upload_id"], "abc123");
        assert_eq!(json["share_url"], "http://localhost:3333/file/abc123");
        assert_eq!(json["copied"], true);
    }

    #[test]
    fn test_session_machine_output() {
        let result = CommandResult::Session(SessionResult {
            uploads: vec![upload(), upload()],
        });
        let json = machine_readable(&result);
        assert_eq!(json["command"], "session");
        assert_eq!(json["total_count"], 2);
        assert_eq!(json["uploads"][0]["file_name"], "a.zip");
    }
}
