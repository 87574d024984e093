/// ドメインサービス: ファイルバリデーション
///
/// アップロード対象のファイルを検証し、セッションに選択できる
/// `SelectedFile` を組み立てる。
///
/// 設定値（最大ファイルサイズ、サポート形式）はAPP_CONFIGから取得します。
use crate::config::APP_CONFIG;
use crate::domain::error::DomainError;
use crate::domain::session::SelectedFile;
use std::path::Path;

/// アップロード対象のファイルをバリデーションする
///
/// # エラー
/// - ファイルが存在しない
/// - ディレクトリが指定された
/// - ファイルが空
/// - サポートされていない形式
/// - ファイルサイズが制限を超過
pub fn validate_upload_file(file_path: &str) -> Result<SelectedFile, DomainError> {
    validate_with_limits(
        file_path,
        APP_CONFIG.upload.max_file_size,
        APP_CONFIG.upload.supported_formats,
    )
}

fn validate_with_limits(
    file_path: &str,
    max_file_size: u64,
    supported_formats: &[&str],
) -> Result<SelectedFile, DomainError> {
    let path = Path::new(file_path);

    let metadata = std::fs::metadata(path).map_err(|_| DomainError::FileNotFound {
        path: file_path.to_string(),
    })?;

    if metadata.is_dir() {
        return Err(DomainError::NotAFile {
            path: file_path.to_string(),
        });
    }

    let size = metadata.len();
    if size == 0 {
        return Err(DomainError::EmptyFile {
            path: file_path.to_string(),
        });
    }

    if size > max_file_size {
        return Err(DomainError::FileTooLarge {
            size,
            max: max_file_size,
        });
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .ok_or_else(|| DomainError::invalid_format(file_path, supported_formats, "no extension"))?;

    if !supported_formats.contains(&extension.as_str()) {
        return Err(DomainError::invalid_format(
            file_path,
            supported_formats,
            extension,
        ));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string());

    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(SelectedFile {
        path: path.to_path_buf(),
        name,
        content_type,
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, len: usize) -> String {
        let path = dir.path().join(name);
        fs::write(&path, vec![0u8; len]).expect("Failed to write test file");
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_valid_zip() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.zip", 2048);

        let file = validate_upload_file(&path).expect("zip should be accepted");
        assert_eq!(file.name, "a.zip");
        assert_eq!(file.content_type, "application/zip");
        assert_eq!(file.size, 2048);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "BACKUP.ZIP", 10);
        assert!(validate_upload_file(&path).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let result = validate_upload_file("/nonexistent/path/a.zip");
        assert!(matches!(result, Err(DomainError::FileNotFound { .. })));
    }

    #[test]
    fn test_directory_rejected() {
        let dir = TempDir::new().unwrap();
        let result = validate_upload_file(&dir.path().to_string_lossy());
        assert!(matches!(result, Err(DomainError::NotAFile { .. })));
    }

    #[test]
    fn test_empty_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.zip", 0);
        assert!(matches!(
            validate_upload_file(&path),
            Err(DomainError::EmptyFile { .. })
        ));
    }

    #[test]
    fn test_unsupported_format() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "photo.png", 10);
        match validate_upload_file(&path) {
            Err(DomainError::InvalidFormat { found, .. }) => assert_eq!(found, "png"),
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }

        let path = write_file(&dir, "no_extension", 10);
        match validate_upload_file(&path) {
            Err(DomainError::InvalidFormat { found, .. }) => assert_eq!(found, "no extension"),
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_size_limit() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "big.zip", 1025);

        let result = validate_with_limits(&path, 1024, &["zip"]);
        assert_eq!(
            result.unwrap_err(),
            DomainError::FileTooLarge {
                size: 1025,
                max: 1024
            }
        );
        assert!(validate_with_limits(&path, 1025, &["zip"]).is_ok());
    }
}
