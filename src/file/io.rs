//! ファイルI/O操作
//!
//! ファイル全体の読み込みと上書き保存。一時ファイル経由のリネームやバックアップは行わない。

use super::encoding::TextEncoding;
use crate::error::{file::Result, FileError};
use std::fs;
use std::path::Path;

/// ファイル全体を読み込んでデコード
pub fn read_text(path: &Path, encoding: TextEncoding) -> Result<String> {
    if path.is_dir() {
        return Err(FileError::InvalidPath {
            path: path.display().to_string(),
        });
    }

    let bytes = fs::read(path).map_err(|err| FileError::from_io(path, &err))?;
    let text = encoding.decode(&bytes)?;
    log::debug!(
        "read {} bytes from {} as {}",
        bytes.len(),
        path.display(),
        encoding
    );
    Ok(text)
}

/// テキストをエンコードしてファイル全体を上書き
pub fn write_text(path: &Path, text: &str, encoding: TextEncoding) -> Result<()> {
    if path.is_dir() {
        return Err(FileError::InvalidPath {
            path: path.display().to_string(),
        });
    }

    let bytes = encoding.encode(text)?;
    fs::write(path, &bytes).map_err(|err| FileError::from_io(path, &err))?;
    log::debug!(
        "wrote {} bytes to {} as {}",
        bytes.len(),
        path.display(),
        encoding
    );
    Ok(())
}

/// ディレクトリが存在しなければ作成
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|err| FileError::from_io(path, &err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        let content = "Hello, World!\r\nこんにちは！\n";

        write_text(&file_path, content, TextEncoding::Utf8).unwrap();
        let read_content = read_text(&file_path, TextEncoding::Utf8).unwrap();
        assert_eq!(read_content, content);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let err = read_text(&temp_dir.path().join("nope.txt"), TextEncoding::Utf8).unwrap_err();
        assert!(matches!(err, FileError::NotFound { .. }));
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let temp_dir = tempdir().unwrap();
        let err = read_text(temp_dir.path(), TextEncoding::Utf8).unwrap_err();
        assert!(matches!(err, FileError::InvalidPath { .. }));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("missing").join("file.txt");
        assert!(write_text(&path, "x", TextEncoding::Utf8).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("file.txt");
        std::fs::write(&path, "a much longer original body").unwrap();
        write_text(&path, "short", TextEncoding::Utf8).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }
}
