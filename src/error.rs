//! エラーハンドリングシステム
//!
//! エディタ全体で使用される統一されたエラー型とユーティリティを定義。
//! どのエラーもプロセスにとって致命的ではなく、対象ウィンドウは直前の状態のまま残る。

use std::time::{Duration, Instant};
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// ファイル操作エラー
    #[error("File operation failed: {0}")]
    File(#[from] FileError),

    /// 設定ファイルのエラー
    #[error("Preference error: {0}")]
    Preferences(#[from] PrefsError),

    /// 検索エラー
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),

    /// 入力処理エラー
    #[error("Input processing failed: {0}")]
    Input(#[from] InputError),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Encoding error: {message}")]
    Encoding { message: String },

    #[error("Unknown encoding: {name}")]
    UnknownEncoding { name: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl FileError {
    /// `std::io::Error` をパス情報付きで分類
    pub fn from_io(path: &std::path::Path, error: &std::io::Error) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            _ => FileError::Io {
                message: format!("{}: {}", path, error),
            },
        }
    }
}

/// 設定ファイル固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrefsError {
    #[error("Malformed preference record: {message}")]
    Malformed { message: String },

    #[error("Preference path must be absolute: {path}")]
    RelativePath { path: String },

    #[error("Preference path is empty")]
    EmptyPath,

    #[error("Preference storage failed: {message}")]
    Io { message: String },
}

/// 検索固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid pattern: {message}")]
    InvalidPattern { message: String },
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 入力処理固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Missing value for option: {option}")]
    MissingValue { option: String },

    #[error("Invalid argument: {arg}")]
    InvalidArgument { arg: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Warning,
    Error,
}

/// ステータス行に一時表示するエラー情報
#[derive(Debug, Clone)]
pub struct ErrorDisplay {
    /// エラーメッセージ
    pub message: String,
    /// エラーレベル
    pub level: ErrorLevel,
    /// 表示開始時刻
    pub start_time: Instant,
    /// 表示持続時間
    pub duration: Duration,
}

impl ErrorDisplay {
    pub fn new(error: &EditorError) -> Self {
        let (message, level) = Self::format_error(error);
        Self::with_message(message, level)
    }

    pub fn with_message(message: impl Into<String>, level: ErrorLevel) -> Self {
        Self {
            message: message.into(),
            level,
            start_time: Instant::now(),
            duration: Duration::from_secs(5),
        }
    }

    fn format_error(error: &EditorError) -> (String, ErrorLevel) {
        match error {
            EditorError::File(FileError::NotFound { path }) => {
                (format!("File not found: {}", path), ErrorLevel::Error)
            }
            EditorError::File(FileError::PermissionDenied { path }) => {
                (format!("Permission denied: {}", path), ErrorLevel::Error)
            }
            EditorError::File(FileError::Encoding { message }) => {
                (format!("Encoding error: {}", message), ErrorLevel::Error)
            }
            EditorError::Preferences(err) => (err.to_string(), ErrorLevel::Warning),
            EditorError::Search(err) => (err.to_string(), ErrorLevel::Warning),
            _ => (error.to_string(), ErrorLevel::Error),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.start_time.elapsed() >= self.duration
    }
}

/// パニックハンドラの設定
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        // raw モードのままだと端末が壊れるので戻しておく
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);

        log::error!("PANIC at {}: {}", location, message);
        eprintln!("PANIC at {}: {}", location, message);
        std::process::exit(1);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, EditorError>;

/// 各モジュール固有のResult型
pub mod file {
    pub type Result<T> = std::result::Result<T, super::FileError>;
}

pub mod prefs {
    pub type Result<T> = std::result::Result<T, super::PrefsError>;
}

pub mod search {
    pub type Result<T> = std::result::Result<T, super::SearchError>;
}

impl From<serde_json::Error> for PrefsError {
    fn from(error: serde_json::Error) -> Self {
        PrefsError::Malformed {
            message: error.to_string(),
        }
    }
}

impl From<regex::Error> for SearchError {
    fn from(error: regex::Error) -> Self {
        SearchError::InvalidPattern {
            message: error.to_string(),
        }
    }
}
