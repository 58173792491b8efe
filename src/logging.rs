//! ロギングシステム
//!
//! `log` ファサードのバックエンド。stderr とファイル追記の両方に対応する。
//! TUI 実行中は画面を壊さないよう stderr 出力を止めてファイルのみに書く。

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// ロガー
#[derive(Debug)]
pub struct Logger {
    level: LevelFilter,
    output_stderr: bool,
    output_file: Option<PathBuf>,
    // 複数行が交互に混ざらないよう書き込みを直列化する
    write_lock: Mutex<()>,
}

impl Logger {
    /// デフォルト構築
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            output_stderr: true,
            output_file: None,
            write_lock: Mutex::new(()),
        }
    }

    /// 開発者向けロガー
    #[cfg(test)]
    pub fn for_development() -> Self {
        Self::new(LevelFilter::Debug)
    }

    /// ログレベルを取得
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// ログレベルを変更
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// 標準エラー出力を無効化
    pub fn without_stderr(mut self) -> Self {
        self.output_stderr = false;
        self
    }

    /// ファイル出力先
    pub fn file_output(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    fn should_log(&self, level: Level) -> bool {
        level <= self.level
    }

    fn write_line(&self, message: &str) {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if self.output_stderr {
            eprintln!("{}", message);
        }

        if let Some(path) = &self.output_file {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{}", message);
            }
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.should_log(metadata.level())
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "{} [{}] {}",
            format_level(record.level()),
            record.target(),
            record.args()
        );
        self.write_line(&line);
    }

    fn flush(&self) {}
}

fn format_level(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// グローバルロガーを登録
///
/// 二回目以降の呼び出しは無視する（テストから複数回呼ばれるため）。
pub fn init(logger: Logger) {
    if let Some(path) = logger.file_output() {
        if let Some(parent) = path.parent() {
            // ロガー登録前なので stderr に出すしかない
            if let Err(err) = std::fs::create_dir_all(parent) {
                eprintln!("cannot create log directory {}: {}", parent.display(), err);
            }
        }
    }
    let level = logger.level();
    let logger: &'static Logger = Box::leak(Box::new(logger));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

/// 既定のログファイル（`~/.charge-edit/debug.log`）
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".charge-edit").join("debug.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn logger_respects_log_level() {
        let logger = Logger::for_development().without_stderr();
        assert!(logger.should_log(Level::Debug));
        assert!(logger.should_log(Level::Error));

        let info_logger = Logger::for_development()
            .with_level(LevelFilter::Info)
            .without_stderr();
        assert!(!info_logger.should_log(Level::Debug));
        assert!(info_logger.should_log(Level::Warn));
    }

    #[test]
    fn init_creates_log_directory_and_installs_logger() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("debug.log");
        init(
            Logger::for_development()
                .without_stderr()
                .with_file_output(&path),
        );

        log::warn!(target: "charge_edit::init", "installed");
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("WARNING [charge_edit::init] installed"));
    }

    #[test]
    fn logger_appends_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug.log");
        let logger = Logger::for_development()
            .without_stderr()
            .with_file_output(&path);

        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .target("charge_edit::test")
                .args(format_args!("first"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("charge_edit::test")
                .args(format_args!("second"))
                .build(),
        );

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("WARNING [charge_edit::test] first"));
        assert!(written.lines().count() == 2);
    }
}
