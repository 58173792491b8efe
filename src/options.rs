//! 起動オプションとエディタ設定

use crate::error::{InputError, Result};
use crate::file::TextEncoding;
use std::path::PathBuf;

/// 1ウィンドウ分の編集設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    /// タブ1段の空白数（1〜`MAX_TAB_WIDTH`）
    pub tab_width: usize,
    /// 改行時に現在行のインデントを引き継ぐ
    pub auto_indent: bool,
    /// 直前の空白1段をバックスペース1回で消す
    pub tab_backspace: bool,
    /// 読み書きに使うエンコーディング
    pub encoding: TextEncoding,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            tab_width: 4,
            auto_indent: true,
            tab_backspace: true,
            encoding: TextEncoding::Utf8,
        }
    }
}

/// コマンドライン引数から得た起動オプション
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// エディタ設定
    pub editor: EditorOptions,
    /// 設定ファイルの場所（未指定時は設定ディレクトリ配下）
    pub prefs_path: Option<PathBuf>,
    /// デバッグログ出力先（未指定時は `~/.charge-edit/debug.log`）
    pub debug_log_path: Option<PathBuf>,
    /// 起動時に開くファイル（1ファイルにつき1ウィンドウ）
    pub files: Vec<PathBuf>,
    pub show_help: bool,
    pub show_version: bool,
}

/// `--tab-width` の上限
pub const MAX_TAB_WIDTH: usize = 16;

impl RunOptions {
    /// 引数列を解釈（先頭のプログラム名は含めない）
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = RunOptions::default();
        let mut iter = args.into_iter().map(Into::into);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => options.show_help = true,
                "-V" | "--version" => options.show_version = true,
                "--no-auto-indent" => options.editor.auto_indent = false,
                "--no-tab-backspace" => options.editor.tab_backspace = false,
                "--tab-width" => {
                    let value = expect_value(&mut iter, &arg)?;
                    options.editor.tab_width = match value.parse::<usize>() {
                        Ok(width) if (1..=MAX_TAB_WIDTH).contains(&width) => width,
                        _ => {
                            return Err(InputError::InvalidArgument {
                                arg: format!("--tab-width {}", value),
                            }
                            .into())
                        }
                    };
                }
                "--encoding" => {
                    let value = expect_value(&mut iter, &arg)?;
                    options.editor.encoding = value.parse::<TextEncoding>()?;
                }
                "--prefs" => {
                    options.prefs_path = Some(PathBuf::from(expect_value(&mut iter, &arg)?));
                }
                "--debug-log" => {
                    options.debug_log_path = Some(PathBuf::from(expect_value(&mut iter, &arg)?));
                }
                other if other.starts_with('-') && other.len() > 1 => {
                    return Err(InputError::InvalidArgument {
                        arg: other.to_string(),
                    }
                    .into());
                }
                _ => options.files.push(PathBuf::from(&arg)),
            }
        }

        Ok(options)
    }

    /// ログ出力先を解決
    pub fn resolve_log_path(&self) -> Option<PathBuf> {
        match &self.debug_log_path {
            Some(path) => Some(path.clone()),
            None => crate::logging::default_log_path(),
        }
    }
}

fn expect_value(iter: &mut impl Iterator<Item = String>, option: &str) -> Result<String> {
    iter.next().ok_or_else(|| {
        InputError::MissingValue {
            option: option.to_string(),
        }
        .into()
    })
}

/// `--help` の表示内容
pub const USAGE: &str = "\
Usage: charge-edit [OPTIONS] [FILES...]

Options:
  --tab-width N        spaces per tab group, 1-16 (default 4)
  --no-auto-indent     do not carry indentation to new lines
  --no-tab-backspace   backspace always deletes a single character
  --encoding NAME      utf-8 (default), utf-8-bom, latin1
  --prefs PATH         preference file location
  --debug-log PATH     log file location
  -h, --help           print this help
  -V, --version        print version";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;

    #[test]
    fn defaults_without_arguments() {
        let options = RunOptions::parse(Vec::<String>::new()).unwrap();
        assert_eq!(options, RunOptions::default());
        assert_eq!(options.editor.tab_width, 4);
        assert!(options.editor.auto_indent);
        assert!(options.editor.tab_backspace);
    }

    #[test]
    fn parses_editor_flags_and_files() {
        let options = RunOptions::parse([
            "--tab-width",
            "2",
            "--no-auto-indent",
            "--encoding",
            "latin1",
            "a.txt",
            "b.txt",
        ])
        .unwrap();
        assert_eq!(options.editor.tab_width, 2);
        assert!(!options.editor.auto_indent);
        assert_eq!(options.editor.encoding, TextEncoding::Latin1);
        assert_eq!(options.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn rejects_zero_tab_width() {
        let err = RunOptions::parse(["--tab-width", "0"]).unwrap_err();
        assert!(matches!(err, EditorError::Input(InputError::InvalidArgument { .. })));
    }

    #[test]
    fn rejects_oversized_tab_width() {
        assert!(RunOptions::parse(["--tab-width", "16"]).is_ok());
        let err = RunOptions::parse(["--tab-width", "100000000000"]).unwrap_err();
        assert!(matches!(
            err,
            EditorError::Input(InputError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn missing_value_is_reported() {
        let err = RunOptions::parse(["--prefs"]).unwrap_err();
        assert_eq!(
            err,
            EditorError::Input(InputError::MissingValue {
                option: "--prefs".to_string()
            })
        );
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(RunOptions::parse(["--frobnicate"]).is_err());
    }
}
