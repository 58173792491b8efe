//! ファイル操作モジュール
//!
//! - ファイル全体の読み書きのみ（部分読み込み・アトミック保存なし）
//! - エンコーディングはユーザー指定（既定は UTF-8）
//! - 改行コードは変換しない

pub mod encoding;
pub mod io;

pub use encoding::TextEncoding;
pub use io::{ensure_dir, read_text, write_text};
