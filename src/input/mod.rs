//! 入力処理モジュール
//!
//! キーマップ、メニュー、編集キーの変換を提供

pub mod keymap;

// 公開API
pub use keymap::{dialog_event, edit_event, Key, KeyCode, KeyModifiers, Menu, MenuAction, MenuGroup, MenuItem};
