//! charge-edit - Minimal plain-text editor
//!
//! 複数ウィンドウ・検索置換・タブ幅を意識した編集を持つテキストエディタ。
//! 編集状態は `editor::EditorView`、ウィンドウ間の仲介は `controller::Controller`。

// コアモジュール
pub mod error;
pub mod frontend;
pub mod logging;
pub mod options;
pub mod prefs;

// データ層
pub mod buffer;
pub mod file;

// 編集層
pub mod dialog;
pub mod editor;

// ロジック層
pub mod controller;
pub mod input;
pub mod search;

// 公開API
pub use controller::{Controller, DialogId, HostRequest, Message, WindowId};
pub use editor::{EditorView, ViewEffect, ViewEvent};
pub use error::{EditorError, Result};
pub use frontend::TuiApplication;
pub use options::{EditorOptions, RunOptions};
