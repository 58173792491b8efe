//! 編集層
//!
//! ウィンドウごとのエディタビューと、そのイベント・副作用の定義

pub mod events;
pub mod view;

pub use events::{ViewEffect, ViewEvent};
pub use view::{EditorView, APP_TITLE};
