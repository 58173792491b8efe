//! 補助ダイアログ
//!
//! 検索・置換・ドキュメントフォルダ設定の小さな状態機械。
//! 親ウィンドウとの通信はすべてコントローラー経由のメッセージで行う。

pub mod docs_path;
pub mod find;
pub mod replace;

pub use docs_path::{DocsChoice, DocsPathDialog, DocsPathField};
pub use find::FindDialog;
pub use replace::{ReplaceDialog, ReplaceField};

use crate::controller::{DialogId, Message, WindowId};
use crate::search::FindOutcome;
use std::path::PathBuf;

/// 親ウィンドウが不明な状態で送信された時の表示
pub const INTERNAL_ERROR_TEXT: &str = "Internal Error!";

/// ダイアログ表示時に通知される識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogBinding {
    pub dialog: DialogId,
    pub parent: WindowId,
}

/// ダイアログ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Find,
    Replace,
    DocsPath,
}

/// ダイアログが受け取る入力
#[derive(Debug, Clone, PartialEq)]
pub enum DialogEvent {
    /// 表示完了（識別子の通知）
    Shown(DialogBinding),
    /// 文字入力
    Input(char),
    /// 1文字削除
    Backspace,
    /// フォーカス移動
    NextField,
    /// 選択肢の切り替え（ドキュメントフォルダ）
    Toggle,
    /// 既定ボタン（検索 / 確定）
    Submit,
    /// 置換ボタン
    ReplaceOne,
    /// フォルダ選択ボタン
    Browse,
    /// Escape
    Cancel,
    /// 検索結果の通知
    TextFound(FindOutcome),
    /// フォルダ選択の結果
    DirectoryPicked(PathBuf),
    /// 宛先ウィンドウが存在しなかった
    ParentMissing,
}

/// 表示中のダイアログ
#[derive(Debug, Clone)]
pub enum Dialog {
    Find(FindDialog),
    Replace(ReplaceDialog),
    DocsPath(DocsPathDialog),
}

impl Dialog {
    /// 種別に応じた空のダイアログ
    pub fn new(kind: DialogKind) -> Self {
        match kind {
            DialogKind::Find => Dialog::Find(FindDialog::new()),
            DialogKind::Replace => Dialog::Replace(ReplaceDialog::new()),
            DialogKind::DocsPath => Dialog::DocsPath(DocsPathDialog::new()),
        }
    }

    pub fn kind(&self) -> DialogKind {
        match self {
            Dialog::Find(_) => DialogKind::Find,
            Dialog::Replace(_) => DialogKind::Replace,
            Dialog::DocsPath(_) => DialogKind::DocsPath,
        }
    }

    pub fn binding(&self) -> Option<DialogBinding> {
        match self {
            Dialog::Find(dialog) => dialog.binding(),
            Dialog::Replace(dialog) => dialog.binding(),
            Dialog::DocsPath(dialog) => dialog.binding(),
        }
    }

    /// 入力を処理し、コントローラーへ送るメッセージを返す
    pub fn handle(&mut self, event: DialogEvent) -> Vec<Message> {
        match self {
            Dialog::Find(dialog) => dialog.handle(event),
            Dialog::Replace(dialog) => dialog.handle(event),
            Dialog::DocsPath(dialog) => dialog.handle(event),
        }
    }
}
