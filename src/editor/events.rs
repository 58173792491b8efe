//! エディタビューの入出力イベント

use crate::buffer::{CursorStatus, Motion};
use crate::controller::DialogId;
use crate::error::{file, EditorError};
use crate::file::TextEncoding;
use crate::search::{FindOutcome, SearchQuery};
use std::path::PathBuf;

/// ビューが受け取るイベント
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// 新規ドキュメント
    New,
    /// ファイルを開く（先頭のパスのみ使用）
    Open(Vec<PathBuf>),
    /// 読み込み完了通知
    Loaded {
        path: PathBuf,
        result: file::Result<String>,
    },
    /// 上書き保存（パス未設定なら保存先を問い合わせる）
    Save,
    /// 名前を付けて保存
    SaveAs(PathBuf),
    /// 書き込み完了通知
    Saved {
        path: PathBuf,
        result: file::Result<()>,
    },
    /// 通常の文字入力（選択範囲を置換）
    InsertText(String),
    Backspace,
    Delete,
    Tab,
    Enter,
    /// カーソル移動
    Move(Motion),
    /// 選択範囲の変更
    Select { start: usize, end: usize },
    /// 移動端を動かして選択を伸縮
    ExtendSelection(Motion),
    SelectAll,
    /// ウィンドウを閉じようとしている
    CloseRequested,
    /// 検索要求
    Find { dialog: DialogId, query: SearchQuery },
    /// 置換要求
    Replace {
        dialog: DialogId,
        query: SearchQuery,
        replacement: String,
    },
}

impl ViewEvent {
    /// バッファを書き換えうるイベントか（読み込み中は無視する）
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            ViewEvent::InsertText(_)
                | ViewEvent::Backspace
                | ViewEvent::Delete
                | ViewEvent::Tab
                | ViewEvent::Enter
                | ViewEvent::Replace { .. }
                | ViewEvent::Save
                | ViewEvent::SaveAs(_)
                | ViewEvent::Open(_)
        )
    }
}

/// ビューが要求する副作用
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEffect {
    /// ウィンドウタイトルの更新
    TitleChanged(String),
    /// ステータス行（行・列・総行数）の更新
    StatusChanged(CursorStatus),
    /// 保存先の問い合わせ
    RequestSavePath,
    /// ファイル読み込み
    ReadFile {
        path: PathBuf,
        encoding: TextEncoding,
    },
    /// ファイル書き込み
    WriteFile {
        path: PathBuf,
        contents: String,
        encoding: TextEncoding,
    },
    /// 閉じてよいかの回答
    CloseResponse {
        should_close: bool,
        path: Option<PathBuf>,
    },
    /// 検索結果を検索ダイアログへ
    TextFound {
        dialog: DialogId,
        outcome: FindOutcome,
    },
    /// ユーザーへ通知するエラー
    Error(EditorError),
}
