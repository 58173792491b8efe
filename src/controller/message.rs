//! コントローラーが扱うメッセージとホストへの要求

use crate::buffer::CursorStatus;
use crate::dialog::{DialogEvent, DialogKind};
use crate::editor::ViewEvent;
use crate::error::{file, EditorError};
use crate::prefs::DocsDir;
use crate::search::{FindOutcome, SearchQuery};
use std::fmt;
use std::path::PathBuf;

/// ウィンドウID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u32);

/// ダイアログID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogId(pub u32);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dialog#{}", self.0)
    }
}

/// 閉じる前の確認に対するユーザーの選択
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseChoice {
    Save,
    DontSave,
    Cancel,
}

/// コントローラーのキューに積まれるメッセージ
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// 新しいウィンドウ
    NewWindow,
    /// 新規ドキュメント
    New { window: WindowId },
    /// 開くファイルの選択を表示
    ShowOpenDialog { window: WindowId },
    /// 選択されたファイルを開く
    Open { window: WindowId, paths: Vec<PathBuf> },
    /// 上書き保存
    Save { window: WindowId },
    /// メニューの「名前を付けて保存」
    ShowSaveAsDialog { window: WindowId },
    /// ビューが保存先を必要とした
    OpenSaveDialog { window: WindowId },
    /// 選択された保存先に保存
    SaveAs { window: WindowId, path: PathBuf },
    /// 保存先の選択が取り消された
    SaveCancelled { window: WindowId },
    /// 読み込み完了
    Loaded {
        window: WindowId,
        path: PathBuf,
        result: file::Result<String>,
    },
    /// 書き込み完了
    Saved {
        window: WindowId,
        path: PathBuf,
        result: file::Result<()>,
    },
    /// ウィンドウを閉じようとした
    CloseRequested { window: WindowId },
    /// ビューからの回答
    ConfirmClose {
        window: WindowId,
        close: bool,
        file_path: Option<PathBuf>,
    },
    /// 保存確認でのユーザーの選択
    CloseChoice { window: WindowId, choice: CloseChoice },
    /// 検索ダイアログを開く
    ShowFind { window: WindowId },
    /// 置換ダイアログを開く
    ShowReplace { window: WindowId },
    /// ドキュメントフォルダ設定を開く
    ShowDocsPath { window: WindowId },
    /// 検索
    Find {
        dialog: DialogId,
        window: WindowId,
        query: SearchQuery,
    },
    /// 置換
    Replace {
        dialog: DialogId,
        window: WindowId,
        query: SearchQuery,
        replacement: String,
    },
    /// 検索結果をダイアログへ
    TextFound { dialog: DialogId, outcome: FindOutcome },
    /// フォルダ選択を表示
    OpenSysDirDialog { dialog: DialogId },
    /// 選択されたフォルダ
    DirectoryPicked { dialog: DialogId, path: PathBuf },
    /// ドキュメントフォルダ設定の確定
    SetDocsPath { dialog: DialogId, docs_dir: DocsDir },
    /// ダイアログを閉じる
    CloseDialog(DialogId),
    /// 終了（全ウィンドウに閉じる確認を行う）
    Quit,
    /// ホストからの編集入力
    Edit { window: WindowId, event: ViewEvent },
    /// ホストからのダイアログ入力
    DialogInput { dialog: DialogId, event: DialogEvent },
}

/// ホスト（フロントエンド）に対する要求
#[derive(Debug, Clone, PartialEq)]
pub enum HostRequest {
    WindowCreated(WindowId),
    WindowDestroyed(WindowId),
    DialogOpened {
        dialog: DialogId,
        kind: DialogKind,
        parent: WindowId,
    },
    DialogClosed(DialogId),
    /// タイトル更新
    SetTitle { window: WindowId, title: String },
    /// カーソル位置表示の更新
    StatusChanged {
        window: WindowId,
        status: CursorStatus,
    },
    /// 開くファイルの選択
    PickOpenPath {
        window: WindowId,
        start_dir: Option<PathBuf>,
    },
    /// 保存先の選択
    PickSavePath {
        window: WindowId,
        start_dir: Option<PathBuf>,
    },
    /// 保存 / 保存しない / キャンセル の確認
    ConfirmClose { window: WindowId, file_name: String },
    /// フォルダ選択
    PickDirectory {
        dialog: DialogId,
        start_dir: Option<PathBuf>,
    },
    /// エラー表示
    ShowError {
        window: Option<WindowId>,
        error: EditorError,
    },
    /// アプリケーション終了
    Quit,
}
