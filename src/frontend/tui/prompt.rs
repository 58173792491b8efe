//! 画面下部のプロンプト
//!
//! ファイル選択・フォルダ選択・閉じる前の確認をホスト側で受け持つ。
//! 結果はコントローラーへのメッセージとして返す。

use crate::controller::{CloseChoice, DialogId, Message, WindowId};
use crate::input::{Key, KeyCode};
use std::path::{Path, PathBuf};

/// プロンプトの用途
#[derive(Debug, Clone, PartialEq)]
pub enum PromptKind {
    OpenFile { window: WindowId },
    SaveFile { window: WindowId },
    Directory { dialog: DialogId },
    ConfirmClose { window: WindowId, file_name: String },
}

/// キー入力の結果
#[derive(Debug, Clone, PartialEq)]
pub enum PromptOutcome {
    /// 入力継続
    Pending,
    /// キャンセル（何もしない）
    Cancelled,
    /// 確定
    Done(Message),
}

/// 入力中のプロンプト
#[derive(Debug, Clone)]
pub struct Prompt {
    kind: PromptKind,
    input: String,
    start_dir: Option<PathBuf>,
}

impl Prompt {
    pub fn new(kind: PromptKind, start_dir: Option<PathBuf>) -> Self {
        Self {
            kind,
            input: String::new(),
            start_dir,
        }
    }

    pub fn kind(&self) -> &PromptKind {
        &self.kind
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// 表示用のラベル
    pub fn label(&self) -> String {
        let dir = self
            .start_dir
            .as_ref()
            .map(|dir| format!(" [{}]", dir.display()))
            .unwrap_or_default();
        match &self.kind {
            PromptKind::OpenFile { .. } => format!("Open file{}: ", dir),
            PromptKind::SaveFile { .. } => format!("Save as{}: ", dir),
            PromptKind::Directory { .. } => format!("Documents folder{}: ", dir),
            PromptKind::ConfirmClose { file_name, .. } => format!(
                "Save changes to {}? (s)ave / (d)on't save / (c)ancel ",
                file_name
            ),
        }
    }

    pub fn handle_key(&mut self, key: &Key) -> PromptOutcome {
        if let PromptKind::ConfirmClose { window, .. } = &self.kind {
            return confirm_outcome(*window, key);
        }

        match key.code {
            KeyCode::Esc => self.cancellation(),
            KeyCode::Enter => match self.resolve_path() {
                Some(path) => PromptOutcome::Done(self.completion(path)),
                None => self.cancellation(),
            },
            KeyCode::Backspace => {
                self.input.pop();
                PromptOutcome::Pending
            }
            KeyCode::Char(c) if !key.modifiers.ctrl && !key.modifiers.alt => {
                self.input.push(c);
                PromptOutcome::Pending
            }
            _ => PromptOutcome::Pending,
        }
    }

    /// 取り消し。保存先の選択はコントローラーにも伝える
    fn cancellation(&self) -> PromptOutcome {
        match &self.kind {
            PromptKind::SaveFile { window } => {
                PromptOutcome::Done(Message::SaveCancelled { window: *window })
            }
            _ => PromptOutcome::Cancelled,
        }
    }

    /// 入力をパスに解決。相対パスは開始フォルダ基準
    fn resolve_path(&self) -> Option<PathBuf> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let expanded = shellexpand::tilde(trimmed);
        let path = Path::new(expanded.as_ref());
        if path.is_absolute() {
            return Some(path.to_path_buf());
        }
        match &self.start_dir {
            Some(dir) => Some(dir.join(path)),
            None => Some(path.to_path_buf()),
        }
    }

    fn completion(&self, path: PathBuf) -> Message {
        match &self.kind {
            PromptKind::OpenFile { window } => Message::Open {
                window: *window,
                paths: vec![path],
            },
            PromptKind::SaveFile { window } => Message::SaveAs {
                window: *window,
                path,
            },
            PromptKind::Directory { dialog } => Message::DirectoryPicked {
                dialog: *dialog,
                path,
            },
            PromptKind::ConfirmClose { window, .. } => Message::CloseChoice {
                window: *window,
                choice: CloseChoice::Cancel,
            },
        }
    }
}

fn confirm_outcome(window: WindowId, key: &Key) -> PromptOutcome {
    let choice = match key.code {
        KeyCode::Char('s') | KeyCode::Char('y') => CloseChoice::Save,
        KeyCode::Char('d') | KeyCode::Char('n') => CloseChoice::DontSave,
        KeyCode::Char('c') | KeyCode::Esc => CloseChoice::Cancel,
        _ => return PromptOutcome::Pending,
    };
    PromptOutcome::Done(Message::CloseChoice { window, choice })
}
