//! ドキュメントフォルダ設定ダイアログ

use super::{DialogBinding, DialogEvent};
use crate::controller::Message;
use crate::error::PrefsError;
use crate::prefs::DocsDir;

/// 入力が不正な時の案内
pub const INVALID_PATH_TEXT: &str = "Please enter a valid path or select one from the menu";

/// 選択肢
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocsChoice {
    #[default]
    Default,
    Custom,
}

/// フォーカス位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocsPathField {
    #[default]
    Choice,
    Path,
}

/// ドキュメントフォルダ設定ダイアログ
#[derive(Debug, Clone, Default)]
pub struct DocsPathDialog {
    binding: Option<DialogBinding>,
    choice: DocsChoice,
    path_text: String,
    focus: DocsPathField,
    validity: Option<String>,
}

impl DocsPathDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在の設定を初期値にして作成
    pub fn with_current(current: &DocsDir) -> Self {
        match current {
            DocsDir::Default => Self::new(),
            DocsDir::Custom(path) => Self {
                choice: DocsChoice::Custom,
                path_text: path.display().to_string(),
                ..Self::default()
            },
        }
    }

    pub fn binding(&self) -> Option<DialogBinding> {
        self.binding
    }

    pub fn choice(&self) -> DocsChoice {
        self.choice
    }

    pub fn path_text(&self) -> &str {
        &self.path_text
    }

    pub fn focus(&self) -> DocsPathField {
        self.focus
    }

    /// 入力検証のエラー表示
    pub fn validity(&self) -> Option<&str> {
        self.validity.as_deref()
    }

    pub fn handle(&mut self, event: DialogEvent) -> Vec<Message> {
        match event {
            DialogEvent::Shown(binding) => self.binding = Some(binding),
            DialogEvent::Input(ch) => {
                // パス欄への入力はカスタム指定を選んだことになる
                self.path_text.push(ch);
                self.choice = DocsChoice::Custom;
                self.focus = DocsPathField::Path;
                self.validity = None;
            }
            DialogEvent::Backspace => {
                self.path_text.pop();
                self.validity = None;
            }
            DialogEvent::NextField => {
                self.focus = match self.focus {
                    DocsPathField::Choice => DocsPathField::Path,
                    DocsPathField::Path => DocsPathField::Choice,
                };
            }
            DialogEvent::Toggle => {
                self.choice = match self.choice {
                    DocsChoice::Default => DocsChoice::Custom,
                    DocsChoice::Custom => DocsChoice::Default,
                };
                self.validity = None;
            }
            DialogEvent::Submit => return self.submit(),
            DialogEvent::Browse => {
                if let Some(binding) = self.binding {
                    return vec![Message::OpenSysDirDialog {
                        dialog: binding.dialog,
                    }];
                }
            }
            DialogEvent::DirectoryPicked(path) => {
                self.path_text = path.display().to_string();
                self.choice = DocsChoice::Custom;
                self.validity = None;
            }
            DialogEvent::Cancel => {
                if let Some(binding) = self.binding {
                    return vec![Message::CloseDialog(binding.dialog)];
                }
            }
            DialogEvent::ParentMissing => {
                self.validity = Some(super::INTERNAL_ERROR_TEXT.to_string());
            }
            DialogEvent::ReplaceOne | DialogEvent::TextFound(_) => {}
        }
        Vec::new()
    }

    fn submit(&mut self) -> Vec<Message> {
        let Some(binding) = self.binding else {
            self.validity = Some(super::INTERNAL_ERROR_TEXT.to_string());
            return Vec::new();
        };

        let docs_dir = match self.choice {
            DocsChoice::Default => DocsDir::Default,
            DocsChoice::Custom => match DocsDir::custom_from_input(&self.path_text) {
                Ok(dir) => dir,
                Err(PrefsError::EmptyPath) => {
                    self.validity = Some(INVALID_PATH_TEXT.to_string());
                    return Vec::new();
                }
                Err(err) => {
                    self.validity = Some(err.to_string());
                    return Vec::new();
                }
            },
        };

        self.validity = None;
        vec![Message::SetDocsPath {
            dialog: binding.dialog,
            docs_dir,
        }]
    }
}
