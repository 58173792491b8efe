//! 検索ダイアログ

use super::{DialogBinding, DialogEvent, INTERNAL_ERROR_TEXT};
use crate::controller::Message;
use crate::search::{SearchMode, SearchQuery, SearchState};

/// 検索ダイアログ
#[derive(Debug, Clone, Default)]
pub struct FindDialog {
    binding: Option<DialogBinding>,
    field: String,
    mode: SearchMode,
    totals_text: String,
    state: SearchState,
}

impl FindDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binding(&self) -> Option<DialogBinding> {
        self.binding
    }

    /// 検索語の入力欄
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// 「2 of 5」などの件数表示
    pub fn totals_text(&self) -> &str {
        &self.totals_text
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn handle(&mut self, event: DialogEvent) -> Vec<Message> {
        match event {
            DialogEvent::Shown(binding) => self.binding = Some(binding),
            DialogEvent::Input(ch) => self.field.push(ch),
            DialogEvent::Backspace => {
                self.field.pop();
            }
            DialogEvent::Toggle => {
                self.mode = match self.mode {
                    SearchMode::Literal => SearchMode::Regex,
                    SearchMode::Regex => SearchMode::Literal,
                };
            }
            DialogEvent::Submit | DialogEvent::ReplaceOne => return self.submit(),
            DialogEvent::Cancel => {
                if let Some(binding) = self.binding {
                    return vec![Message::CloseDialog(binding.dialog)];
                }
            }
            DialogEvent::TextFound(outcome) => {
                self.totals_text = outcome.totals_text();
                self.state.apply(&self.field, &outcome);
            }
            DialogEvent::ParentMissing => self.field = INTERNAL_ERROR_TEXT.to_string(),
            DialogEvent::NextField | DialogEvent::Browse | DialogEvent::DirectoryPicked(_) => {}
        }
        Vec::new()
    }

    fn submit(&mut self) -> Vec<Message> {
        let Some(binding) = self.binding else {
            log::error!("find dialog submitted before it was bound to a window");
            self.field = INTERNAL_ERROR_TEXT.to_string();
            return Vec::new();
        };

        vec![Message::Find {
            dialog: binding.dialog,
            window: binding.parent,
            query: SearchQuery {
                text: self.field.clone(),
                mode: self.mode,
            },
        }]
    }
}
