//! 置換ダイアログ

use super::{DialogBinding, DialogEvent, INTERNAL_ERROR_TEXT};
use crate::controller::Message;
use crate::search::{SearchMode, SearchQuery, SearchState};

/// 入力欄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceField {
    #[default]
    Find,
    Replace,
}

/// 置換ダイアログ
#[derive(Debug, Clone, Default)]
pub struct ReplaceDialog {
    binding: Option<DialogBinding>,
    find_field: String,
    replace_field: String,
    focus: ReplaceField,
    mode: SearchMode,
    totals_text: String,
    state: SearchState,
}

impl ReplaceDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binding(&self) -> Option<DialogBinding> {
        self.binding
    }

    pub fn find_field(&self) -> &str {
        &self.find_field
    }

    pub fn replace_field(&self) -> &str {
        &self.replace_field
    }

    pub fn focus(&self) -> ReplaceField {
        self.focus
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn totals_text(&self) -> &str {
        &self.totals_text
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            ReplaceField::Find => &mut self.find_field,
            ReplaceField::Replace => &mut self.replace_field,
        }
    }

    pub fn handle(&mut self, event: DialogEvent) -> Vec<Message> {
        match event {
            DialogEvent::Shown(binding) => self.binding = Some(binding),
            DialogEvent::Input(ch) => self.focused_mut().push(ch),
            DialogEvent::Backspace => {
                self.focused_mut().pop();
            }
            DialogEvent::NextField => {
                self.focus = match self.focus {
                    ReplaceField::Find => ReplaceField::Replace,
                    ReplaceField::Replace => ReplaceField::Find,
                };
            }
            DialogEvent::Toggle => {
                self.mode = match self.mode {
                    SearchMode::Literal => SearchMode::Regex,
                    SearchMode::Regex => SearchMode::Literal,
                };
            }
            DialogEvent::Submit => return self.find_next(),
            DialogEvent::ReplaceOne => return self.replace(),
            DialogEvent::Cancel => {
                if let Some(binding) = self.binding {
                    return vec![Message::CloseDialog(binding.dialog)];
                }
            }
            DialogEvent::TextFound(outcome) => {
                self.totals_text = outcome.totals_text();
                self.state.apply(&self.find_field, &outcome);
            }
            DialogEvent::ParentMissing => self.find_field = INTERNAL_ERROR_TEXT.to_string(),
            DialogEvent::Browse | DialogEvent::DirectoryPicked(_) => {}
        }
        Vec::new()
    }

    fn checked_binding(&mut self) -> Option<DialogBinding> {
        if self.binding.is_none() {
            log::error!("replace dialog submitted before it was bound to a window");
            self.find_field = INTERNAL_ERROR_TEXT.to_string();
        }
        self.binding
    }

    fn query(&self) -> SearchQuery {
        SearchQuery {
            text: self.find_field.clone(),
            mode: self.mode,
        }
    }

    fn find_next(&mut self) -> Vec<Message> {
        let Some(binding) = self.checked_binding() else {
            return Vec::new();
        };
        vec![Message::Find {
            dialog: binding.dialog,
            window: binding.parent,
            query: self.query(),
        }]
    }

    fn replace(&mut self) -> Vec<Message> {
        let Some(binding) = self.checked_binding() else {
            return Vec::new();
        };
        vec![Message::Replace {
            dialog: binding.dialog,
            window: binding.parent,
            query: self.query(),
            replacement: self.replace_field.clone(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{DialogId, WindowId};

    fn type_str(dialog: &mut ReplaceDialog, text: &str) {
        for ch in text.chars() {
            dialog.handle(DialogEvent::Input(ch));
        }
    }

    #[test]
    fn fields_follow_focus() {
        let mut dialog = ReplaceDialog::new();
        type_str(&mut dialog, "foo");
        dialog.handle(DialogEvent::NextField);
        type_str(&mut dialog, "bar");
        assert_eq!(dialog.find_field(), "foo");
        assert_eq!(dialog.replace_field(), "bar");
        assert_eq!(dialog.focus(), ReplaceField::Replace);
    }

    #[test]
    fn replace_message_carries_both_fields() {
        let mut dialog = ReplaceDialog::new();
        dialog.handle(DialogEvent::Shown(DialogBinding {
            dialog: DialogId(3),
            parent: WindowId(2),
        }));
        type_str(&mut dialog, "a.b");
        dialog.handle(DialogEvent::NextField);
        type_str(&mut dialog, "x");
        assert_eq!(
            dialog.handle(DialogEvent::ReplaceOne),
            vec![Message::Replace {
                dialog: DialogId(3),
                window: WindowId(2),
                query: SearchQuery::literal("a.b"),
                replacement: "x".to_string(),
            }]
        );
    }

    #[test]
    fn unbound_replace_shows_internal_error() {
        let mut dialog = ReplaceDialog::new();
        assert!(dialog.handle(DialogEvent::ReplaceOne).is_empty());
        assert_eq!(dialog.find_field(), INTERNAL_ERROR_TEXT);
    }

    #[test]
    fn regex_toggle_changes_query_mode() {
        let mut dialog = ReplaceDialog::new();
        dialog.handle(DialogEvent::Shown(DialogBinding {
            dialog: DialogId(3),
            parent: WindowId(2),
        }));
        dialog.handle(DialogEvent::Toggle);
        type_str(&mut dialog, "c.t");
        let messages = dialog.handle(DialogEvent::Submit);
        assert!(matches!(
            &messages[..],
            [Message::Find { query, .. }] if query.mode == SearchMode::Regex
        ));
    }
}
