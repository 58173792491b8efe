//! キーマップとメニュー
//!
//! メニュー項目とアクセラレータの対応、編集キーからビューイベントへの変換

use crate::buffer::Motion;
use crate::controller::{Message, WindowId};
use crate::dialog::DialogEvent;
use crate::editor::ViewEvent;
use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers};
use std::collections::HashMap;
use std::fmt;

/// キー入力の内部表現
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    F(u8),
    Esc,
    Unknown,
}

impl Key {
    /// 修飾なし
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            modifiers: KeyModifiers {
                ctrl: true,
                ..KeyModifiers::default()
            },
            code: KeyCode::Char(c),
        }
    }

    pub fn ctrl_shift(c: char) -> Self {
        Self {
            modifiers: KeyModifiers {
                ctrl: true,
                alt: false,
                shift: true,
            },
            code: KeyCode::Char(c),
        }
    }

    pub fn alt(c: char) -> Self {
        Self {
            modifiers: KeyModifiers {
                alt: true,
                ..KeyModifiers::default()
            },
            code: KeyCode::Char(c),
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let mut modifiers = KeyModifiers {
            ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
            alt: event.modifiers.contains(CrosstermModifiers::ALT),
            shift: event.modifiers.contains(CrosstermModifiers::SHIFT),
        };

        let code = match event.code {
            CrosstermKeyCode::Char(c) if modifiers.ctrl || modifiers.alt => {
                // Ctrl+Shift+N は端末によって 'N' で届くので小文字に揃える
                if c.is_ascii_uppercase() {
                    modifiers.shift = true;
                }
                KeyCode::Char(c.to_ascii_lowercase())
            }
            CrosstermKeyCode::Char(c) => KeyCode::Char(c),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Home => KeyCode::Home,
            CrosstermKeyCode::End => KeyCode::End,
            CrosstermKeyCode::F(n) => KeyCode::F(n),
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Key { modifiers, code }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift+")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::F(n) => write!(f, "F{}", n),
            other => write!(f, "{:?}", other),
        }
    }
}

/// メニューから実行できる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    New,
    NewWindow,
    Open,
    Save,
    SaveAs,
    Exit,
    Find,
    Replace,
    DocsPath,
    CloseWindow,
    /// フォーカス移動はホストが処理する
    NextWindow,
}

impl MenuAction {
    /// フォーカス中のウィンドウに対するメッセージ
    pub fn message(self, window: WindowId) -> Option<Message> {
        let message = match self {
            MenuAction::New => Message::New { window },
            MenuAction::NewWindow => Message::NewWindow,
            MenuAction::Open => Message::ShowOpenDialog { window },
            MenuAction::Save => Message::Save { window },
            MenuAction::SaveAs => Message::ShowSaveAsDialog { window },
            MenuAction::Exit => Message::Quit,
            MenuAction::Find => Message::ShowFind { window },
            MenuAction::Replace => Message::ShowReplace { window },
            MenuAction::DocsPath => Message::ShowDocsPath { window },
            MenuAction::CloseWindow => Message::CloseRequested { window },
            MenuAction::NextWindow => return None,
        };
        Some(message)
    }
}

/// メニュー項目
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: &'static str,
    pub accelerators: Vec<Key>,
    pub action: MenuAction,
}

/// メニュー（File / Edit / Window）
#[derive(Debug, Clone)]
pub struct MenuGroup {
    pub title: &'static str,
    pub items: Vec<MenuItem>,
}

/// アプリケーションメニュー
#[derive(Debug, Clone)]
pub struct Menu {
    groups: Vec<MenuGroup>,
    bindings: HashMap<Key, MenuAction>,
}

impl Menu {
    pub fn new() -> Self {
        let groups = vec![
            MenuGroup {
                title: "File",
                items: vec![
                    item("New", vec![Key::ctrl('n')], MenuAction::New),
                    item(
                        "New Window",
                        vec![Key::ctrl_shift('n'), Key::alt('n')],
                        MenuAction::NewWindow,
                    ),
                    item("Open", vec![Key::ctrl('o')], MenuAction::Open),
                    item("Save", vec![Key::ctrl('s')], MenuAction::Save),
                    item(
                        "Save as",
                        vec![Key::ctrl_shift('s'), Key::alt('s')],
                        MenuAction::SaveAs,
                    ),
                    item("Exit", vec![Key::ctrl('q')], MenuAction::Exit),
                ],
            },
            MenuGroup {
                title: "Edit",
                items: vec![
                    item("Find", vec![Key::ctrl('f')], MenuAction::Find),
                    item("Replace", vec![Key::ctrl('r')], MenuAction::Replace),
                    item("Documents Folder", vec![Key::ctrl('d')], MenuAction::DocsPath),
                ],
            },
            MenuGroup {
                title: "Window",
                items: vec![
                    item("Close", vec![Key::ctrl('w')], MenuAction::CloseWindow),
                    item(
                        "Next Window",
                        vec![Key::plain(KeyCode::F(6))],
                        MenuAction::NextWindow,
                    ),
                ],
            },
        ];

        let mut bindings = HashMap::with_capacity(16);
        for group in &groups {
            for entry in &group.items {
                for key in &entry.accelerators {
                    bindings.insert(*key, entry.action);
                }
            }
        }

        Self { groups, bindings }
    }

    pub fn groups(&self) -> &[MenuGroup] {
        &self.groups
    }

    /// アクセラレータに対応する操作
    pub fn lookup(&self, key: &Key) -> Option<MenuAction> {
        self.bindings.get(key).copied()
    }

    /// メニューバー用の一行表示
    pub fn summary(&self) -> String {
        self.groups
            .iter()
            .flat_map(|group| group.items.iter())
            .filter_map(|entry| {
                entry
                    .accelerators
                    .first()
                    .map(|key| format!("{} {}", key, entry.label))
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

fn item(label: &'static str, accelerators: Vec<Key>, action: MenuAction) -> MenuItem {
    MenuItem {
        label,
        accelerators,
        action,
    }
}

/// 編集領域へのキー入力をビューイベントに変換
pub fn edit_event(key: &Key) -> Option<ViewEvent> {
    if key.modifiers.alt {
        return None;
    }
    if key.modifiers.ctrl {
        let motion = match key.code {
            KeyCode::Char('a') if !key.modifiers.shift => return Some(ViewEvent::SelectAll),
            KeyCode::Home => Motion::BufferStart,
            KeyCode::End => Motion::BufferEnd,
            _ => return None,
        };
        return Some(motion_event(motion, key.modifiers.shift));
    }
    if let Some(motion) = plain_motion(key.code) {
        return Some(motion_event(motion, key.modifiers.shift));
    }

    let event = match key.code {
        KeyCode::Char(c) => ViewEvent::InsertText(c.to_string()),
        KeyCode::Enter => ViewEvent::Enter,
        KeyCode::Tab => ViewEvent::Tab,
        KeyCode::Backspace => ViewEvent::Backspace,
        KeyCode::Delete => ViewEvent::Delete,
        _ => return None,
    };
    Some(event)
}

/// 修飾なしの移動キー
fn plain_motion(code: KeyCode) -> Option<Motion> {
    let motion = match code {
        KeyCode::Left => Motion::Left,
        KeyCode::Right => Motion::Right,
        KeyCode::Up => Motion::Up,
        KeyCode::Down => Motion::Down,
        KeyCode::Home => Motion::LineStart,
        KeyCode::End => Motion::LineEnd,
        _ => return None,
    };
    Some(motion)
}

/// Shift 付きなら選択を伸ばす
fn motion_event(motion: Motion, extend: bool) -> ViewEvent {
    if extend {
        ViewEvent::ExtendSelection(motion)
    } else {
        ViewEvent::Move(motion)
    }
}

/// ダイアログにフォーカスがある時のキー入力を変換
///
/// Enter は既定ボタン、Ctrl+R は置換、Ctrl+T は選択肢の切り替え、
/// Ctrl+O はフォルダ選択。
pub fn dialog_event(key: &Key) -> Option<DialogEvent> {
    if key.modifiers.ctrl {
        return match key.code {
            KeyCode::Char('r') => Some(DialogEvent::ReplaceOne),
            KeyCode::Char('t') => Some(DialogEvent::Toggle),
            KeyCode::Char('o') => Some(DialogEvent::Browse),
            _ => None,
        };
    }
    if key.modifiers.alt {
        return None;
    }

    let event = match key.code {
        KeyCode::Char(c) => DialogEvent::Input(c),
        KeyCode::Backspace => DialogEvent::Backspace,
        KeyCode::Tab => DialogEvent::NextField,
        KeyCode::Enter => DialogEvent::Submit,
        KeyCode::Esc => DialogEvent::Cancel,
        _ => return None,
    };
    Some(event)
}
