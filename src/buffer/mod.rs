//! バッファ管理モジュール
//!
//! 1ウィンドウ分のテキストと選択範囲を保持する。
//! オフセットはすべて文字単位（0ベース）で、バイト位置は内部でのみ扱う。

pub mod cursor;
pub mod indent;

pub use cursor::{CursorStatus, Motion};

/// 選択範囲（文字オフセット、`start <= end`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// 幅ゼロの選択（カーソル）
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// 範囲を作成（順序は正規化する）
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// テキストバッファ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    selection: Selection,
    /// 選択を伸ばしている途中の (起点, 移動端)。選択が変わると無効
    extension: Option<(usize, usize)>,
}

impl TextBuffer {
    /// 空のバッファを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 文字列からバッファを作成（カーソルは先頭）
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: Selection::caret(0),
            extension: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 文字数
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// カーソル位置（選択終端）
    pub fn cursor(&self) -> usize {
        self.selection.end
    }

    /// 選択範囲を設定（範囲外はバッファ末尾に丸める）
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.len_chars();
        self.selection = Selection::new(start.min(len), end.min(len));
    }

    /// カーソルを移動（選択は解除）
    pub fn set_cursor(&mut self, offset: usize) {
        let offset = offset.min(self.len_chars());
        self.selection = Selection::caret(offset);
    }

    /// 選択中のテキスト
    pub fn selected_text(&self) -> &str {
        self.slice(self.selection.start, self.selection.end)
    }

    /// 文字範囲のスライス
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let start_byte = char_to_byte(&self.text, start);
        let end_byte = char_to_byte(&self.text, end.max(start));
        &self.text[start_byte..end_byte]
    }

    /// 内容を丸ごと置き換え、カーソルを先頭へ
    pub fn replace_all(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selection = Selection::caret(0);
    }

    /// 内容を空にする
    pub fn clear(&mut self) {
        self.replace_all(String::new());
    }

    /// 文字範囲を置換し、カーソルを挿入テキストの直後に置く
    pub fn replace_range(&mut self, start: usize, end: usize, replacement: &str) {
        let len = self.len_chars();
        let start = start.min(len);
        let end = end.clamp(start, len);
        let start_byte = char_to_byte(&self.text, start);
        let end_byte = char_to_byte(&self.text, end);
        self.text.replace_range(start_byte..end_byte, replacement);
        self.selection = Selection::caret(start + replacement.chars().count());
    }

    /// 選択範囲を置換（通常のタイピング）
    pub fn replace_selection(&mut self, replacement: &str) {
        let Selection { start, end } = self.selection;
        self.replace_range(start, end, replacement);
    }

    /// カーソル直前の `count` 文字を返す（先頭を越える分は含めない）
    pub fn preceding(&self, count: usize) -> &str {
        let cursor = self.cursor();
        self.slice(cursor.saturating_sub(count), cursor)
    }

    /// カーソル直前の1文字、または選択範囲を削除
    pub fn delete_backward(&mut self) -> bool {
        let Selection { start, end } = self.selection;
        if start != end {
            self.replace_range(start, end, "");
            return true;
        }
        if start == 0 {
            return false;
        }
        self.replace_range(start - 1, start, "");
        true
    }

    /// カーソル直後の1文字、または選択範囲を削除
    pub fn delete_forward(&mut self) -> bool {
        let Selection { start, end } = self.selection;
        if start != end {
            self.replace_range(start, end, "");
            return true;
        }
        if start >= self.len_chars() {
            return false;
        }
        self.replace_range(start, start + 1, "");
        true
    }

    /// カーソル移動
    pub fn apply_motion(&mut self, motion: Motion) {
        let target = cursor::motion_target(&self.text, self.cursor(), motion);
        self.set_cursor(target);
    }

    /// 移動端を動かして選択範囲を伸縮する
    ///
    /// 起点は直前の伸縮の起点、なければ現在の選択開始位置。
    pub fn extend_selection(&mut self, motion: Motion) {
        let (anchor, head) = match self.extension {
            Some((anchor, head)) if Selection::new(anchor, head) == self.selection => (anchor, head),
            _ => (self.selection.start, self.selection.end),
        };
        let target = cursor::motion_target(&self.text, head, motion);
        self.selection = Selection::new(anchor, target);
        self.extension = Some((anchor, target));
    }

    /// 全体を選択
    pub fn select_all(&mut self) {
        self.set_selection(0, self.len_chars());
    }

    /// 現在のカーソル位置情報
    pub fn status(&self) -> CursorStatus {
        CursorStatus::compute(&self.text, self.cursor())
    }
}

/// 文字オフセットをバイト位置へ変換（範囲外は末尾）
pub(crate) fn char_to_byte(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// バイト位置を文字オフセットへ変換
pub(crate) fn byte_to_char(text: &str, byte_pos: usize) -> usize {
    text[..byte_pos.min(text.len())].chars().count()
}
