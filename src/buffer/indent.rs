//! タブ・自動インデント処理
//!
//! タブは常に `tab_width` 個の空白として挿入する。
//! バックスペースと自動インデントは「ちょうど `tab_width` 個の空白」を1段とみなす。

use super::TextBuffer;

/// タブキー: 選択範囲を空白で置換
pub fn insert_tab(buffer: &mut TextBuffer, tab_width: usize) {
    let spaces = " ".repeat(tab_width);
    buffer.replace_selection(&spaces);
}

/// バックスペース
///
/// 選択があればそれを削除。カーソル直前が `tab_width` 個の空白なら1段まとめて削除する。
pub fn backspace(buffer: &mut TextBuffer, tab_width: usize, tab_backspace: bool) -> bool {
    let selection = buffer.selection();
    if !selection.is_empty() {
        return buffer.delete_backward();
    }

    if tab_backspace && tab_width > 0 {
        let cursor = selection.end;
        let preceding = buffer.preceding(tab_width);
        if preceding.chars().count() == tab_width && preceding.chars().all(|ch| ch == ' ') {
            buffer.replace_range(cursor - tab_width, cursor, "");
            return true;
        }
    }

    buffer.delete_backward()
}

/// カーソル行の先頭インデント段数
///
/// カーソルより前にある空白だけを数え、端数の空白は切り捨てる。
pub fn leading_groups(text: &str, cursor: usize, tab_width: usize) -> usize {
    if tab_width == 0 {
        return 0;
    }

    let before: Vec<char> = text.chars().take(cursor).collect();
    let line_start = before
        .iter()
        .rposition(|&ch| ch == '\n')
        .map(|idx| idx + 1)
        .unwrap_or(0);

    let spaces = before[line_start..]
        .iter()
        .take_while(|&&ch| ch == ' ')
        .count();

    spaces / tab_width
}

/// エンターキー: 改行と（有効なら）現在行と同じ段数のインデントを挿入
pub fn newline(buffer: &mut TextBuffer, tab_width: usize, auto_indent: bool) {
    let mut inserted = String::from("\n");
    if auto_indent {
        let groups = leading_groups(buffer.as_str(), buffer.selection().start, tab_width);
        inserted.push_str(&" ".repeat(groups * tab_width));
    }
    buffer.replace_selection(&inserted);
}
