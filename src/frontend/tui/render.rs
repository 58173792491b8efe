//! 画面描画
//!
//! 上から タイトル行 / 編集領域 / ダイアログ / ステータス行 / プロンプト行。

use super::prompt::Prompt;
use crate::buffer::{CursorStatus, Selection};
use crate::dialog::{Dialog, DocsChoice, DocsPathField, ReplaceField};
use crate::editor::EditorView;
use crate::error::{ErrorDisplay, ErrorLevel};
use crate::search::SearchMode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 編集領域のスクロール位置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// 表示開始行（0ベース）
    pub top_line: usize,
    /// 水平スクロール（表示幅単位）
    pub left_col: usize,
}

impl Viewport {
    /// カーソルが表示領域に入るようスクロール
    pub fn ensure_visible(&mut self, line: usize, col: usize, height: usize, width: usize) {
        let height = height.max(1);
        let width = width.max(1);
        if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + height {
            self.top_line = line + 1 - height;
        }
        if col < self.left_col {
            self.left_col = col;
        } else if col >= self.left_col + width {
            self.left_col = col + 1 - width;
        }
    }
}

/// 最下行の表示内容
pub enum BottomLine<'a> {
    Prompt(&'a Prompt),
    Message(&'a ErrorDisplay),
    Menu(&'a str),
}

/// 1フレーム分の描画対象
pub struct Screen<'a> {
    pub view: &'a EditorView,
    pub title: &'a str,
    pub status: CursorStatus,
    /// 何番目のウィンドウか（1ベース）と総数
    pub position: (usize, usize),
    pub dialog: Option<&'a Dialog>,
    pub dialog_focused: bool,
    pub bottom: BottomLine<'a>,
}

pub fn draw(frame: &mut Frame<'_>, screen: &Screen<'_>, viewport: &mut Viewport) {
    let dialog_height = screen.dialog.map(dialog_height).unwrap_or(0);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(dialog_height),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_title(frame, chunks[0], screen);
    let editor_cursor = draw_editor(frame, chunks[1], screen, viewport);
    let dialog_cursor = match screen.dialog {
        Some(dialog) if dialog_height > 0 => {
            draw_dialog(frame, chunks[2], dialog, screen.dialog_focused)
        }
        _ => None,
    };
    draw_status(frame, chunks[3], screen);
    let prompt_cursor = draw_bottom(frame, chunks[4], &screen.bottom);

    let cursor = if matches!(screen.bottom, BottomLine::Prompt(_)) {
        prompt_cursor
    } else if screen.dialog_focused {
        dialog_cursor
    } else {
        editor_cursor
    };
    if let Some((x, y)) = cursor {
        frame.set_cursor_position(Position::new(x, y));
    }
}

fn draw_title(frame: &mut Frame<'_>, area: Rect, screen: &Screen<'_>) {
    let (index, count) = screen.position;
    let text = format!(" {}  ({}/{})", screen.title, index, count);
    let paragraph = Paragraph::new(Line::from(text)).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(paragraph, area);
}

fn draw_editor(
    frame: &mut Frame<'_>,
    area: Rect,
    screen: &Screen<'_>,
    viewport: &mut Viewport,
) -> Option<(u16, u16)> {
    let text = screen.view.text();
    let cursor_line = screen.status.line.saturating_sub(1);
    let cursor_col = text
        .split('\n')
        .nth(cursor_line)
        .map(|line| display_width(line, screen.status.column.saturating_sub(1)))
        .unwrap_or(0);

    let height = area.height as usize;
    let width = area.width as usize;
    viewport.ensure_visible(cursor_line, cursor_col, height, width);

    let selection = screen.view.buffer().selection();
    let mut lines = Vec::with_capacity(height);
    let mut offset = 0;
    for (index, line) in text.split('\n').enumerate() {
        let length = line.chars().count();
        if index >= viewport.top_line + height {
            break;
        }
        if index >= viewport.top_line {
            lines.push(line_spans(line, offset, selection, viewport.left_col, width));
        }
        offset += length + 1;
    }

    frame.render_widget(Paragraph::new(lines), area);

    let x = cursor_col.checked_sub(viewport.left_col)?;
    let y = cursor_line.checked_sub(viewport.top_line)?;
    if x < width && y < height {
        Some((area.x + x as u16, area.y + y as u16))
    } else {
        None
    }
}

/// 1行を表示幅で切り出し、選択範囲を反転表示
fn line_spans(
    line: &str,
    line_start: usize,
    selection: Selection,
    left_col: usize,
    width: usize,
) -> Line<'static> {
    let selected = Style::default().add_modifier(Modifier::REVERSED);
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current = String::new();
    let mut current_selected = false;
    let mut col = 0;

    for (i, ch) in line.chars().enumerate() {
        let w = char_width(ch);
        if col + w <= left_col {
            col += w;
            continue;
        }
        if col >= left_col + width {
            break;
        }
        let offset = line_start + i;
        let is_selected = offset >= selection.start && offset < selection.end;
        if is_selected != current_selected && !current.is_empty() {
            spans.push(styled(std::mem::take(&mut current), current_selected, selected));
        }
        current_selected = is_selected;
        current.push(if ch == '\t' { ' ' } else { ch });
        col += w;
    }
    if !current.is_empty() {
        spans.push(styled(current, current_selected, selected));
    }
    Line::from(spans)
}

fn styled(text: String, is_selected: bool, selected: Style) -> Span<'static> {
    if is_selected {
        Span::styled(text, selected)
    } else {
        Span::raw(text)
    }
}

fn char_width(ch: char) -> usize {
    if ch == '\t' {
        1
    } else {
        ch.width().unwrap_or(0)
    }
}

/// 先頭 `chars` 文字分の表示幅
fn display_width(line: &str, chars: usize) -> usize {
    line.chars().take(chars).map(char_width).sum()
}

fn draw_status(frame: &mut Frame<'_>, area: Rect, screen: &Screen<'_>) {
    let mut text = format!(" {}", screen.status.label());
    text.push_str(&format!("  {}", screen.view.options().encoding));
    if screen.view.is_read_only() {
        text.push_str("  [loading]");
    }
    let paragraph =
        Paragraph::new(Line::from(text)).style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(paragraph, area);
}

fn draw_bottom(frame: &mut Frame<'_>, area: Rect, bottom: &BottomLine<'_>) -> Option<(u16, u16)> {
    frame.render_widget(Clear, area);
    match bottom {
        BottomLine::Prompt(prompt) => {
            let label = prompt.label();
            let text = format!("{}{}", label, prompt.input());
            let x = text.width().min(area.width.saturating_sub(1) as usize);
            frame.render_widget(
                Paragraph::new(Line::from(text)).style(Style::default().fg(Color::Cyan)),
                area,
            );
            Some((area.x + x as u16, area.y))
        }
        BottomLine::Message(message) => {
            let color = match message.level {
                ErrorLevel::Warning => Color::Yellow,
                ErrorLevel::Error => Color::Red,
            };
            frame.render_widget(
                Paragraph::new(Line::from(message.message.clone()))
                    .style(Style::default().fg(color)),
                area,
            );
            None
        }
        BottomLine::Menu(summary) => {
            frame.render_widget(
                Paragraph::new(Line::from(summary.to_string()))
                    .style(Style::default().fg(Color::DarkGray)),
                area,
            );
            None
        }
    }
}

fn dialog_height(dialog: &Dialog) -> u16 {
    match dialog {
        Dialog::Find(_) => 3,
        Dialog::Replace(_) => 4,
        Dialog::DocsPath(_) => 5,
    }
}

fn mode_label(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::Literal => "text",
        SearchMode::Regex => "regex",
    }
}

/// ダイアログを描画し、入力欄のカーソル位置を返す
fn draw_dialog(
    frame: &mut Frame<'_>,
    area: Rect,
    dialog: &Dialog,
    focused: bool,
) -> Option<(u16, u16)> {
    frame.render_widget(Clear, area);
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let (title, lines, cursor) = match dialog {
        Dialog::Find(find) => {
            let label = "Find: ";
            let line = format!(
                "{}{}  [{}]  {}",
                label,
                find.field(),
                mode_label(find.mode()),
                find.totals_text()
            );
            (
                " Find (Enter next, Ctrl+T regex, Esc close) ",
                vec![Line::from(line)],
                (0, label.width() + find.field().width()),
            )
        }
        Dialog::Replace(replace) => {
            let find_line = format!(
                "Find:    {}  [{}]  {}",
                replace.find_field(),
                mode_label(replace.mode()),
                replace.totals_text()
            );
            let replace_line = format!("Replace: {}", replace.replace_field());
            let cursor = match replace.focus() {
                ReplaceField::Find => (0, 9 + replace.find_field().width()),
                ReplaceField::Replace => (1, 9 + replace.replace_field().width()),
            };
            (
                " Replace (Enter find, Ctrl+R replace, Tab field, Esc close) ",
                vec![Line::from(find_line), Line::from(replace_line)],
                cursor,
            )
        }
        Dialog::DocsPath(docs) => {
            let (default_mark, custom_mark) = match docs.choice() {
                DocsChoice::Default => ("(*)", "( )"),
                DocsChoice::Custom => ("( )", "(*)"),
            };
            let choice_line = format!("{} Default   {} Custom", default_mark, custom_mark);
            let path_line = format!("Path: {}", docs.path_text());
            let validity = Line::from(Span::styled(
                docs.validity().unwrap_or_default().to_string(),
                Style::default().fg(Color::Red),
            ));
            let cursor = match docs.focus() {
                DocsPathField::Choice => (0, 1),
                DocsPathField::Path => (1, 6 + docs.path_text().width()),
            };
            (
                " Documents Folder (Ctrl+T choice, Ctrl+O browse, Enter ok, Esc cancel) ",
                vec![Line::from(choice_line), Line::from(path_line), validity],
                cursor,
            )
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);
    frame.render_widget(Paragraph::new(lines).block(block), area);

    let (row, col) = cursor;
    let inner_width = area.width.saturating_sub(2) as usize;
    let col = col.min(inner_width.saturating_sub(1));
    Some((area.x + 1 + col as u16, area.y + 1 + row as u16))
}
