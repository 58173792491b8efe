//! カーソル位置管理
//!
//! 行・列・総行数はテキストとカーソル位置だけから毎回再計算する。

/// カーソル位置の表示情報（すべて1ベース）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorStatus {
    /// 行番号
    pub line: usize,
    /// 列番号（文字単位）
    pub column: usize,
    /// 総行数
    pub total_lines: usize,
}

impl CursorStatus {
    /// テキストとカーソル位置から算出
    pub fn compute(text: &str, cursor: usize) -> Self {
        let mut line = 1;
        let mut line_start = 0;
        let mut total_newlines = 0;
        let mut consumed = 0;

        for (idx, ch) in text.chars().enumerate() {
            if idx < cursor {
                consumed = idx + 1;
                if ch == '\n' {
                    line += 1;
                    line_start = idx + 1;
                }
            }
            if ch == '\n' {
                total_newlines += 1;
            }
        }

        // 範囲外のカーソルは末尾に丸める（consumed == min(cursor, 文字数)）
        let cursor = consumed;

        Self {
            line,
            column: cursor - line_start + 1,
            total_lines: total_newlines + 1,
        }
    }

    /// ステータス行の表示文字列
    pub fn label(&self) -> String {
        format!(
            "Ln {}, Col {} | {} lines",
            self.line, self.column, self.total_lines
        )
    }
}

/// カーソル操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// 文字単位の移動
    Left,
    Right,
    /// 行単位の移動
    Up,
    Down,
    /// 行内の移動
    LineStart,
    LineEnd,
    /// バッファ全体の移動
    BufferStart,
    BufferEnd,
}

/// 行の開始位置（文字オフセット）一覧
fn line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (idx, ch) in text.chars().enumerate() {
        if ch == '\n' {
            starts.push(idx + 1);
        }
    }
    starts
}

/// 移動先のオフセットを計算
pub fn motion_target(text: &str, cursor: usize, motion: Motion) -> usize {
    let len = text.chars().count();
    let cursor = cursor.min(len);
    let starts = line_starts(text);
    let line_idx = starts.partition_point(|&start| start <= cursor) - 1;
    let line_start = starts[line_idx];
    // 改行を含まない行末
    let line_end = |idx: usize| -> usize {
        starts
            .get(idx + 1)
            .map(|next| next - 1)
            .unwrap_or(len)
    };

    match motion {
        Motion::Left => cursor.saturating_sub(1),
        Motion::Right => (cursor + 1).min(len),
        Motion::LineStart => line_start,
        Motion::LineEnd => line_end(line_idx),
        Motion::BufferStart => 0,
        Motion::BufferEnd => len,
        Motion::Up => {
            if line_idx == 0 {
                return 0;
            }
            let column = cursor - line_start;
            let target = line_idx - 1;
            (starts[target] + column).min(line_end(target))
        }
        Motion::Down => {
            if line_idx + 1 >= starts.len() {
                return len;
            }
            let column = cursor - line_start;
            let target = line_idx + 1;
            (starts[target] + column).min(line_end(target))
        }
    }
}
