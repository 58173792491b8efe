//! 検索モジュール
//!
//! 検索・置換の要求ごとにバッファ全体を走査し直す。マッチ位置はキャッシュしない。

mod matcher;
pub mod types;

use crate::buffer::TextBuffer;
use crate::error::search::Result;
pub use matcher::{LiteralMatcher, RegexMatcher, StringMatcher};
pub use types::{FindOutcome, FindResult, SearchMatch, SearchMode, SearchQuery, SearchState};

/// クエリに応じたマッチ一覧
pub fn find_all(text: &str, query: &SearchQuery) -> Result<Vec<SearchMatch>> {
    match query.mode {
        SearchMode::Literal => LiteralMatcher::new().find_matches(text, &query.text),
        SearchMode::Regex => RegexMatcher::new().find_matches(text, &query.text),
    }
}

/// `from` 以降の最初のマッチを探す
///
/// `from` がバッファ末尾なら先頭から探す。以降にマッチがなければ先頭側へ折り返す。
pub fn find(text: &str, query: &SearchQuery, from: usize) -> Result<Option<FindResult>> {
    let matches = find_all(text, query)?;
    Ok(select_from(&matches, from, text.chars().count()))
}

fn select_from(matches: &[SearchMatch], from: usize, len: usize) -> Option<FindResult> {
    let first = matches.first()?;
    let from = if from >= len { 0 } else { from };

    let (index, found, wrapped) = match matches.iter().position(|m| m.start >= from) {
        Some(index) => (index, matches[index], false),
        None => (0, *first, from > 0),
    };

    Some(FindResult {
        start: found.start,
        end: found.end,
        match_num: index + 1,
        total_matches: matches.len(),
        wrapped,
    })
}

/// バッファの選択終端から検索し、見つかったマッチを選択する
pub fn find_in_buffer(buffer: &mut TextBuffer, query: &SearchQuery) -> FindOutcome {
    let from = buffer.selection().end;
    match find(buffer.as_str(), query, from) {
        Ok(Some(result)) => {
            buffer.set_selection(result.start, result.end);
            FindOutcome::Found(result)
        }
        Ok(None) => FindOutcome::NotFound,
        Err(err) => FindOutcome::Invalid(err),
    }
}

/// 置換結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// 実際に置換したか
    pub replaced: bool,
    /// 置換後に選択した次のマッチ
    pub next: FindOutcome,
}

/// 選択中のマッチを置換して次のマッチへ進む
///
/// 選択範囲がちょうどマッチ1件と一致する場合のみ置換する。
/// そうでなければ置換せず、次のマッチを選択するだけにとどめる。
pub fn replace_in_buffer(
    buffer: &mut TextBuffer,
    query: &SearchQuery,
    replacement: &str,
) -> ReplaceOutcome {
    let matches = match find_all(buffer.as_str(), query) {
        Ok(matches) => matches,
        Err(err) => {
            return ReplaceOutcome {
                replaced: false,
                next: FindOutcome::Invalid(err),
            }
        }
    };

    let selection = buffer.selection();
    let selected = !selection.is_empty()
        && matches
            .iter()
            .any(|m| m.start == selection.start && m.end == selection.end);

    if selected {
        buffer.replace_range(selection.start, selection.end, replacement);
    }

    ReplaceOutcome {
        replaced: selected,
        next: find_in_buffer(buffer, query),
    }
}
