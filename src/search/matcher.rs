//! 検索用マッチャー

use super::types::SearchMatch;
use crate::buffer::byte_to_char;
use crate::error::search::Result;
use regex::RegexBuilder;

/// 文字列マッチング戦略
pub trait StringMatcher {
    /// 文字列内のすべてのマッチを返す（重なりなし、先頭から順）
    fn find_matches(&self, text: &str, pattern: &str) -> Result<Vec<SearchMatch>>;
}

/// 大文字小文字を区別しないリテラルマッチャー
///
/// 検索語に含まれる記号はすべて文字どおりに扱う。
#[derive(Debug, Default, Clone)]
pub struct LiteralMatcher;

impl LiteralMatcher {
    /// インスタンスを作成
    pub fn new() -> Self {
        Self
    }
}

impl StringMatcher for LiteralMatcher {
    fn find_matches(&self, text: &str, pattern: &str) -> Result<Vec<SearchMatch>> {
        let chars: Vec<char> = text.chars().collect();
        let pattern_chars: Vec<char> = pattern.chars().collect();

        if pattern_chars.is_empty() || pattern_chars.len() > chars.len() {
            return Ok(Vec::new());
        }

        let last_start = chars.len() - pattern_chars.len();
        let mut matches = Vec::new();
        let mut start = 0;

        while start <= last_start {
            let hit = pattern_chars
                .iter()
                .enumerate()
                .all(|(offset, pat_ch)| chars_equal(chars[start + offset], *pat_ch));

            if hit {
                let end = start + pattern_chars.len();
                matches.push(SearchMatch { start, end });
                start = end;
            } else {
                start += 1;
            }
        }

        Ok(matches)
    }
}

fn chars_equal(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    // Unicodeケースフォールディング（簡易）
    a.to_lowercase().eq(b.to_lowercase())
}

/// 正規表現マッチャー（大文字小文字を区別しない）
#[derive(Debug, Default, Clone)]
pub struct RegexMatcher;

impl RegexMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl StringMatcher for RegexMatcher {
    fn find_matches(&self, text: &str, pattern: &str) -> Result<Vec<SearchMatch>> {
        if pattern.is_empty() {
            return Ok(Vec::new());
        }

        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;

        // 空マッチはカーソル移動できないので除外
        let matches = regex
            .find_iter(text)
            .filter(|m| !m.as_str().is_empty())
            .map(|m| SearchMatch {
                start: byte_to_char(text, m.start()),
                end: byte_to_char(text, m.end()),
            })
            .collect();

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_basic_matches() {
        let matcher = LiteralMatcher::new();
        let result = matcher.find_matches("hello world hello", "hello").unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].start, 0);
        assert_eq!(result[1].start, 12);
    }

    #[test]
    fn literal_is_case_insensitive() {
        let matcher = LiteralMatcher::new();
        let result = matcher.find_matches("Hello HELLO", "hello").unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn literal_matches_do_not_overlap() {
        let matcher = LiteralMatcher::new();
        let result = matcher.find_matches("aaaa", "aa").unwrap();
        assert_eq!(
            result,
            vec![
                SearchMatch { start: 0, end: 2 },
                SearchMatch { start: 2, end: 4 }
            ]
        );
    }

    #[test]
    fn literal_treats_metacharacters_literally() {
        let matcher = LiteralMatcher::new();
        let result = matcher.find_matches("f(x) = a.b", "(").unwrap();
        assert_eq!(result, vec![SearchMatch { start: 1, end: 2 }]);
        assert!(matcher.find_matches("abc", ".").unwrap().is_empty());
    }

    #[test]
    fn returns_empty_for_empty_pattern() {
        let matcher = LiteralMatcher::new();
        assert!(matcher.find_matches("abc", "").unwrap().is_empty());
        assert!(matcher.find_matches("ab", "abc").unwrap().is_empty());
    }

    #[test]
    fn regex_offsets_are_characters() {
        let matcher = RegexMatcher::new();
        let result = matcher.find_matches("日本 cat CAT", "c.t").unwrap();
        assert_eq!(
            result,
            vec![
                SearchMatch { start: 3, end: 6 },
                SearchMatch { start: 7, end: 10 }
            ]
        );
    }

    #[test]
    fn regex_invalid_pattern_is_error() {
        let matcher = RegexMatcher::new();
        assert!(matcher.find_matches("abc", "(").is_err());
    }

    #[test]
    fn regex_skips_empty_matches() {
        let matcher = RegexMatcher::new();
        assert!(matcher.find_matches("abc", "x*").unwrap().is_empty());
    }
}
