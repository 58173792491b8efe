//! 検索関連の共通型

use crate::error::SearchError;

/// 検索モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// 文字列をそのまま探す（既定）
    #[default]
    Literal,
    /// 正規表現として解釈する
    Regex,
}

/// 検索要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub mode: SearchMode,
}

impl SearchQuery {
    /// リテラル検索
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: SearchMode::Literal,
        }
    }

    /// 正規表現検索
    pub fn regex(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: SearchMode::Regex,
        }
    }
}

/// 1件の検索マッチ情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// マッチ開始位置（文字インデックス）
    pub start: usize,
    /// マッチ終了位置（文字インデックス、排他的）
    pub end: usize,
}

impl SearchMatch {
    /// マッチ長（文字数）
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// マッチが空か判定
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// 検索結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindResult {
    /// 報告したマッチの開始位置
    pub start: usize,
    /// 報告したマッチの終了位置（排他的）
    pub end: usize,
    /// 全マッチ中の順番（1ベース）
    pub match_num: usize,
    /// バッファ全体のマッチ数
    pub total_matches: usize,
    /// 末尾から先頭へ折り返したか
    pub wrapped: bool,
}

/// 検索ダイアログへ返す結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindOutcome {
    /// マッチあり
    Found(FindResult),
    /// マッチなし
    NotFound,
    /// 検索語が不正（正規表現モードのみ）
    Invalid(SearchError),
}

impl FindOutcome {
    /// ダイアログに表示する件数テキスト
    pub fn totals_text(&self) -> String {
        match self {
            FindOutcome::Found(result) => {
                format!("{} of {}", result.match_num, result.total_matches)
            }
            FindOutcome::NotFound => "No matches".to_string(),
            FindOutcome::Invalid(err) => err.to_string(),
        }
    }
}

/// 検索ダイアログ側で保持する状態（要求ごとに丸ごと更新）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub search_text: String,
    /// 直近に報告されたマッチの順番（なければ 0）
    pub match_index: usize,
    pub match_count: usize,
}

impl SearchState {
    /// 結果を反映
    pub fn apply(&mut self, search_text: &str, outcome: &FindOutcome) {
        self.search_text = search_text.to_string();
        match outcome {
            FindOutcome::Found(result) => {
                self.match_index = result.match_num;
                self.match_count = result.total_matches;
            }
            FindOutcome::NotFound | FindOutcome::Invalid(_) => {
                self.match_index = 0;
                self.match_count = 0;
            }
        }
    }
}
