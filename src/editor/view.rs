//! エディタビュー
//!
//! 1ウィンドウ分の編集状態。イベントを受けて状態を更新し、必要な副作用を返す。
//! ファイルI/Oは副作用として外へ出し、完了は `Loaded` / `Saved` で戻ってくる。

use super::events::{ViewEffect, ViewEvent};
use crate::buffer::{indent, CursorStatus, TextBuffer};
use crate::error::{file, EditorError};
use crate::options::EditorOptions;
use crate::search::{self, FindOutcome};
use std::path::{Path, PathBuf};

/// タイトルの接頭辞
pub const APP_TITLE: &str = "Charge Edit";

/// エディタビュー
#[derive(Debug, Clone)]
pub struct EditorView {
    buffer: TextBuffer,
    current_path: Option<PathBuf>,
    dirty: bool,
    /// 読み込み待ちのパス（Some の間は読み取り専用）
    loading: Option<PathBuf>,
    options: EditorOptions,
}

impl EditorView {
    /// 空のビューを作成
    pub fn new(options: EditorOptions) -> Self {
        Self {
            buffer: TextBuffer::new(),
            current_path: None,
            dirty: false,
            loading: None,
            options,
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_read_only(&self) -> bool {
        self.loading.is_some()
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn status(&self) -> CursorStatus {
        self.buffer.status()
    }

    /// ウィンドウタイトル
    pub fn title(&self) -> String {
        let name = self
            .current_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "Untitled".to_string());
        let marker = if self.dirty { "*" } else { "" };
        format!("{} - {}{}", APP_TITLE, name, marker)
    }

    /// 変更フラグを立てる。未変更から変更ありに変わった時だけ true
    pub fn mark_dirty(&mut self) -> bool {
        if self.dirty {
            return false;
        }
        self.dirty = true;
        true
    }

    /// イベント処理
    pub fn handle(&mut self, event: ViewEvent) -> Vec<ViewEffect> {
        if self.loading.is_some() && event.is_mutating() {
            log::debug!("ignoring {} while a load is pending", event_name(&event));
            return Vec::new();
        }

        let mut effects = Vec::new();
        match event {
            ViewEvent::New => self.on_new(&mut effects),
            ViewEvent::Open(paths) => self.on_open(paths, &mut effects),
            ViewEvent::Loaded { path, result } => self.on_loaded(path, result, &mut effects),
            ViewEvent::Save => self.on_save(&mut effects),
            ViewEvent::SaveAs(path) => self.write_to(path, &mut effects),
            ViewEvent::Saved { path, result } => self.on_saved(path, result, &mut effects),
            ViewEvent::InsertText(text) => {
                self.buffer.replace_selection(&text);
                self.after_edit(&mut effects);
            }
            ViewEvent::Backspace => {
                if indent::backspace(
                    &mut self.buffer,
                    self.options.tab_width,
                    self.options.tab_backspace,
                ) {
                    self.after_edit(&mut effects);
                }
            }
            ViewEvent::Delete => {
                if self.buffer.delete_forward() {
                    self.after_edit(&mut effects);
                }
            }
            ViewEvent::Tab => {
                indent::insert_tab(&mut self.buffer, self.options.tab_width);
                self.after_edit(&mut effects);
            }
            ViewEvent::Enter => {
                indent::newline(
                    &mut self.buffer,
                    self.options.tab_width,
                    self.options.auto_indent,
                );
                self.after_edit(&mut effects);
            }
            ViewEvent::Move(motion) => {
                self.buffer.apply_motion(motion);
                effects.push(ViewEffect::StatusChanged(self.status()));
            }
            ViewEvent::Select { start, end } => {
                self.buffer.set_selection(start, end);
                effects.push(ViewEffect::StatusChanged(self.status()));
            }
            ViewEvent::ExtendSelection(motion) => {
                self.buffer.extend_selection(motion);
                effects.push(ViewEffect::StatusChanged(self.status()));
            }
            ViewEvent::SelectAll => {
                self.buffer.select_all();
                effects.push(ViewEffect::StatusChanged(self.status()));
            }
            ViewEvent::CloseRequested => effects.push(ViewEffect::CloseResponse {
                should_close: !self.dirty,
                path: self.current_path.clone(),
            }),
            ViewEvent::Find { dialog, query } => {
                let outcome = search::find_in_buffer(&mut self.buffer, &query);
                effects.push(ViewEffect::StatusChanged(self.status()));
                report_invalid(&outcome, &mut effects);
                effects.push(ViewEffect::TextFound { dialog, outcome });
            }
            ViewEvent::Replace {
                dialog,
                query,
                replacement,
            } => {
                let outcome = search::replace_in_buffer(&mut self.buffer, &query, &replacement);
                if outcome.replaced && self.mark_dirty() {
                    effects.push(ViewEffect::TitleChanged(self.title()));
                }
                effects.push(ViewEffect::StatusChanged(self.status()));
                report_invalid(&outcome.next, &mut effects);
                effects.push(ViewEffect::TextFound {
                    dialog,
                    outcome: outcome.next,
                });
            }
        }
        effects
    }

    fn on_new(&mut self, effects: &mut Vec<ViewEffect>) {
        self.buffer.clear();
        self.current_path = None;
        self.dirty = false;
        self.loading = None;
        effects.push(ViewEffect::TitleChanged(self.title()));
        effects.push(ViewEffect::StatusChanged(self.status()));
    }

    fn on_open(&mut self, paths: Vec<PathBuf>, effects: &mut Vec<ViewEffect>) {
        let Some(path) = paths.into_iter().next() else {
            return;
        };
        log::info!("opening {}", path.display());
        self.loading = Some(path.clone());
        effects.push(ViewEffect::ReadFile {
            path,
            encoding: self.options.encoding,
        });
    }

    fn on_loaded(
        &mut self,
        path: PathBuf,
        result: file::Result<String>,
        effects: &mut Vec<ViewEffect>,
    ) {
        if self.loading.as_ref() != Some(&path) {
            log::debug!("dropping stale load result for {}", path.display());
            return;
        }
        self.loading = None;

        match result {
            Ok(text) => {
                self.buffer.replace_all(text);
                self.current_path = Some(path);
                self.dirty = false;
                effects.push(ViewEffect::TitleChanged(self.title()));
                effects.push(ViewEffect::StatusChanged(self.status()));
            }
            Err(err) => {
                log::warn!("failed to open {}: {}", path.display(), err);
                effects.push(ViewEffect::Error(EditorError::File(err)));
            }
        }
    }

    fn on_save(&mut self, effects: &mut Vec<ViewEffect>) {
        match self.current_path.clone() {
            Some(path) => self.write_to(path, effects),
            None => effects.push(ViewEffect::RequestSavePath),
        }
    }

    fn write_to(&mut self, path: PathBuf, effects: &mut Vec<ViewEffect>) {
        effects.push(ViewEffect::WriteFile {
            path,
            contents: self.buffer.as_str().to_string(),
            encoding: self.options.encoding,
        });
    }

    fn on_saved(&mut self, path: PathBuf, result: file::Result<()>, effects: &mut Vec<ViewEffect>) {
        match result {
            Ok(()) => {
                log::info!("saved {}", path.display());
                self.current_path = Some(path);
                self.dirty = false;
                effects.push(ViewEffect::TitleChanged(self.title()));
            }
            Err(err) => {
                log::warn!("failed to save {}: {}", path.display(), err);
                effects.push(ViewEffect::Error(EditorError::File(err)));
            }
        }
    }

    fn after_edit(&mut self, effects: &mut Vec<ViewEffect>) {
        if self.mark_dirty() {
            effects.push(ViewEffect::TitleChanged(self.title()));
        }
        effects.push(ViewEffect::StatusChanged(self.status()));
    }
}

impl Default for EditorView {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}

/// 不正な検索語はステータス行にも出す
fn report_invalid(outcome: &FindOutcome, effects: &mut Vec<ViewEffect>) {
    if let FindOutcome::Invalid(err) = outcome {
        effects.push(ViewEffect::Error(EditorError::Search(err.clone())));
    }
}

fn event_name(event: &ViewEvent) -> &'static str {
    match event {
        ViewEvent::InsertText(_) => "insert",
        ViewEvent::Backspace => "backspace",
        ViewEvent::Delete => "delete",
        ViewEvent::Tab => "tab",
        ViewEvent::Enter => "enter",
        ViewEvent::Replace { .. } => "replace",
        ViewEvent::Save => "save",
        ViewEvent::SaveAs(_) => "save-as",
        ViewEvent::Open(_) => "open",
        _ => "event",
    }
}
