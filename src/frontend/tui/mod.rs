//! ターミナルフロントエンド
//!
//! コントローラーのホスト役。キー入力をメッセージに変換して送り、
//! 積まれたホスト要求（ファイル選択、確認、ウィンドウの生成と破棄）を処理する。
//! ウィンドウは1画面に1つずつ表示し、F6 で切り替える。

mod prompt;
mod render;

pub use prompt::{Prompt, PromptKind, PromptOutcome};
pub use render::Viewport;

use crate::buffer::CursorStatus;
use crate::controller::{Controller, DialogId, HostRequest, Message, WindowId};
use crate::editor::APP_TITLE;
use crate::error::{EditorError, ErrorDisplay, Result, UiError};
use crate::input::{dialog_event, edit_event, Key, KeyCode, MenuAction};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use render::{BottomLine, Screen};
use std::collections::{HashMap, VecDeque};
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

/// フォーカス対象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Window(WindowId),
    Dialog(DialogId),
}

pub struct TuiApplication {
    controller: Controller,
    /// 作成順のウィンドウ
    windows: Vec<WindowId>,
    dialog_parents: HashMap<DialogId, WindowId>,
    focus: Option<Focus>,
    titles: HashMap<WindowId, String>,
    statuses: HashMap<WindowId, CursorStatus>,
    viewports: HashMap<WindowId, Viewport>,
    prompts: VecDeque<Prompt>,
    message: Option<ErrorDisplay>,
    menu_summary: String,
    running: bool,
}

impl TuiApplication {
    pub fn new(controller: Controller) -> Self {
        let menu_summary = controller.menu().summary();
        Self {
            controller,
            windows: Vec::new(),
            dialog_parents: HashMap::new(),
            focus: None,
            titles: HashMap::new(),
            statuses: HashMap::new(),
            viewports: HashMap::new(),
            prompts: VecDeque::new(),
            message: None,
            menu_summary,
            running: true,
        }
    }

    /// 起動時のウィンドウを用意（ファイルごとに1ウィンドウ、なければ空を1つ）
    pub fn open_initial(&mut self, files: &[PathBuf]) {
        if files.is_empty() {
            self.controller.create_window();
        }
        for path in files {
            let window = self.controller.create_window();
            self.controller.post(Message::Open {
                window,
                paths: vec![path.clone()],
            });
        }
        self.controller.run_until_idle();
        self.process_host_requests();
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn active_prompt(&self) -> Option<&Prompt> {
        self.prompts.front()
    }

    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal =
            Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal
            .show_cursor()
            .map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            if self.message.as_ref().is_some_and(ErrorDisplay::is_expired) {
                self.message = None;
            }
            self.render(terminal)?;

            if event::poll(Duration::from_millis(100)).map_err(|err| terminal_error("event poll", err))? {
                match event::read().map_err(|err| terminal_error("event read", err))? {
                    Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                        self.handle_key(Key::from(key_event));
                    }
                    Event::Paste(text) => self.handle_paste(text),
                    Event::Key(_) | Event::Resize(_, _) => {}
                    Event::Mouse(_) | Event::FocusGained | Event::FocusLost => {}
                }
            }
        }

        Ok(())
    }

    fn render<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let Some(window) = self.displayed_window() else {
            return Ok(());
        };
        let Some(view) = self.controller.window(window) else {
            return Ok(());
        };

        let title = self
            .titles
            .get(&window)
            .cloned()
            .unwrap_or_else(|| view.title());
        let status = self
            .statuses
            .get(&window)
            .copied()
            .unwrap_or_else(|| view.status());
        let position = (
            self.windows.iter().position(|w| *w == window).map_or(1, |i| i + 1),
            self.windows.len(),
        );
        let dialog_id = match self.focus {
            Some(Focus::Dialog(dialog)) => Some(dialog),
            _ => self.controller.dialogs_for(window).last().copied(),
        };
        let dialog = dialog_id.and_then(|id| self.controller.dialog(id));
        let bottom = match (self.prompts.front(), &self.message) {
            (Some(prompt), _) => BottomLine::Prompt(prompt),
            (None, Some(message)) => BottomLine::Message(message),
            (None, None) => BottomLine::Menu(&self.menu_summary),
        };
        let screen = Screen {
            view,
            title: &title,
            status,
            position,
            dialog,
            dialog_focused: matches!(self.focus, Some(Focus::Dialog(_))),
            bottom,
        };

        let viewport = self.viewports.entry(window).or_default();
        terminal
            .draw(|frame| render::draw(frame, &screen, viewport))
            .map_err(|err| terminal_error("render", err))?;
        Ok(())
    }

    /// 表示するウィンドウ（フォーカス中のダイアログなら親）
    fn displayed_window(&self) -> Option<WindowId> {
        match self.focus? {
            Focus::Window(window) => Some(window),
            Focus::Dialog(dialog) => self.dialog_parents.get(&dialog).copied(),
        }
    }

    /// キー入力を処理
    pub fn handle_key(&mut self, key: Key) {
        if let Some(prompt) = self.prompts.front_mut() {
            match prompt.handle_key(&key) {
                PromptOutcome::Pending => return,
                PromptOutcome::Cancelled => {
                    self.prompts.pop_front();
                }
                PromptOutcome::Done(message) => {
                    self.prompts.pop_front();
                    self.send(message);
                }
            }
            return;
        }

        let Some(window) = self.displayed_window() else {
            return;
        };
        let action = self.controller.menu().lookup(&key);

        // ウィンドウ切り替えと終了はどこにフォーカスがあっても効く
        match action {
            Some(MenuAction::NextWindow) => {
                self.cycle_focus();
                return;
            }
            Some(MenuAction::Exit) => {
                self.send(Message::Quit);
                return;
            }
            _ => {}
        }

        if let Some(Focus::Dialog(dialog)) = self.focus {
            if let Some(event) = dialog_event(&key) {
                self.send(Message::DialogInput { dialog, event });
                return;
            }
        }

        if let Some(message) = action.and_then(|action| action.message(window)) {
            self.send(message);
            return;
        }

        if self.focus == Some(Focus::Window(window)) {
            if let Some(event) = edit_event(&key) {
                self.send(Message::Edit { window, event });
            } else if key.code == KeyCode::Esc {
                // 閉じずに残っているダイアログへ戻る
                if let Some(dialog) = self.controller.dialogs_for(window).last() {
                    self.focus = Some(Focus::Dialog(*dialog));
                }
            }
        }
    }

    fn handle_paste(&mut self, text: String) {
        if let Some(Focus::Window(window)) = self.focus {
            if self.prompts.is_empty() {
                self.send(Message::Edit {
                    window,
                    event: crate::editor::ViewEvent::InsertText(text),
                });
            }
        }
    }

    /// ウィンドウとそのダイアログを順に巡回
    fn cycle_focus(&mut self) {
        let mut order = Vec::new();
        for window in &self.windows {
            order.push(Focus::Window(*window));
            for dialog in self.controller.dialogs_for(*window) {
                order.push(Focus::Dialog(dialog));
            }
        }
        if order.is_empty() {
            return;
        }
        let next = self
            .focus
            .and_then(|focus| order.iter().position(|f| *f == focus))
            .map_or(0, |i| (i + 1) % order.len());
        self.focus = Some(order[next]);
        self.sync_terminal_title();
    }

    /// メッセージを送り、ホスト要求を処理
    pub fn send(&mut self, message: Message) {
        self.controller.dispatch(message);
        self.process_host_requests();
    }

    fn process_host_requests(&mut self) {
        for request in self.controller.take_host_requests() {
            log::debug!("host request: {:?}", request);
            match request {
                HostRequest::WindowCreated(window) => {
                    self.windows.push(window);
                    self.focus = Some(Focus::Window(window));
                }
                HostRequest::WindowDestroyed(window) => {
                    self.windows.retain(|w| *w != window);
                    self.titles.remove(&window);
                    self.statuses.remove(&window);
                    self.viewports.remove(&window);
                    self.prompts.retain(|prompt| !prompt_targets(prompt, window));
                    if self.displayed_window() == Some(window) || self.focus.is_none() {
                        self.focus = self.windows.first().copied().map(Focus::Window);
                    }
                }
                HostRequest::DialogOpened { dialog, parent, .. } => {
                    self.dialog_parents.insert(dialog, parent);
                    self.focus = Some(Focus::Dialog(dialog));
                }
                HostRequest::DialogClosed(dialog) => {
                    let parent = self.dialog_parents.remove(&dialog);
                    if self.focus == Some(Focus::Dialog(dialog)) {
                        self.focus = parent
                            .filter(|window| self.windows.contains(window))
                            .or_else(|| self.windows.first().copied())
                            .map(Focus::Window);
                    }
                }
                HostRequest::SetTitle { window, title } => {
                    self.titles.insert(window, title);
                }
                HostRequest::StatusChanged { window, status } => {
                    self.statuses.insert(window, status);
                }
                HostRequest::PickOpenPath { window, start_dir } => self
                    .prompts
                    .push_back(Prompt::new(PromptKind::OpenFile { window }, start_dir)),
                HostRequest::PickSavePath { window, start_dir } => self
                    .prompts
                    .push_back(Prompt::new(PromptKind::SaveFile { window }, start_dir)),
                HostRequest::PickDirectory { dialog, start_dir } => self
                    .prompts
                    .push_back(Prompt::new(PromptKind::Directory { dialog }, start_dir)),
                HostRequest::ConfirmClose { window, file_name } => {
                    self.focus = Some(Focus::Window(window));
                    self.prompts.push_back(Prompt::new(
                        PromptKind::ConfirmClose { window, file_name },
                        None,
                    ));
                }
                HostRequest::ShowError { error, .. } => {
                    self.message = Some(ErrorDisplay::new(&error));
                }
                HostRequest::Quit => {
                    log::info!("all windows closed, quitting");
                    self.running = false;
                }
            }
        }
        self.sync_terminal_title();
    }

    fn sync_terminal_title(&self) {
        // テスト中は端末がないので実行中のみ
        if !crossterm::terminal::is_raw_mode_enabled().unwrap_or(false) {
            return;
        }
        let title = self
            .displayed_window()
            .and_then(|window| self.titles.get(&window))
            .map(String::as_str)
            .unwrap_or(APP_TITLE);
        let _ = execute!(stdout(), SetTitle(title));
    }
}

fn prompt_targets(prompt: &Prompt, window: WindowId) -> bool {
    match prompt.kind() {
        PromptKind::OpenFile { window: w }
        | PromptKind::SaveFile { window: w }
        | PromptKind::ConfirmClose { window: w, .. } => *w == window,
        PromptKind::Directory { .. } => false,
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| terminal_error("enable raw mode", err))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen).map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, LeaveAlternateScreen).map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> EditorError {
    EditorError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}
