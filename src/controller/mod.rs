//! コントローラー
//!
//! ウィンドウとダイアログを所有し、メッセージを順に配送する。
//! ビューの副作用（ファイルI/Oなど）を実行し、完了はメッセージとしてキューへ戻す。
//! ホストが表示すべきもの（ファイル選択、確認など）は `HostRequest` として積む。

mod message;

pub use message::{CloseChoice, DialogId, HostRequest, Message, WindowId};

use crate::dialog::{Dialog, DialogBinding, DialogEvent, DialogKind, DocsPathDialog};
use crate::editor::{EditorView, ViewEffect, ViewEvent};
use crate::error::EditorError;
use crate::file;
use crate::input::keymap::Menu;
use crate::options::EditorOptions;
use crate::prefs::{self, DocsDir, PreferenceStore};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// アプリケーションのコントローラー
pub struct Controller {
    windows: BTreeMap<WindowId, EditorView>,
    dialogs: BTreeMap<DialogId, Dialog>,
    queue: VecDeque<Message>,
    outbox: Vec<HostRequest>,
    next_id: u32,
    prefs: PreferenceStore,
    options: EditorOptions,
    menu: Menu,
    /// 保存が成功したら閉じるウィンドウ
    close_after_save: HashSet<WindowId>,
    quitting: bool,
}

impl Controller {
    pub fn new(options: EditorOptions, prefs: PreferenceStore) -> Self {
        let controller = Self {
            windows: BTreeMap::new(),
            dialogs: BTreeMap::new(),
            queue: VecDeque::new(),
            outbox: Vec::new(),
            next_id: 1,
            prefs,
            options,
            menu: Menu::new(),
            close_after_save: HashSet::new(),
            quitting: false,
        };
        controller.init_directory();
        controller
    }

    /// 既定のドキュメントフォルダを用意（失敗しても続行）
    fn init_directory(&self) {
        if *self.prefs.docs_dir() != DocsDir::Default {
            return;
        }
        if let Some(dir) = prefs::default_docs_dir() {
            if let Err(err) = file::ensure_dir(&dir) {
                log::warn!("unable to create directory at {}: {}", dir.display(), err);
            }
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.prefs
    }

    /// ファイル選択の初期フォルダ
    pub fn docs_dir(&self) -> Option<PathBuf> {
        self.prefs.resolve_docs_dir()
    }

    pub fn window(&self, id: WindowId) -> Option<&EditorView> {
        self.windows.get(&id)
    }

    pub fn window_ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn dialog(&self, id: DialogId) -> Option<&Dialog> {
        self.dialogs.get(&id)
    }

    /// 指定ウィンドウに紐づくダイアログ
    pub fn dialogs_for(&self, window: WindowId) -> Vec<DialogId> {
        self.dialogs
            .iter()
            .filter(|(_, dialog)| dialog.binding().map(|b| b.parent) == Some(window))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// 空のウィンドウを作成
    pub fn create_window(&mut self) -> WindowId {
        let id = WindowId(self.allocate_id());
        let view = EditorView::new(self.options);
        let title = view.title();
        self.windows.insert(id, view);
        log::info!("created {}", id);
        self.outbox.push(HostRequest::WindowCreated(id));
        self.outbox.push(HostRequest::SetTitle { window: id, title });
        id
    }

    /// メッセージをキューに積む
    pub fn post(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    /// メッセージを積んでキューが空になるまで処理
    pub fn dispatch(&mut self, message: Message) {
        self.post(message);
        self.run_until_idle();
    }

    /// キューを空になるまで処理
    pub fn run_until_idle(&mut self) {
        while let Some(message) = self.queue.pop_front() {
            self.handle(message);
        }
    }

    /// ホストへの要求を取り出す
    pub fn take_host_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.outbox)
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::NewWindow => {
                self.create_window();
            }
            Message::New { window } => self.deliver(window, ViewEvent::New),
            Message::ShowOpenDialog { window } => {
                if self.windows.contains_key(&window) {
                    let start_dir = self.docs_dir();
                    self.outbox
                        .push(HostRequest::PickOpenPath { window, start_dir });
                }
            }
            Message::Open { window, paths } => self.deliver(window, ViewEvent::Open(paths)),
            Message::Save { window } => {
                // 確認ダイアログ由来でない保存は閉じる予約を引き継がない
                self.abandon_close(window);
                self.deliver(window, ViewEvent::Save);
            }
            Message::ShowSaveAsDialog { window } => {
                self.abandon_close(window);
                self.post(Message::OpenSaveDialog { window });
            }
            Message::OpenSaveDialog { window } => {
                if self.windows.contains_key(&window) {
                    let start_dir = self.docs_dir();
                    self.outbox
                        .push(HostRequest::PickSavePath { window, start_dir });
                }
            }
            Message::SaveAs { window, path } => self.deliver(window, ViewEvent::SaveAs(path)),
            Message::SaveCancelled { window } => self.abandon_close(window),
            Message::Loaded {
                window,
                path,
                result,
            } => self.deliver(window, ViewEvent::Loaded { path, result }),
            Message::Saved {
                window,
                path,
                result,
            } => {
                let succeeded = result.is_ok();
                self.deliver(window, ViewEvent::Saved { path, result });
                if self.close_after_save.remove(&window) && succeeded {
                    self.destroy_window(window);
                }
            }
            Message::CloseRequested { window } => {
                self.close_after_save.remove(&window);
                self.deliver(window, ViewEvent::CloseRequested);
            }
            Message::ConfirmClose {
                window,
                close,
                file_path,
            } => {
                if close {
                    self.destroy_window(window);
                } else if self.windows.contains_key(&window) {
                    let file_name = display_name(file_path.as_deref());
                    self.outbox
                        .push(HostRequest::ConfirmClose { window, file_name });
                }
            }
            Message::CloseChoice { window, choice } => self.on_close_choice(window, choice),
            Message::ShowFind { window } => self.open_dialog(window, DialogKind::Find),
            Message::ShowReplace { window } => self.open_dialog(window, DialogKind::Replace),
            Message::ShowDocsPath { window } => self.open_dialog(window, DialogKind::DocsPath),
            Message::Find {
                dialog,
                window,
                query,
            } => {
                if self.windows.contains_key(&window) {
                    self.deliver(window, ViewEvent::Find { dialog, query });
                } else {
                    self.parent_missing(dialog, window);
                }
            }
            Message::Replace {
                dialog,
                window,
                query,
                replacement,
            } => {
                if self.windows.contains_key(&window) {
                    self.deliver(
                        window,
                        ViewEvent::Replace {
                            dialog,
                            query,
                            replacement,
                        },
                    );
                } else {
                    self.parent_missing(dialog, window);
                }
            }
            Message::TextFound { dialog, outcome } => {
                self.deliver_dialog(dialog, DialogEvent::TextFound(outcome))
            }
            Message::OpenSysDirDialog { dialog } => {
                if self.dialogs.contains_key(&dialog) {
                    let start_dir = self.docs_dir();
                    self.outbox
                        .push(HostRequest::PickDirectory { dialog, start_dir });
                }
            }
            Message::DirectoryPicked { dialog, path } => {
                self.deliver_dialog(dialog, DialogEvent::DirectoryPicked(path))
            }
            Message::SetDocsPath { dialog, docs_dir } => self.set_docs_path(dialog, docs_dir),
            Message::CloseDialog(dialog) => self.close_dialog(dialog),
            Message::Quit => {
                self.quitting = true;
                if self.windows.is_empty() {
                    self.outbox.push(HostRequest::Quit);
                    return;
                }
                for window in self.window_ids() {
                    self.post(Message::CloseRequested { window });
                }
            }
            Message::Edit { window, event } => self.deliver(window, event),
            Message::DialogInput { dialog, event } => self.deliver_dialog(dialog, event),
        }
    }

    /// ビューへイベントを届け、副作用を処理
    fn deliver(&mut self, window: WindowId, event: ViewEvent) {
        let Some(view) = self.windows.get_mut(&window) else {
            log::warn!("dropping message for unknown {}", window);
            return;
        };
        let effects = view.handle(event);
        for effect in effects {
            self.apply_effect(window, effect);
        }
    }

    fn apply_effect(&mut self, window: WindowId, effect: ViewEffect) {
        match effect {
            ViewEffect::TitleChanged(title) => {
                self.outbox.push(HostRequest::SetTitle { window, title })
            }
            ViewEffect::StatusChanged(status) => {
                self.outbox.push(HostRequest::StatusChanged { window, status })
            }
            ViewEffect::RequestSavePath => self.post(Message::OpenSaveDialog { window }),
            ViewEffect::ReadFile { path, encoding } => {
                let result = file::read_text(&path, encoding);
                self.post(Message::Loaded {
                    window,
                    path,
                    result,
                });
            }
            ViewEffect::WriteFile {
                path,
                contents,
                encoding,
            } => {
                let result = file::write_text(&path, &contents, encoding);
                self.post(Message::Saved {
                    window,
                    path,
                    result,
                });
            }
            ViewEffect::CloseResponse { should_close, path } => {
                self.post(Message::ConfirmClose {
                    window,
                    close: should_close,
                    file_path: path,
                })
            }
            ViewEffect::TextFound { dialog, outcome } => {
                self.post(Message::TextFound { dialog, outcome })
            }
            ViewEffect::Error(error) => self.outbox.push(HostRequest::ShowError {
                window: Some(window),
                error,
            }),
        }
    }

    fn deliver_dialog(&mut self, dialog: DialogId, event: DialogEvent) {
        let Some(target) = self.dialogs.get_mut(&dialog) else {
            log::debug!("dropping event for closed {}", dialog);
            return;
        };
        for message in target.handle(event) {
            self.post(message);
        }
    }

    fn parent_missing(&mut self, dialog: DialogId, window: WindowId) {
        log::error!("{} addressed unknown parent {}", dialog, window);
        self.deliver_dialog(dialog, DialogEvent::ParentMissing);
    }

    fn on_close_choice(&mut self, window: WindowId, choice: CloseChoice) {
        match choice {
            CloseChoice::Save => {
                self.close_after_save.insert(window);
                self.deliver(window, ViewEvent::Save);
            }
            CloseChoice::DontSave => self.destroy_window(window),
            CloseChoice::Cancel => {
                log::debug!("close of {} cancelled", window);
                self.quitting = false;
            }
        }
    }

    /// 保存後に閉じる予約を取り消す
    fn abandon_close(&mut self, window: WindowId) {
        if self.close_after_save.remove(&window) {
            log::debug!("save-then-close of {} abandoned", window);
            self.quitting = false;
        }
    }

    fn open_dialog(&mut self, window: WindowId, kind: DialogKind) {
        if !self.windows.contains_key(&window) {
            log::warn!("cannot open {:?} dialog for unknown {}", kind, window);
            return;
        }

        let id = DialogId(self.allocate_id());
        let mut dialog = match kind {
            DialogKind::DocsPath => Dialog::DocsPath(DocsPathDialog::with_current(self.prefs.docs_dir())),
            other => Dialog::new(other),
        };
        dialog.handle(DialogEvent::Shown(DialogBinding {
            dialog: id,
            parent: window,
        }));
        self.dialogs.insert(id, dialog);
        log::debug!("opened {:?} {} for {}", kind, id, window);
        self.outbox.push(HostRequest::DialogOpened {
            dialog: id,
            kind,
            parent: window,
        });
    }

    fn set_docs_path(&mut self, dialog: DialogId, docs_dir: DocsDir) {
        match self.prefs.set_docs_dir(docs_dir) {
            Ok(()) => {
                self.init_directory();
                self.close_dialog(dialog);
            }
            Err(err) => {
                log::warn!("failed to store documents folder: {}", err);
                let window = self
                    .dialogs
                    .get(&dialog)
                    .and_then(|d| d.binding())
                    .map(|b| b.parent);
                self.outbox.push(HostRequest::ShowError {
                    window,
                    error: EditorError::Preferences(err),
                });
            }
        }
    }

    fn close_dialog(&mut self, dialog: DialogId) {
        if self.dialogs.remove(&dialog).is_some() {
            self.outbox.push(HostRequest::DialogClosed(dialog));
        }
    }

    fn destroy_window(&mut self, window: WindowId) {
        if self.windows.remove(&window).is_none() {
            return;
        }
        for dialog in self.dialogs_for(window) {
            self.close_dialog(dialog);
        }
        self.close_after_save.remove(&window);
        log::info!("destroyed {}", window);
        self.outbox.push(HostRequest::WindowDestroyed(window));

        if self.windows.is_empty() {
            self.outbox.push(HostRequest::Quit);
        }
    }
}

fn display_name(path: Option<&Path>) -> String {
    path.and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn controller_in(dir: &Path) -> Controller {
        let store = PreferenceStore::load_or_default(dir.join("prefs.json"));
        Controller::new(EditorOptions::default(), store)
    }

    #[test]
    fn ids_are_unique_across_windows_and_dialogs() {
        let dir = tempdir().unwrap();
        let mut controller = controller_in(dir.path());
        let window = controller.create_window();
        controller.dispatch(Message::ShowFind { window });
        let dialog = controller.dialogs_for(window)[0];
        assert_ne!(dialog.0, window.0);
        let second = controller.create_window();
        assert!(second.0 > dialog.0);
    }

    #[test]
    fn display_name_uses_file_name() {
        assert_eq!(display_name(Some(Path::new("/a/b/notes.txt"))), "notes.txt");
        assert_eq!(display_name(None), "Untitled");
    }

    #[test]
    fn message_for_unknown_window_is_dropped() {
        let dir = tempdir().unwrap();
        let mut controller = controller_in(dir.path());
        controller.dispatch(Message::Save {
            window: WindowId(99),
        });
        assert!(controller.take_host_requests().is_empty());
    }

    #[test]
    fn closing_window_closes_its_dialogs() {
        let dir = tempdir().unwrap();
        let mut controller = controller_in(dir.path());
        let window = controller.create_window();
        controller.dispatch(Message::ShowReplace { window });
        let dialog = controller.dialogs_for(window)[0];
        controller.take_host_requests();

        controller.dispatch(Message::CloseRequested { window });
        let requests = controller.take_host_requests();
        assert!(requests.contains(&HostRequest::DialogClosed(dialog)));
        assert!(requests.contains(&HostRequest::WindowDestroyed(window)));
        assert!(requests.contains(&HostRequest::Quit));
        assert!(controller.dialog(dialog).is_none());
    }
}
