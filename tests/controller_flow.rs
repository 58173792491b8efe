//! コントローラー経由のウィンドウ・ファイル・ダイアログの流れ

use charge_edit::controller::{CloseChoice, Controller, DialogId, HostRequest, Message, WindowId};
use charge_edit::dialog::{Dialog, DialogEvent};
use charge_edit::editor::ViewEvent;
use charge_edit::options::EditorOptions;
use charge_edit::prefs::{DocsDir, PreferenceStore};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn controller_in(dir: &Path) -> Controller {
    let store = PreferenceStore::load_or_default(dir.join("prefs.json"));
    Controller::new(EditorOptions::default(), store)
}

fn type_into(controller: &mut Controller, window: WindowId, text: &str) {
    controller.dispatch(Message::Edit {
        window,
        event: ViewEvent::InsertText(text.to_string()),
    });
}

fn type_dialog(controller: &mut Controller, dialog: DialogId, text: &str) {
    for ch in text.chars() {
        controller.dispatch(Message::DialogInput {
            dialog,
            event: DialogEvent::Input(ch),
        });
    }
}

#[test]
fn save_then_open_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("note.txt");
    let mut controller = controller_in(dir.path());

    let first = controller.create_window();
    type_into(&mut controller, first, "line one\n    line two\néè");
    controller.dispatch(Message::SaveAs {
        window: first,
        path: path.clone(),
    });
    assert!(!controller.window(first).unwrap().is_dirty());

    let second = controller.create_window();
    controller.dispatch(Message::Open {
        window: second,
        paths: vec![path.clone()],
    });
    let view = controller.window(second).unwrap();
    assert_eq!(view.text(), "line one\n    line two\néè");
    assert_eq!(view.current_path(), Some(path.as_path()));
    assert!(!view.is_dirty());
}

#[test]
fn save_without_path_asks_host() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path());
    let window = controller.create_window();
    controller.take_host_requests();

    controller.dispatch(Message::Save { window });

    let requests = controller.take_host_requests();
    assert!(requests
        .iter()
        .any(|r| matches!(r, HostRequest::PickSavePath { window: w, .. } if *w == window)));
}

#[test]
fn failed_open_reports_error_and_keeps_buffer() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path());
    let window = controller.create_window();
    type_into(&mut controller, window, "keep me");
    controller.take_host_requests();

    controller.dispatch(Message::Open {
        window,
        paths: vec![dir.path().join("missing.txt")],
    });

    let view = controller.window(window).unwrap();
    assert_eq!(view.text(), "keep me");
    assert!(view.is_dirty());
    assert!(!view.is_read_only());
    assert!(controller
        .take_host_requests()
        .iter()
        .any(|r| matches!(r, HostRequest::ShowError { .. })));
}

#[test]
fn clean_window_closes_without_prompt() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path());
    let keep = controller.create_window();
    let close = controller.create_window();
    controller.take_host_requests();

    controller.dispatch(Message::CloseRequested { window: close });

    let requests = controller.take_host_requests();
    assert_eq!(requests, vec![HostRequest::WindowDestroyed(close)]);
    assert_eq!(controller.window_ids(), vec![keep]);
}

#[test]
fn dirty_window_asks_and_cancel_keeps_it() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path());
    let window = controller.create_window();
    type_into(&mut controller, window, "draft");
    controller.take_host_requests();

    controller.dispatch(Message::CloseRequested { window });
    assert_eq!(
        controller.take_host_requests(),
        vec![HostRequest::ConfirmClose {
            window,
            file_name: "Untitled".to_string(),
        }]
    );

    controller.dispatch(Message::CloseChoice {
        window,
        choice: CloseChoice::Cancel,
    });
    assert!(controller.window(window).is_some());
}

#[test]
fn dont_save_destroys_dirty_window() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path());
    let window = controller.create_window();
    type_into(&mut controller, window, "draft");
    controller.dispatch(Message::CloseRequested { window });
    controller.take_host_requests();

    controller.dispatch(Message::CloseChoice {
        window,
        choice: CloseChoice::DontSave,
    });

    assert!(controller.window(window).is_none());
    let requests = controller.take_host_requests();
    assert!(requests.contains(&HostRequest::WindowDestroyed(window)));
    assert!(requests.contains(&HostRequest::Quit));
}

#[test]
fn save_choice_saves_then_closes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kept.txt");
    fs::write(&path, "old").unwrap();
    let mut controller = controller_in(dir.path());
    let window = controller.create_window();
    controller.dispatch(Message::Open {
        window,
        paths: vec![path.clone()],
    });
    controller.dispatch(Message::Edit {
        window,
        event: ViewEvent::Select { start: 0, end: 3 },
    });
    type_into(&mut controller, window, "new");
    controller.dispatch(Message::CloseRequested { window });
    controller.take_host_requests();

    controller.dispatch(Message::CloseChoice {
        window,
        choice: CloseChoice::Save,
    });

    assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    assert!(controller.window(window).is_none());
}

#[test]
fn save_choice_on_untitled_waits_for_save_path() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path());
    let window = controller.create_window();
    type_into(&mut controller, window, "draft");
    controller.dispatch(Message::CloseRequested { window });
    controller.take_host_requests();

    controller.dispatch(Message::CloseChoice {
        window,
        choice: CloseChoice::Save,
    });

    assert!(controller.window(window).is_some());
    assert!(controller
        .take_host_requests()
        .iter()
        .any(|r| matches!(r, HostRequest::PickSavePath { .. })));

    let path = dir.path().join("draft.txt");
    controller.dispatch(Message::SaveAs {
        window,
        path: path.clone(),
    });
    assert_eq!(fs::read_to_string(&path).unwrap(), "draft");
    assert!(controller.window(window).is_none());
}

fn choose_save_on_untitled(controller: &mut Controller, window: WindowId) {
    type_into(controller, window, "draft");
    controller.dispatch(Message::CloseRequested { window });
    controller.dispatch(Message::CloseChoice {
        window,
        choice: CloseChoice::Save,
    });
    controller.take_host_requests();
}

#[test]
fn cancelled_save_path_keeps_window_after_later_save() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path());
    let window = controller.create_window();
    choose_save_on_untitled(&mut controller, window);

    controller.dispatch(Message::SaveCancelled { window });
    type_into(&mut controller, window, " more");
    controller.dispatch(Message::Save { window });
    let path = dir.path().join("later.txt");
    controller.dispatch(Message::SaveAs {
        window,
        path: path.clone(),
    });

    assert_eq!(fs::read_to_string(&path).unwrap(), "draft more");
    assert!(controller.window(window).is_some());
    assert!(!controller
        .take_host_requests()
        .contains(&HostRequest::WindowDestroyed(window)));
}

#[test]
fn ordinary_save_after_unanswered_picker_keeps_window() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path());
    let window = controller.create_window();
    choose_save_on_untitled(&mut controller, window);

    // 保存先が返らないまま通常の保存をやり直す
    type_into(&mut controller, window, " more");
    controller.dispatch(Message::Save { window });
    controller.dispatch(Message::SaveAs {
        window,
        path: dir.path().join("later.txt"),
    });

    assert!(controller.window(window).is_some());
    assert!(!controller.window(window).unwrap().is_dirty());
}

#[test]
fn failed_save_keeps_window_dirty() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path());
    let window = controller.create_window();
    type_into(&mut controller, window, "draft");

    controller.dispatch(Message::SaveAs {
        window,
        path: dir.path().join("no-such-dir").join("x.txt"),
    });

    let view = controller.window(window).unwrap();
    assert!(view.is_dirty());
    assert_eq!(view.current_path(), None);
}

#[test]
fn quit_closes_clean_windows_and_asks_for_dirty() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path());
    let clean = controller.create_window();
    let dirty = controller.create_window();
    type_into(&mut controller, dirty, "x");
    controller.take_host_requests();

    controller.dispatch(Message::Quit);

    assert!(controller.window(clean).is_none());
    assert!(controller.window(dirty).is_some());
    assert!(controller.is_quitting());
    assert!(controller
        .take_host_requests()
        .iter()
        .any(|r| matches!(r, HostRequest::ConfirmClose { window, .. } if *window == dirty)));
}

#[test]
fn find_dialog_selects_match_in_parent() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path());
    let window = controller.create_window();
    type_into(&mut controller, window, "cat dog cat");
    controller.dispatch(Message::Edit {
        window,
        event: ViewEvent::Select { start: 0, end: 0 },
    });
    controller.dispatch(Message::ShowFind { window });
    let dialog = controller.dialogs_for(window)[0];

    type_dialog(&mut controller, dialog, "CAT");
    controller.dispatch(Message::DialogInput {
        dialog,
        event: DialogEvent::Submit,
    });

    let selection = controller.window(window).unwrap().buffer().selection();
    assert_eq!((selection.start, selection.end), (0, 3));
    match controller.dialog(dialog) {
        Some(Dialog::Find(find)) => assert_eq!(find.totals_text(), "1 of 2"),
        other => panic!("unexpected dialog {:?}", other),
    }
}

#[test]
fn find_for_missing_parent_shows_internal_error() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path());
    let window = controller.create_window();
    controller.dispatch(Message::ShowFind { window });
    let dialog = controller.dialogs_for(window)[0];

    controller.dispatch(Message::Find {
        dialog,
        window: WindowId(999),
        query: charge_edit::search::SearchQuery::literal("x"),
    });

    match controller.dialog(dialog) {
        Some(Dialog::Find(find)) => assert_eq!(find.field(), "Internal Error!"),
        other => panic!("unexpected dialog {:?}", other),
    }
}

#[test]
fn docs_path_dialog_updates_preferences() {
    let dir = tempdir().unwrap();
    let docs = dir.path().join("docs");
    let mut controller = controller_in(dir.path());
    let window = controller.create_window();
    controller.dispatch(Message::ShowDocsPath { window });
    let dialog = controller.dialogs_for(window)[0];

    controller.dispatch(Message::DirectoryPicked {
        dialog,
        path: docs.clone(),
    });
    controller.dispatch(Message::DialogInput {
        dialog,
        event: DialogEvent::Submit,
    });

    assert!(controller.dialog(dialog).is_none());
    assert_eq!(
        controller.preferences().docs_dir(),
        &DocsDir::Custom(docs.clone())
    );
    assert_eq!(controller.docs_dir(), Some(docs));

    let stored = fs::read_to_string(dir.path().join("prefs.json")).unwrap();
    assert!(stored.contains("docsDir"));
}

#[test]
fn browse_asks_host_for_directory() {
    let dir = tempdir().unwrap();
    let mut controller = controller_in(dir.path());
    let window = controller.create_window();
    controller.dispatch(Message::ShowDocsPath { window });
    let dialog = controller.dialogs_for(window)[0];
    controller.take_host_requests();

    controller.dispatch(Message::DialogInput {
        dialog,
        event: DialogEvent::Browse,
    });

    assert!(controller
        .take_host_requests()
        .iter()
        .any(|r| matches!(r, HostRequest::PickDirectory { dialog: d, .. } if *d == dialog)));
}

#[test]
fn corrupt_preferences_are_replaced_with_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    fs::write(&path, "{ not json").unwrap();

    let store = PreferenceStore::load_or_default(&path);

    assert_eq!(store.docs_dir(), &DocsDir::Default);
    let rewritten = fs::read_to_string(&path).unwrap();
    assert!(rewritten.contains("\"docsDir\""));
    assert!(rewritten.contains("\"default\""));
}
