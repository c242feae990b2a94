/// End-to-end tests for `AppState`, the GUI application state machine.
///
/// These drive the real scan worker, content router and document model
/// against a temporary vault without opening a window, so every
/// user-visible transition is covered deterministically:
///   - scan lifecycle, root expansion and initial selection
///   - expansion surviving a rescan, failed scans keeping the old tree
///   - mouse activation and keyboard navigation of the tree
///   - edit / save / window title
///   - theme, path editor, picker results and the mobile layout
use notepane_core::config::Settings;
use notepane_core::Location;
use notepane_gui::keymap::Action;
use notepane_gui::layout::LayoutMode;
use notepane_gui::picker::PickerKind;
use notepane_gui::state::{AppPhase, AppState, StatusKind, TreeKey, APP_NAME};
use notepane_gui::theme::ThemeMode;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn write(path: &Path, text: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

/// `notes/inner.md`, `notes/deeper/d.md`, `a.md`, `b.md`, `skip.txt`.
fn make_vault() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("notes/inner.md"), "# Inner\n");
    write(&tmp.path().join("notes/deeper/d.md"), "deep\n");
    write(&tmp.path().join("a.md"), "# A\n\nalpha\n");
    write(&tmp.path().join("b.md"), "# B\n");
    write(&tmp.path().join("skip.txt"), "not markdown");
    tmp
}

fn key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Pump `process_scan_messages()` until the phase leaves `Scanning`.
fn pump_until_done(state: &mut AppState) {
    let deadline = Instant::now() + Duration::from_secs(30);
    while state.phase == AppPhase::Scanning {
        assert!(
            Instant::now() < deadline,
            "scan did not complete within 30 seconds"
        );
        state.process_scan_messages();
        std::thread::sleep(Duration::from_millis(10));
    }
}

fn scanned(root: &Path) -> AppState {
    let mut state = AppState::new();
    state.open_vault(Location::from_path(root));
    pump_until_done(&mut state);
    state
}

fn row_names(state: &AppState) -> Vec<&str> {
    state.visible_rows.iter().map(|r| r.name.as_str()).collect()
}

fn open_path(state: &AppState) -> Option<&str> {
    state.document.as_ref().map(|d| d.path())
}

// ── Scan lifecycle ────────────────────────────────────────────────────────────

#[test]
fn open_vault_scans_and_shows_root_children() {
    let tmp = make_vault();
    let mut state = AppState::new();
    assert_eq!(state.vault_name(), "No vault");

    state.open_vault(Location::from_path(tmp.path()));
    assert_eq!(state.phase, AppPhase::Scanning);

    pump_until_done(&mut state);
    assert_eq!(state.phase, AppPhase::Ready);
    assert!(state.scan_duration.is_some());
    assert!(state.scan_error.is_none());

    // Root is expanded, directories first, non-markdown pruned.
    assert_eq!(row_names(&state), ["notes", "a.md", "b.md"]);
    let root = state.tree.as_ref().unwrap();
    assert_eq!(state.expanded.get(&root.path), Some(&true));
    assert_eq!(
        state.vault_name(),
        tmp.path().file_name().unwrap().to_string_lossy()
    );

    // First child is a directory: selected, nothing opened.
    assert_eq!(state.selected.as_deref(), Some(key(&tmp.path().join("notes")).as_str()));
    assert!(state.document.is_none());
}

#[test]
fn first_child_file_is_opened() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("b.md"), "# B\n");
    write(&tmp.path().join("a.md"), "# A\n");

    let state = scanned(tmp.path());
    let a = key(&tmp.path().join("a.md"));
    assert_eq!(state.selected.as_deref(), Some(a.as_str()));
    assert_eq!(open_path(&state), Some(a.as_str()));
    assert_eq!(state.window_title(), format!("a.md - {APP_NAME}"));
}

#[test]
fn empty_vault_has_no_rows() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("readme.txt"), "x");

    let state = scanned(tmp.path());
    assert_eq!(state.phase, AppPhase::Ready);
    assert!(state.visible_rows.is_empty());
    assert!(state.selected.is_none());
    assert_eq!(state.window_title(), APP_NAME);
}

#[test]
fn expansion_survives_rescan() {
    let tmp = make_vault();
    let mut state = scanned(tmp.path());
    let notes = key(&tmp.path().join("notes"));

    state.toggle_expand(&notes);
    assert_eq!(row_names(&state), ["notes", "deeper", "inner.md", "a.md", "b.md"]);

    write(&tmp.path().join("c.md"), "new");
    state.rescan();
    pump_until_done(&mut state);

    assert_eq!(
        row_names(&state),
        ["notes", "deeper", "inner.md", "a.md", "b.md", "c.md"]
    );
    assert_eq!(state.selected.as_deref(), Some(notes.as_str()));
}

#[test]
fn failed_rescan_keeps_previous_tree() {
    let tmp = make_vault();
    let mut state = scanned(tmp.path());
    assert_eq!(state.visible_rows.len(), 3);

    let missing = tmp.path().join("gone");
    state.open_vault(Location::from_path(&missing));
    pump_until_done(&mut state);

    assert_eq!(state.phase, AppPhase::Ready);
    assert!(state.scan_error.is_some());
    assert!(state.status.as_ref().unwrap().is_error());
    assert_eq!(state.visible_rows.len(), 3);
}

#[test]
fn failed_first_scan_returns_to_idle() {
    let tmp = TempDir::new().unwrap();
    let mut state = AppState::new();
    state.open_vault(Location::from_path(tmp.path().join("missing")));
    pump_until_done(&mut state);

    assert_eq!(state.phase, AppPhase::Idle);
    assert!(state.tree.is_none());
    assert!(state.status.as_ref().unwrap().text.starts_with("Scan failed"));
}

#[test]
fn unset_vault_is_rejected() {
    let mut state = AppState::new();
    state.open_vault(Location::Unset);
    assert_eq!(state.phase, AppPhase::Idle);
    assert!(state.scan_handle.is_none());
    assert!(state.status.as_ref().unwrap().is_error());
}

#[test]
fn from_settings_applies_theme_and_starts_scan() {
    let tmp = make_vault();
    let settings = Settings {
        vault: Some(Location::from_path(tmp.path())),
        dark_mode: false,
        ..Settings::default()
    };
    let mut state = AppState::from_settings(
        Arc::new(notepane_core::access::ContentRouter::new()),
        &settings,
    );
    assert_eq!(state.theme, ThemeMode::Light);
    assert_eq!(state.phase, AppPhase::Scanning);
    pump_until_done(&mut state);
    assert_eq!(state.visible_rows.len(), 3);
}

// ── Tree interaction ──────────────────────────────────────────────────────────

#[test]
fn activate_toggles_dirs_and_opens_files() {
    let tmp = make_vault();
    let mut state = scanned(tmp.path());
    let notes = key(&tmp.path().join("notes"));
    let inner = key(&tmp.path().join("notes/inner.md"));

    state.activate(&notes);
    assert!(state.tree_focused);
    assert!(state.visible_rows[0].is_expanded);
    assert_eq!(state.visible_rows.len(), 5);

    state.activate(&inner);
    assert_eq!(state.selected.as_deref(), Some(inner.as_str()));
    assert_eq!(state.document.as_ref().unwrap().name(), "inner.md");

    state.activate(&notes);
    assert_eq!(row_names(&state), ["notes", "a.md", "b.md"]);

    // Rows that are not visible are ignored.
    state.activate(&inner);
    assert_eq!(state.selected.as_deref(), Some(notes.as_str()));
}

#[test]
fn keyboard_navigation_moves_selection_and_loads_files() {
    let tmp = make_vault();
    let mut state = scanned(tmp.path());
    let a = key(&tmp.path().join("a.md"));
    let b = key(&tmp.path().join("b.md"));

    state.tree_key(TreeKey::Down);
    assert_eq!(state.selected.as_deref(), Some(a.as_str()));
    assert_eq!(open_path(&state), Some(a.as_str()));

    state.tree_key(TreeKey::Down);
    state.tree_key(TreeKey::Down);
    assert_eq!(state.selected.as_deref(), Some(b.as_str()), "clamped at end");

    state.tree_key(TreeKey::Up);
    state.tree_key(TreeKey::Up);
    assert_eq!(state.visible_rows[0].name, "notes");
    assert_eq!(state.selected.as_deref(), Some(state.visible_rows[0].path.as_str()));
    // Moving onto a directory keeps the open file.
    assert_eq!(open_path(&state), Some(a.as_str()));

    state.tree_key(TreeKey::Expand);
    assert_eq!(state.visible_rows.len(), 5);
    state.tree_key(TreeKey::Collapse);
    assert_eq!(state.visible_rows.len(), 3);
    state.tree_key(TreeKey::Toggle);
    assert_eq!(state.visible_rows.len(), 5);
}

#[test]
fn tree_keys_route_through_actions() {
    let tmp = make_vault();
    let mut state = scanned(tmp.path());
    state.apply_action(Action::Tree(TreeKey::Toggle));
    assert_eq!(state.visible_rows.len(), 5);
    state.apply_action(Action::FocusTree);
    assert!(state.tree_focused);
    state.apply_action(Action::FocusEditor);
    assert!(!state.tree_focused);
}

// ── Editing ───────────────────────────────────────────────────────────────────

#[test]
fn edit_save_updates_disk_and_title() {
    let tmp = make_vault();
    let mut state = scanned(tmp.path());
    let a_path = tmp.path().join("a.md");
    state.select_file(&key(&a_path));
    assert_eq!(state.window_title(), format!("a.md - {APP_NAME}"));

    state.toggle_edit();
    assert!(state.document.as_ref().unwrap().is_editing());
    *state.document.as_mut().unwrap().buffer_mut() = "# Changed\n".to_string();

    state.toggle_edit();
    let doc = state.document.as_ref().unwrap();
    assert!(doc.is_dirty());
    assert_eq!(doc.content(), "# Changed\n");
    assert_eq!(state.window_title(), format!("a.md* - {APP_NAME}"));
    // Nothing written until saved.
    assert_eq!(fs::read_to_string(&a_path).unwrap(), "# A\n\nalpha\n");

    state.save();
    assert_eq!(fs::read_to_string(&a_path).unwrap(), "# Changed\n");
    assert_eq!(state.window_title(), format!("a.md - {APP_NAME}"));
    assert!(state.document.as_ref().unwrap().last_saved().is_some());
    let status = state.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Success);
    assert!(status.text.starts_with("Saved "));
}

#[test]
fn save_without_changes_writes_nothing() {
    let tmp = make_vault();
    let mut state = scanned(tmp.path());
    state.select_file(&key(&tmp.path().join("b.md")));
    state.apply_action(Action::Save);
    assert!(state.document.as_ref().unwrap().last_saved().is_none());
    assert!(state.status.is_none());
}

#[test]
fn save_from_edit_mode_commits_buffer() {
    let tmp = make_vault();
    let mut state = scanned(tmp.path());
    let b_path = tmp.path().join("b.md");
    state.select_file(&key(&b_path));

    state.apply_action(Action::ToggleEdit);
    *state.document.as_mut().unwrap().buffer_mut() = "edited".to_string();
    state.apply_action(Action::Save);

    assert_eq!(fs::read_to_string(&b_path).unwrap(), "edited");
    assert!(state.document.as_ref().unwrap().is_editing());
}

#[test]
fn reselecting_open_file_keeps_edits() {
    let tmp = make_vault();
    let mut state = scanned(tmp.path());
    let a = key(&tmp.path().join("a.md"));
    state.select_file(&a);
    state.toggle_edit();
    *state.document.as_mut().unwrap().buffer_mut() = "draft".to_string();

    state.select_file(&a);
    let doc = state.document.as_mut().unwrap();
    assert!(doc.is_editing());
    assert_eq!(doc.buffer_mut().as_str(), "draft");
}

#[test]
fn missing_file_reports_error() {
    let tmp = make_vault();
    let mut state = scanned(tmp.path());
    state.select_file(&key(&tmp.path().join("nope.md")));
    assert!(state.document.is_none());
    assert!(state.status.as_ref().unwrap().is_error());
}

// ── Chrome ────────────────────────────────────────────────────────────────────

#[test]
fn theme_toggle_round_trips() {
    let mut state = AppState::new();
    assert!(state.dark_mode());
    state.apply_action(Action::ToggleTheme);
    assert!(!state.dark_mode());
    state.toggle_theme();
    assert!(state.dark_mode());
}

#[test]
fn path_editor_prefills_and_opens_vault() {
    let first = make_vault();
    let second = TempDir::new().unwrap();
    write(&second.path().join("z.md"), "z");

    let mut state = scanned(first.path());
    state.toggle_path_editor();
    assert!(state.path_editor_open);
    assert!(state.focus_path_editor);
    assert_eq!(state.path_input, key(first.path()));

    state.path_input = format!("  {}  ", key(second.path()));
    state.submit_vault_path();
    assert!(!state.path_editor_open);
    assert_eq!(state.phase, AppPhase::Scanning);
    pump_until_done(&mut state);

    assert_eq!(row_names(&state), ["z.md"]);
    // Selection from the old vault was dropped, so the new first file opens.
    assert_eq!(state.selected.as_deref(), Some(key(&second.path().join("z.md")).as_str()));
}

#[test]
fn blank_path_input_is_rejected() {
    let mut state = AppState::new();
    state.toggle_path_editor();
    state.path_input = "   ".to_string();
    state.submit_vault_path();
    assert!(state.path_editor_open);
    assert_eq!(state.phase, AppPhase::Idle);
    assert!(state.status.as_ref().unwrap().is_error());
}

/// Poll the picker until its dialog closure has reported.
fn pump_picker(state: &mut AppState) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while state.picker.is_open() {
        assert!(Instant::now() < deadline, "picker did not report");
        if state.process_picker() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn picked_vault_is_scanned() {
    let tmp = make_vault();
    let root: PathBuf = tmp.path().to_path_buf();
    let mut state = AppState::new();

    state.picker.request(PickerKind::Vault, move || Some(root));
    assert!(pump_picker(&mut state));
    assert_eq!(state.phase, AppPhase::Scanning);
    pump_until_done(&mut state);
    assert_eq!(state.visible_rows.len(), 3);
}

#[test]
fn picked_file_is_opened_and_cancel_is_silent() {
    let tmp = make_vault();
    let file = tmp.path().join("b.md");
    let mut state = AppState::new();

    state.picker.request(PickerKind::File, || None);
    assert!(!pump_picker(&mut state));
    assert!(state.status.is_none());

    state.picker.request(PickerKind::File, move || Some(file));
    assert!(pump_picker(&mut state));
    assert_eq!(state.document.as_ref().unwrap().name(), "b.md");
}

#[test]
fn mobile_selection_switches_to_editor() {
    let tmp = make_vault();
    let mut state = scanned(tmp.path());
    state.layout = LayoutMode::Mobile;
    assert!(!state.showing_editor);

    state.activate(&key(&tmp.path().join("a.md")));
    assert!(state.showing_editor);

    state.apply_action(Action::FocusTree);
    assert!(!state.showing_editor);

    // Desktop never flips the pane flag.
    state.layout = LayoutMode::Desktop;
    state.select_file(&key(&tmp.path().join("b.md")));
    assert!(!state.showing_editor);
}

#[test]
fn switching_vault_closes_previous_note() {
    let first = TempDir::new().unwrap();
    let a_path = first.path().join("a.md");
    write(&a_path, "# A\n");
    let second = TempDir::new().unwrap();
    write(&second.path().join("notes/x.md"), "x");

    let mut state = scanned(first.path());
    state.toggle_edit();
    *state.document.as_mut().unwrap().buffer_mut() = "unsaved".to_string();
    state.toggle_edit();
    assert!(state.document.as_ref().unwrap().is_dirty());

    // Rescanning the same vault keeps the open note.
    state.rescan();
    pump_until_done(&mut state);
    assert_eq!(open_path(&state), Some(key(&a_path).as_str()));

    state.open_vault(Location::from_path(second.path()));
    pump_until_done(&mut state);
    // First child is a directory, so nothing is open.
    assert!(state.document.is_none());
    assert_eq!(state.window_title(), APP_NAME);

    state.apply_action(Action::Save);
    assert_eq!(fs::read_to_string(&a_path).unwrap(), "# A\n");
}

#[test]
fn non_utf8_note_opens_read_only_with_warning() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("legacy.md");
    fs::write(&path, b"caf\xe9\n").unwrap();

    let mut state = scanned(tmp.path());
    let doc = state.document.as_ref().unwrap();
    assert!(doc.is_read_only());
    let status = state.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Warning);
    assert!(status.text.contains("legacy.md"));

    state.apply_action(Action::ToggleEdit);
    assert!(!state.document.as_ref().unwrap().is_editing());
    state.apply_action(Action::Save);
    assert_eq!(fs::read(&path).unwrap(), b"caf\xe9\n");
}
