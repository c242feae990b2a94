/// Application state management.
///
/// Centralises all mutable state that the UI reads and writes: the vault,
/// the scanned tree and its expansion map, the open document, theme and
/// layout flags. The scan worker and the pickers communicate via channels;
/// their results are applied in `process_scan_messages()` and
/// `process_picker()`, which run once per frame.
use crate::document::Document;
use crate::keymap::Action;
use crate::layout::LayoutMode;
use crate::picker::{Picker, PickerKind, PickerResult};
use crate::theme::ThemeMode;
use compact_str::CompactString;
use notepane_core::access::{ContentAccess, ContentRouter};
use notepane_core::config::Settings;
use notepane_core::flatten::{flatten, is_expanded, ExpansionState};
use notepane_core::scanner::worker::{self, ScanHandle, ScanOutcome};
use notepane_core::{Location, Node};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Suffix of every window title.
pub const APP_NAME: &str = "notepane";

/// The current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// No vault loaded yet, or the first scan failed.
    Idle,
    /// A scan is running on the worker thread.
    Scanning,
    /// A tree is available.
    Ready,
}

/// Keyboard navigation inside the focused tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKey {
    Down,
    Up,
    /// Enter / Space: flip a directory.
    Toggle,
    Expand,
    Collapse,
}

/// A row in the flattened visible-rows list for the tree widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleRow {
    pub path: String,
    pub name: CompactString,
    /// Nesting depth; root children are 1.
    pub depth: u16,
    pub is_dir: bool,
    /// Whether this directory is currently expanded (meaningless for files).
    pub is_expanded: bool,
}

/// How a status message is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

/// A one-line message for the status area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// All application state.
pub struct AppState {
    access: Arc<dyn ContentAccess>,

    // ── Vault / scan ───────────────────────────────────
    pub vault: Location,
    pub phase: AppPhase,
    pub scan_handle: Option<ScanHandle>,
    pub scan_duration: Option<Duration>,
    pub scan_error: Option<String>,

    // ── Tree ───────────────────────────────────────────
    pub tree: Option<Node>,
    /// Survives rescans; keyed by path.
    pub expanded: ExpansionState,
    pub selected: Option<String>,
    pub visible_rows: Vec<VisibleRow>,
    pub tree_focused: bool,

    // ── Editor ─────────────────────────────────────────
    pub document: Option<Document>,

    // ── UI state ───────────────────────────────────────
    pub theme: ThemeMode,
    pub layout: LayoutMode,
    /// Mobile only: editor (true) or tree (false) is showing.
    pub showing_editor: bool,
    pub path_editor_open: bool,
    pub path_input: String,
    /// Set when the path editor opens; the toolbar gives it keyboard focus.
    pub focus_path_editor: bool,
    pub picker: Picker,
    pub status: Option<StatusMessage>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Filesystem-only state in dark mode.
    pub fn new() -> Self {
        Self::with_access(Arc::new(ContentRouter::new()))
    }

    /// State that reads and writes through `access`.
    pub fn with_access(access: Arc<dyn ContentAccess>) -> Self {
        Self {
            access,
            vault: Location::Unset,
            phase: AppPhase::Idle,
            scan_handle: None,
            scan_duration: None,
            scan_error: None,
            tree: None,
            expanded: ExpansionState::new(),
            selected: None,
            visible_rows: Vec::new(),
            tree_focused: false,
            document: None,
            theme: ThemeMode::Dark,
            layout: LayoutMode::Desktop,
            showing_editor: false,
            path_editor_open: false,
            path_input: String::new(),
            focus_path_editor: false,
            picker: Picker::default(),
            status: None,
        }
    }

    /// State for start-up settings. Starts scanning the configured vault.
    pub fn from_settings(access: Arc<dyn ContentAccess>, settings: &Settings) -> Self {
        let mut state = Self::with_access(access);
        state.theme = ThemeMode::from_dark(settings.dark_mode);
        if let Some(vault) = &settings.vault {
            state.open_vault(vault.clone());
        }
        state
    }

    pub fn access(&self) -> &dyn ContentAccess {
        self.access.as_ref()
    }

    pub fn dark_mode(&self) -> bool {
        self.theme.is_dark()
    }

    /// Display name of the vault, or a placeholder when none is open.
    pub fn vault_name(&self) -> String {
        match &self.tree {
            Some(root) => root.name.to_string(),
            None if self.vault.is_zero() => "No vault".to_string(),
            None => self.vault.name(),
        }
    }

    // ── Scanning ───────────────────────────────────────

    /// Start scanning `location`, replacing any scan in progress.
    pub fn open_vault(&mut self, location: Location) {
        if location.is_zero() {
            self.set_error("No vault location given");
            return;
        }
        if location != self.vault {
            // Paths from the previous vault would never match again, and
            // its open note must not stay writable from the new one.
            self.selected = None;
            self.document = None;
        }

        info!("Opening vault {location}");
        match worker::start_scan(self.access.clone(), location.clone()) {
            Ok(handle) => {
                self.scan_handle = Some(handle);
                self.phase = AppPhase::Scanning;
                self.status = None;
            }
            Err(e) => {
                warn!("Could not start scan of {location}: {e}");
                self.set_error(format!("Scan failed: {e}"));
            }
        }
        self.vault = location;
    }

    /// Rescan the current vault.
    pub fn rescan(&mut self) {
        self.open_vault(self.vault.clone());
    }

    /// Apply the scan result, if it has arrived. Called once per frame.
    ///
    /// Returns `true` if the UI should repaint.
    pub fn process_scan_messages(&mut self) -> bool {
        let outcome = match &self.scan_handle {
            Some(handle) => handle.try_outcome(),
            None => return false,
        };
        let Some(outcome) = outcome else {
            return false;
        };
        self.scan_handle = None;

        match outcome {
            ScanOutcome::Complete { root, duration } => {
                info!(
                    "Vault {} ready: {} nodes in {duration:.2?}",
                    root.path,
                    root.node_count()
                );
                self.scan_duration = Some(duration);
                self.scan_error = None;
                self.phase = AppPhase::Ready;
                self.set_root(root);
            }
            ScanOutcome::Failed { error, duration } => {
                warn!("Scan failed after {duration:.2?}: {error}");
                self.scan_duration = Some(duration);
                self.scan_error = Some(error.to_string());
                self.set_error(format!("Scan failed: {error}"));
                // Keep showing the previous tree, if any.
                self.phase = if self.tree.is_some() {
                    AppPhase::Ready
                } else {
                    AppPhase::Idle
                };
            }
        }
        true
    }

    /// Install a freshly scanned tree.
    ///
    /// The root is always expanded. If nothing is selected, the first
    /// child is selected, and opened when it is a file.
    pub fn set_root(&mut self, root: Node) {
        self.expanded.insert(root.path.clone(), true);

        let mut open_first = None;
        if self.selected.is_none() {
            if let Some(first) = root.children.first() {
                self.selected = Some(first.path.clone());
                if !first.is_dir {
                    open_first = Some(first.path.clone());
                }
            }
        }

        self.tree = Some(root);
        self.rebuild_visible_rows();

        if let Some(path) = open_first {
            self.load_document(&path);
        }
    }

    fn rebuild_visible_rows(&mut self) {
        self.visible_rows = match &self.tree {
            Some(root) => flatten(root, &self.expanded)
                .into_iter()
                .map(|node| VisibleRow {
                    path: node.path.clone(),
                    name: node.name.clone(),
                    depth: node.depth,
                    is_dir: node.is_dir,
                    is_expanded: node.is_dir && is_expanded(&self.expanded, &node.path),
                })
                .collect(),
            None => Vec::new(),
        };
    }

    // ── Tree interaction ───────────────────────────────

    fn row(&self, path: &str) -> Option<&VisibleRow> {
        self.visible_rows.iter().find(|row| row.path == path)
    }

    fn set_expanded(&mut self, path: &str, expanded: bool) {
        self.expanded.insert(path.to_string(), expanded);
        self.rebuild_visible_rows();
    }

    /// Flip a visible directory between expanded and collapsed.
    pub fn toggle_expand(&mut self, path: &str) {
        if let Some(row) = self.row(path) {
            if row.is_dir {
                let expanded = !row.is_expanded;
                self.set_expanded(path, expanded);
            }
        }
    }

    /// Click on a row: directories toggle, files open.
    pub fn activate(&mut self, path: &str) {
        let Some(is_dir) = self.row(path).map(|row| row.is_dir) else {
            return;
        };
        self.tree_focused = true;
        if is_dir {
            self.selected = Some(path.to_string());
            self.toggle_expand(path);
        } else {
            self.select_file(path);
        }
    }

    /// Keyboard navigation over the visible rows.
    pub fn tree_key(&mut self, key: TreeKey) {
        if self.visible_rows.is_empty() {
            return;
        }
        let current = self
            .selected
            .as_deref()
            .and_then(|sel| self.visible_rows.iter().position(|row| row.path == sel));

        match key {
            TreeKey::Down | TreeKey::Up => {
                let last = self.visible_rows.len() - 1;
                let next = match (key, current) {
                    (TreeKey::Down, Some(i)) => (i + 1).min(last),
                    (TreeKey::Up, Some(i)) => i.saturating_sub(1),
                    _ => 0,
                };
                if current == Some(next) {
                    return;
                }
                let row = self.visible_rows[next].clone();
                if row.is_dir {
                    self.selected = Some(row.path);
                } else {
                    self.select_file(&row.path);
                }
            }
            TreeKey::Toggle | TreeKey::Expand | TreeKey::Collapse => {
                let Some(row) = current.map(|i| self.visible_rows[i].clone()) else {
                    return;
                };
                if !row.is_dir {
                    return;
                }
                match key {
                    TreeKey::Toggle => self.set_expanded(&row.path, !row.is_expanded),
                    TreeKey::Expand => self.set_expanded(&row.path, true),
                    _ if row.is_expanded => self.set_expanded(&row.path, false),
                    _ => {}
                }
            }
        }
    }

    // ── Editor ─────────────────────────────────────────

    /// Select and open a file. On mobile, switch to the editor.
    pub fn select_file(&mut self, path: &str) {
        self.selected = Some(path.to_string());
        self.load_document(path);
        if self.layout.is_mobile() {
            self.showing_editor = true;
        }
    }

    fn load_document(&mut self, path: &str) {
        if self.document.as_ref().is_some_and(|doc| doc.path() == path) {
            return;
        }
        match Document::load(self.access.as_ref(), path) {
            Ok(document) => {
                self.status = if document.is_read_only() {
                    warn!("{path} is not valid UTF-8; opened read-only");
                    Some(StatusMessage {
                        text: format!("{} is not valid UTF-8; opened read-only", document.name()),
                        kind: StatusKind::Warning,
                    })
                } else {
                    None
                };
                self.document = Some(document);
            }
            Err(e) => {
                warn!("Could not open {path}: {e}");
                self.set_error(format!("Could not open file: {e}"));
            }
        }
    }

    pub fn toggle_edit(&mut self) {
        if let Some(document) = &mut self.document {
            document.toggle_edit();
            if document.is_editing() {
                self.tree_focused = false;
            }
        }
    }

    /// Write the open document if it has unsaved changes.
    pub fn save(&mut self) {
        let Some(document) = &mut self.document else {
            return;
        };
        match document.save(self.access.as_ref()) {
            Ok(true) => {
                let when = document
                    .last_saved()
                    .map(|t| t.format("%H:%M:%S").to_string())
                    .unwrap_or_default();
                self.status = Some(StatusMessage {
                    text: format!("Saved {when}"),
                    kind: StatusKind::Success,
                });
            }
            Ok(false) => {}
            Err(e) => {
                warn!("Save failed: {e}");
                self.set_error(format!("Save failed: {e}"));
            }
        }
    }

    /// `"<name>* - notepane"` while there are unsaved changes,
    /// `"<name> - notepane"` otherwise, `"notepane"` with no file open.
    pub fn window_title(&self) -> String {
        match &self.document {
            Some(doc) if doc.is_dirty() => format!("{}* - {APP_NAME}", doc.name()),
            Some(doc) => format!("{} - {APP_NAME}", doc.name()),
            None => APP_NAME.to_string(),
        }
    }

    // ── Chrome ─────────────────────────────────────────

    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
    }

    /// Show or hide the vault path editor, prefilled with the current vault.
    pub fn toggle_path_editor(&mut self) {
        self.path_editor_open = !self.path_editor_open;
        if self.path_editor_open {
            self.path_input = self.vault.as_key();
        }
        self.focus_path_editor = self.path_editor_open;
    }

    /// Open the vault typed into the path editor.
    pub fn submit_vault_path(&mut self) {
        let input = self.path_input.trim().to_string();
        match Location::parse(&input) {
            Ok(location) if !location.is_zero() => {
                self.path_editor_open = false;
                self.open_vault(location);
            }
            Ok(_) => self.set_error("Enter a vault path"),
            Err(e) => {
                warn!("Rejected vault path {input:?}: {e}");
                self.set_error(e.to_string());
            }
        }
    }

    /// Apply whatever a finished picker returned.
    pub fn process_picker(&mut self) -> bool {
        let Some(PickerResult { kind, path }) = self.picker.poll() else {
            return false;
        };
        match kind {
            PickerKind::File => self.select_file(&path.to_string_lossy()),
            PickerKind::Vault => self.open_vault(Location::from_path(&path)),
        }
        true
    }

    /// Dispatch a key binding.
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::ToggleEdit => self.toggle_edit(),
            Action::Save => self.save(),
            Action::FocusTree => {
                self.tree_focused = true;
                if self.layout.is_mobile() {
                    self.showing_editor = false;
                }
            }
            Action::FocusEditor => {
                self.tree_focused = false;
                if self.layout.is_mobile() {
                    self.showing_editor = true;
                }
            }
            Action::ToggleTheme => self.toggle_theme(),
            Action::TogglePathEditor => self.toggle_path_editor(),
            Action::OpenFile => self.picker.open_file(),
            Action::OpenVault => self.picker.open_vault(),
            Action::Tree(key) => self.tree_key(key),
        }
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
        });
    }
}
