/// Native file and folder pickers.
///
/// `rfd` dialogs block their thread, so each one runs on a short-lived
/// background thread and hands its answer back over a single-slot channel
/// that the UI polls once per frame. Only one dialog is open at a time;
/// requests made while one is showing are ignored. Cancelling a dialog is
/// not an error, it simply produces no result.
use crossbeam_channel::{Receiver, TryRecvError};
use rfd::FileDialog;
use std::path::PathBuf;
use std::thread;
use tracing::{debug, warn};

/// Extensions offered by the file picker.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    /// A single markdown file to open in the editor.
    File,
    /// A directory to open as the vault.
    Vault,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerResult {
    pub kind: PickerKind,
    pub path: PathBuf,
}

#[derive(Default)]
pub struct Picker {
    pending: Option<(PickerKind, Receiver<Option<PathBuf>>)>,
}

impl Picker {
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Show the markdown file picker.
    pub fn open_file(&mut self) {
        self.request(PickerKind::File, || {
            FileDialog::new()
                .set_title("Open Markdown File")
                .add_filter("Markdown files", MARKDOWN_EXTENSIONS)
                .pick_file()
        });
    }

    /// Show the vault folder picker.
    pub fn open_vault(&mut self) {
        self.request(PickerKind::Vault, || {
            FileDialog::new().set_title("Open Vault").pick_folder()
        });
    }

    /// Run `dialog` on a background thread unless a dialog is already open.
    pub fn request<F>(&mut self, kind: PickerKind, dialog: F)
    where
        F: FnOnce() -> Option<PathBuf> + Send + 'static,
    {
        if self.is_open() {
            debug!("Ignoring {kind:?} picker request: a dialog is already open");
            return;
        }

        let (tx, rx) = crossbeam_channel::bounded::<Option<PathBuf>>(1);
        let spawned = thread::Builder::new()
            .name("notepane-picker".into())
            .spawn(move || {
                let _ = tx.send(dialog());
            });

        match spawned {
            Ok(_) => self.pending = Some((kind, rx)),
            Err(e) => warn!("Could not open {kind:?} picker: {e}"),
        }
    }

    /// Non-blocking poll. Returns a result once, when the user picked
    /// something; a cancelled dialog just closes.
    pub fn poll(&mut self) -> Option<PickerResult> {
        let (kind, rx) = self.pending.as_ref()?;
        let kind = *kind;
        let picked = match rx.try_recv() {
            Ok(picked) => picked,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => None,
        };
        self.pending = None;

        match picked {
            Some(path) => Some(PickerResult { kind, path }),
            None => {
                debug!("{kind:?} picker cancelled");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn poll_until_closed(picker: &mut Picker) -> Option<PickerResult> {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            if let Some(result) = picker.poll() {
                return Some(result);
            }
            if !picker.is_open() {
                return None;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("picker never answered");
    }

    #[test]
    fn test_pick_delivers_result() {
        let mut picker = Picker::default();
        picker.request(PickerKind::Vault, || Some(PathBuf::from("/notes")));
        assert!(picker.is_open());

        let result = poll_until_closed(&mut picker).unwrap();
        assert_eq!(result.kind, PickerKind::Vault);
        assert_eq!(result.path, PathBuf::from("/notes"));
        assert!(!picker.is_open());
    }

    #[test]
    fn test_cancel_is_silent() {
        let mut picker = Picker::default();
        picker.request(PickerKind::File, || None);
        assert!(poll_until_closed(&mut picker).is_none());
        assert!(!picker.is_open());
    }

    #[test]
    fn test_second_request_ignored_while_open() {
        let (release_tx, release_rx) = crossbeam_channel::bounded::<()>(1);
        let mut picker = Picker::default();
        picker.request(PickerKind::File, move || {
            let _ = release_rx.recv();
            Some(PathBuf::from("/first.md"))
        });
        picker.request(PickerKind::Vault, || Some(PathBuf::from("/second")));
        release_tx.send(()).unwrap();

        let result = poll_until_closed(&mut picker).unwrap();
        assert_eq!(result.kind, PickerKind::File);
        assert_eq!(result.path, PathBuf::from("/first.md"));
    }
}
