/// The open note: its committed text, the edit buffer, and the rendered
/// block model.
///
/// A document is either being viewed or edited. Edits go to `buffer` and
/// only become the document's content when edit mode is left (or on save),
/// which is also when the dirty flag is computed and the blocks re-rendered.
///
/// Files that are not valid UTF-8 are shown lossily but opened read-only,
/// so a save can never replace their bytes with U+FFFD.
use crate::markdown::{self, Block};
use chrono::{DateTime, Local};
use notepane_core::access::ContentAccess;
use notepane_core::{Location, VaultError};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct Document {
    path: String,
    name: String,
    content: String,
    buffer: String,
    editing: bool,
    dirty: bool,
    read_only: bool,
    blocks: Vec<Block>,
    last_saved: Option<DateTime<Local>>,
}

impl Document {
    /// Read `path` and render it in view mode.
    pub fn load(access: &dyn ContentAccess, path: &str) -> Result<Self, VaultError> {
        let bytes = access.read(path)?;
        debug!("Loaded {path} ({} bytes)", bytes.len());
        match String::from_utf8(bytes) {
            Ok(content) => Ok(Self::from_content(path, content)),
            Err(e) => {
                warn!("{path} is not valid UTF-8 ({}); opening read-only", e.utf8_error());
                let content = String::from_utf8_lossy(e.as_bytes()).into_owned();
                Ok(Self {
                    read_only: true,
                    ..Self::from_content(path, content)
                })
            }
        }
    }

    /// Build an in-memory document without touching storage.
    pub fn from_content(path: &str, content: String) -> Self {
        Self {
            path: path.to_string(),
            name: leaf_name(path),
            blocks: markdown::parse(&content),
            buffer: content.clone(),
            content,
            editing: false,
            dirty: false,
            read_only: false,
            last_saved: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Committed text (excludes uncommitted edits).
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The file could not be decoded losslessly; editing and saving are off.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn last_saved(&self) -> Option<DateTime<Local>> {
        self.last_saved
    }

    /// The text being edited. Only meaningful in edit mode.
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    /// Switch between view and edit mode. Leaving edit mode commits.
    /// Read-only documents stay in view mode.
    pub fn toggle_edit(&mut self) {
        if self.read_only {
            return;
        }
        if self.editing {
            self.commit();
            self.editing = false;
        } else {
            self.buffer.clone_from(&self.content);
            self.editing = true;
        }
    }

    /// Write the document if it has unsaved changes. In edit mode the
    /// buffer is committed first and editing continues.
    ///
    /// Returns whether anything was written.
    pub fn save(&mut self, access: &dyn ContentAccess) -> Result<bool, VaultError> {
        if self.editing {
            self.commit();
        }
        if !self.dirty {
            return Ok(false);
        }
        access.write(&self.path, self.content.as_bytes())?;
        self.dirty = false;
        self.last_saved = Some(Local::now());
        info!("Saved {}", self.path);
        Ok(true)
    }

    fn commit(&mut self) {
        if self.buffer != self.content {
            self.content.clone_from(&self.buffer);
            self.dirty = true;
            self.blocks = markdown::parse(&self.content);
        }
    }
}

/// Display name for a path or document URI.
fn leaf_name(path: &str) -> String {
    match Location::parse(path) {
        Ok(location) if !location.name().is_empty() => location.name(),
        _ => path.rsplit('/').next().unwrap_or(path).to_string(),
    }
}
