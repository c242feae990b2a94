/// Content access -- the seam between the core and the platform.
///
/// Everything that touches storage (reading a note, saving it, listing a
/// directory level during a scan) goes through [`ContentAccess`]. Two
/// backends exist:
///
/// - [`LocalFs`] -- direct `std::fs` calls.
/// - [`BridgedAccess`] -- a platform document bridge (Android SAF), reached
///   through an injected [`DocumentBridge`] helper.
///
/// [`ContentRouter`] owns both and is the only place that decides, by URI
/// scheme, which one handles a given path.
pub mod bridge;
pub mod local;
pub mod router;

pub use bridge::{parse_entries, BridgedAccess, DocumentBridge};
pub use local::LocalFs;
pub use router::ContentRouter;

use crate::error::VaultError;
use compact_str::CompactString;

/// Prefix identifying platform document URIs.
pub const BRIDGED_SCHEME_PREFIX: &str = "content://";

/// One immediate child returned by a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: CompactString,
    pub is_dir: bool,
    /// Full path (filesystem) or document URI (bridge) of the child.
    pub id: String,
}

/// Which directory level to list.
///
/// Bridged sub-level listings need both the original tree root and the
/// specific subdirectory identifier, so the two travel together.
#[derive(Debug, Clone, Copy)]
pub struct ListRequest<'a> {
    /// The vault root (filesystem path or tree URI).
    pub root: &'a str,
    /// Subdirectory to list; `None` lists the root level.
    pub dir: Option<&'a str>,
}

impl<'a> ListRequest<'a> {
    pub fn root(root: &'a str) -> Self {
        Self { root, dir: None }
    }

    pub fn sub(root: &'a str, dir: &'a str) -> Self {
        Self {
            root,
            dir: Some(dir),
        }
    }

    /// The identifier of the level being listed.
    pub fn target(&self) -> &'a str {
        self.dir.unwrap_or(self.root)
    }
}

/// Byte-level storage operations for logical paths.
pub trait ContentAccess: Send + Sync {
    /// Read the full content at `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>, VaultError>;

    /// Replace the content at `path`.
    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), VaultError>;

    /// List the immediate entries of one directory level, unsorted.
    fn list(&self, request: ListRequest<'_>) -> Result<Vec<Entry>, VaultError>;

    /// Display name of a vault root. Fails if the root cannot be resolved.
    fn display_name(&self, root: &str) -> Result<String, VaultError>;

    /// Whether `path` is a document URI handled by a platform bridge.
    fn is_bridged_uri(&self, path: &str) -> bool;
}
