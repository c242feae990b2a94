/// Backend selection by URI scheme.
use super::{BridgedAccess, ContentAccess, Entry, ListRequest, LocalFs, BRIDGED_SCHEME_PREFIX};
use crate::error::VaultError;

/// Owns every backend and dispatches each call to exactly one of them.
///
/// Without a bridge installed (any desktop platform) every path goes to
/// the filesystem and [`ContentAccess::is_bridged_uri`] is always false.
#[derive(Default)]
pub struct ContentRouter {
    local: LocalFs,
    bridge: Option<BridgedAccess>,
}

impl ContentRouter {
    /// Filesystem-only router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Router that sends `content://` paths to `bridge`.
    pub fn with_bridge(bridge: BridgedAccess) -> Self {
        Self {
            local: LocalFs,
            bridge: Some(bridge),
        }
    }

    pub fn has_bridge(&self) -> bool {
        self.bridge.is_some()
    }

    /// The backend responsible for `path`. This is the only place the
    /// scheme check happens.
    pub fn backend_for(&self, path: &str) -> &dyn ContentAccess {
        match &self.bridge {
            Some(bridge) if path.starts_with(BRIDGED_SCHEME_PREFIX) => bridge,
            _ => &self.local,
        }
    }
}

impl ContentAccess for ContentRouter {
    fn read(&self, path: &str) -> Result<Vec<u8>, VaultError> {
        self.backend_for(path).read(path)
    }

    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), VaultError> {
        self.backend_for(path).write(path, bytes)
    }

    fn list(&self, request: ListRequest<'_>) -> Result<Vec<Entry>, VaultError> {
        // Sub-level ids of a bridged tree are document ids, so dispatch on
        // the tree root rather than the level being listed.
        self.backend_for(request.root).list(request)
    }

    fn display_name(&self, root: &str) -> Result<String, VaultError> {
        self.backend_for(root).display_name(root)
    }

    fn is_bridged_uri(&self, path: &str) -> bool {
        self.bridge.is_some() && path.starts_with(BRIDGED_SCHEME_PREFIX)
    }
}
