/// Vault scanner -- builds the markdown-only tree for a vault root.
///
/// The walk is depth-first and synchronous. Each directory level is listed
/// through [`ContentAccess`], so the same code scans a local directory and
/// a bridged document tree. Pruning happens bottom-up on the way back out:
///
/// - hidden entries (leading `.`) are skipped
/// - files survive only if their name ends in `.md`
/// - directories survive only if something below them survived
///
/// Directories nested deeper than [`MAX_DEPTH`] are not listed, so they
/// have no children and are pruned. Files one level below the limit are
/// still kept, which makes `MAX_DEPTH + 1` the deepest possible node.
///
/// See [`worker`] for running a scan off the calling thread.
pub mod worker;

use crate::access::{ContentAccess, ListRequest};
use crate::error::VaultError;
use crate::location::{is_markdown_name, Location};
use crate::model::Node;
use std::time::Instant;
use tracing::{debug, info};

/// Deepest directory level that is still listed. The root is depth 0.
pub const MAX_DEPTH: u16 = 5;

/// Scan `root` and return its pruned tree.
///
/// Fails if the root cannot be resolved or listed, or if `root` is unset
/// or a remote URL that `access` does not bridge. Failures below the root
/// are logged at debug and the affected subdirectory is left out.
pub fn scan_vault(access: &dyn ContentAccess, root: &Location) -> Result<Node, VaultError> {
    let key = match root {
        Location::Unset => return Err(VaultError::Unsupported("unset location".into())),
        Location::Local(_) => root.as_key(),
        Location::Remote(_) => {
            let key = root.as_key();
            if !access.is_bridged_uri(&key) {
                return Err(VaultError::Unsupported(key));
            }
            key
        }
    };

    let start = Instant::now();
    info!("Starting scan of {key}");

    let name = access.display_name(&key)?;
    let mut tree = Node::new_dir(key.as_str(), name, 0);
    tree.children = scan_level(access, ListRequest::root(&key), 0)?;

    info!(
        "Scan of {key} complete: {} nodes in {:.2?}",
        tree.node_count(),
        start.elapsed()
    );
    Ok(tree)
}

/// List one level and return its surviving children, already sorted.
/// `depth` is the depth of the directory being listed.
fn scan_level(
    access: &dyn ContentAccess,
    request: ListRequest<'_>,
    depth: u16,
) -> Result<Vec<Node>, VaultError> {
    let mut entries = access.list(request)?;
    // Stable: directories first, then case-insensitive by name.
    entries.sort_by_cached_key(|entry| (!entry.is_dir, entry.name.to_lowercase()));

    let child_depth = depth + 1;
    let mut children = Vec::new();

    for entry in entries {
        if entry.name.starts_with('.') {
            continue;
        }

        if !entry.is_dir {
            if is_markdown_name(&entry.name) {
                children.push(Node::new_file(entry.id, &entry.name, child_depth));
            }
            continue;
        }

        let mut dir = Node::new_dir(entry.id, &entry.name, child_depth);
        if child_depth <= MAX_DEPTH {
            match scan_level(access, ListRequest::sub(request.root, &dir.path), child_depth) {
                Ok(grandchildren) => dir.children = grandchildren,
                Err(e) => {
                    debug!("Skipping {}: {e}", dir.path);
                    continue;
                }
            }
        }
        if dir.has_markdown_content() {
            children.push(dir);
        }
    }

    Ok(children)
}
