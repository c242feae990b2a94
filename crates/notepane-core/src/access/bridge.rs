/// Platform document bridge backend (Android Storage Access Framework).
///
/// The platform side is modelled as a [`DocumentBridge`] helper, produced
/// by a connector closure the first time any bridged operation runs. The
/// helper lives in a `parking_lot::Mutex` which doubles as the single
/// cross-runtime monitor: only one bridge call is ever in flight.
///
/// Directory listings come back as a text payload, one entry per line:
///
/// ```text
/// d|notes|doc123
/// f|a.md|doc124
/// ```
///
/// See [`parse_entries`] for how malformed payloads degrade.
use super::{ContentAccess, Entry, ListRequest, BRIDGED_SCHEME_PREFIX};
use crate::error::VaultError;
use compact_str::CompactString;
use parking_lot::Mutex;
use tracing::{debug, warn};

/// Payload prefix the platform helper uses to report a listing failure.
const ERROR_SENTINEL: &str = "ERROR:";

/// Calls exposed by the platform-side helper.
///
/// Implementations wrap the actual cross-runtime mechanism. Errors are
/// returned as [`VaultError::Bridge`]; they never panic.
pub trait DocumentBridge: Send {
    /// List the root level of a document tree.
    fn list_dir(&mut self, tree_uri: &str) -> Result<String, VaultError>;

    /// List a subdirectory of a document tree.
    fn list_sub_dir(&mut self, tree_uri: &str, doc_uri: &str) -> Result<String, VaultError>;

    /// Read a document. `None` means the helper returned no data.
    fn read_file(&mut self, doc_uri: &str) -> Result<Option<Vec<u8>>, VaultError>;

    /// Write a document, returning the helper's success flag.
    fn write_file(&mut self, doc_uri: &str, data: &[u8]) -> Result<bool, VaultError>;

    /// Display name of a document tree root.
    fn tree_name(&mut self, tree_uri: &str) -> Result<String, VaultError>;
}

/// Produces the helper on first use. The error string becomes
/// [`VaultError::BridgeInit`].
pub type BridgeConnector = Box<dyn Fn() -> Result<Box<dyn DocumentBridge>, String> + Send + Sync>;

enum BridgeSlot {
    Pending,
    Ready(Box<dyn DocumentBridge>),
    Failed(String),
}

/// [`ContentAccess`] over a lazily-initialised [`DocumentBridge`].
pub struct BridgedAccess {
    connector: BridgeConnector,
    slot: Mutex<BridgeSlot>,
}

impl BridgedAccess {
    pub fn new(connector: BridgeConnector) -> Self {
        Self {
            connector,
            slot: Mutex::new(BridgeSlot::Pending),
        }
    }

    /// Run `call` against the helper, initialising it first if needed.
    ///
    /// Initialisation is attempted at most once per `BridgedAccess`; a
    /// failure is remembered and reported by every later call.
    fn with_bridge<T>(
        &self,
        call: impl FnOnce(&mut dyn DocumentBridge) -> Result<T, VaultError>,
    ) -> Result<T, VaultError> {
        let mut slot = self.slot.lock();
        if matches!(*slot, BridgeSlot::Pending) {
            *slot = match (self.connector)() {
                Ok(bridge) => {
                    debug!("Document bridge initialised");
                    BridgeSlot::Ready(bridge)
                }
                Err(reason) => {
                    warn!("Document bridge initialisation failed: {reason}");
                    BridgeSlot::Failed(reason)
                }
            };
        }
        match &mut *slot {
            BridgeSlot::Ready(bridge) => call(bridge.as_mut()),
            BridgeSlot::Failed(reason) => Err(VaultError::BridgeInit(reason.clone())),
            BridgeSlot::Pending => unreachable!("bridge slot initialised above"),
        }
    }
}

impl ContentAccess for BridgedAccess {
    fn read(&self, path: &str) -> Result<Vec<u8>, VaultError> {
        self.with_bridge(|bridge| Ok(bridge.read_file(path)?.unwrap_or_default()))
    }

    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), VaultError> {
        let ok = self.with_bridge(|bridge| bridge.write_file(path, bytes))?;
        if ok {
            Ok(())
        } else {
            Err(VaultError::WriteFailed {
                path: path.to_string(),
            })
        }
    }

    fn list(&self, request: ListRequest<'_>) -> Result<Vec<Entry>, VaultError> {
        let payload = self.with_bridge(|bridge| match request.dir {
            None => bridge.list_dir(request.root),
            Some(dir) => bridge.list_sub_dir(request.root, dir),
        })?;
        Ok(parse_entries(&payload))
    }

    fn display_name(&self, root: &str) -> Result<String, VaultError> {
        let name = self.with_bridge(|bridge| bridge.tree_name(root))?;
        Ok(if name.is_empty() {
            root.to_string()
        } else {
            name
        })
    }

    fn is_bridged_uri(&self, path: &str) -> bool {
        path.starts_with(BRIDGED_SCHEME_PREFIX)
    }
}

/// Parse a bridge listing payload (`kind|name|id` per line).
///
/// An empty payload or one starting with `ERROR:` yields no entries.
/// Lines that do not split into exactly three fields are skipped. Never
/// fails: a corrupt response reads as "nothing found".
pub fn parse_entries(payload: &str) -> Vec<Entry> {
    if payload.is_empty() || payload.starts_with(ERROR_SENTINEL) {
        return Vec::new();
    }

    payload
        .lines()
        .filter_map(|line| {
            let mut fields = line.splitn(3, '|');
            let kind = fields.next()?;
            let name = fields.next()?;
            let id = fields.next()?;
            Some(Entry {
                name: CompactString::new(name),
                is_dir: kind == "d",
                id: id.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// In-memory helper: listings keyed by document id.
    #[derive(Default)]
    struct FakeBridge {
        listings: HashMap<String, String>,
        files: HashMap<String, Vec<u8>>,
        accept_writes: bool,
    }

    impl DocumentBridge for FakeBridge {
        fn list_dir(&mut self, tree_uri: &str) -> Result<String, VaultError> {
            Ok(self.listings.get(tree_uri).cloned().unwrap_or_default())
        }

        fn list_sub_dir(&mut self, _tree_uri: &str, doc_uri: &str) -> Result<String, VaultError> {
            Ok(self.listings.get(doc_uri).cloned().unwrap_or_default())
        }

        fn read_file(&mut self, doc_uri: &str) -> Result<Option<Vec<u8>>, VaultError> {
            Ok(self.files.get(doc_uri).cloned())
        }

        fn write_file(&mut self, doc_uri: &str, data: &[u8]) -> Result<bool, VaultError> {
            if self.accept_writes {
                self.files.insert(doc_uri.to_string(), data.to_vec());
            }
            Ok(self.accept_writes)
        }

        fn tree_name(&mut self, _tree_uri: &str) -> Result<String, VaultError> {
            Ok("Notes".to_string())
        }
    }

    fn access_with(bridge: impl Fn() -> FakeBridge + Send + Sync + 'static) -> BridgedAccess {
        BridgedAccess::new(Box::new(move || Ok(Box::new(bridge()) as Box<dyn DocumentBridge>)))
    }

    #[test]
    fn test_parse_entries_two_lines() {
        let entries = parse_entries("d|notes|doc123\nf|a.md|doc124");
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_dir);
        assert_eq!(entries[0].name, "notes");
        assert_eq!(entries[0].id, "doc123");
        assert!(!entries[1].is_dir);
        assert_eq!(entries[1].name, "a.md");
        assert_eq!(entries[1].id, "doc124");
    }

    #[test]
    fn test_parse_entries_error_sentinel_and_empty() {
        assert!(parse_entries("ERROR:permission denied").is_empty());
        assert!(parse_entries("").is_empty());
    }

    #[test]
    fn test_parse_entries_skips_short_lines() {
        let entries = parse_entries("d|only-two\nf|ok.md|id|with|pipes\n\ngarbage");
        assert_eq!(entries.len(), 1);
        // The id keeps any further pipes.
        assert_eq!(entries[0].id, "id|with|pipes");
    }

    #[test]
    fn test_connector_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let access = access_with(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            FakeBridge::default()
        });

        access.list(ListRequest::root("content://tree")).unwrap();
        access.read("content://tree/a.md").unwrap();
        access.display_name("content://tree").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_init_failure_is_sticky() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let access = BridgedAccess::new(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err("class not found".to_string())
        }));

        for _ in 0..3 {
            let err = access.read("content://tree/a.md").unwrap_err();
            assert!(matches!(err, VaultError::BridgeInit(ref m) if m == "class not found"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rejected_write_is_write_failed() {
        let access = access_with(FakeBridge::default);
        let err = access.write("content://tree/a.md", b"x").unwrap_err();
        assert!(matches!(err, VaultError::WriteFailed { .. }));
    }

    #[test]
    fn test_accepted_write_round_trips() {
        let access = access_with(|| FakeBridge {
            accept_writes: true,
            ..Default::default()
        });
        access.write("content://tree/a.md", b"# a").unwrap();
        assert_eq!(access.read("content://tree/a.md").unwrap(), b"# a");
    }

    #[test]
    fn test_missing_document_reads_empty() {
        let access = access_with(FakeBridge::default);
        assert!(access.read("content://tree/none.md").unwrap().is_empty());
    }

    #[test]
    fn test_sub_listing_uses_doc_id() {
        let access = access_with(|| {
            let mut bridge = FakeBridge::default();
            bridge
                .listings
                .insert("content://tree".into(), "d|notes|doc-notes".into());
            bridge
                .listings
                .insert("doc-notes".into(), "f|a.md|doc-a".into());
            bridge
        });

        let root = access.list(ListRequest::root("content://tree")).unwrap();
        assert_eq!(root[0].id, "doc-notes");
        let sub = access
            .list(ListRequest::sub("content://tree", &root[0].id))
            .unwrap();
        assert_eq!(sub[0].name, "a.md");
    }

    #[test]
    fn test_is_bridged_uri() {
        let access = access_with(FakeBridge::default);
        assert!(access.is_bridged_uri("content://x"));
        assert!(!access.is_bridged_uri("/home/x"));
    }
}
