/// Background scan worker.
///
/// One scan per thread, one message per scan. The result travels over a
/// single-slot channel which the UI polls once per frame; there is no
/// progress stream and no cancellation.
use super::scan_vault;
use crate::access::ContentAccess;
use crate::error::VaultError;
use crate::location::Location;
use crate::model::Node;
use crossbeam_channel::{Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::warn;

/// Final message sent by the scan thread.
#[derive(Debug)]
pub enum ScanOutcome {
    /// The scan produced a tree.
    Complete { root: Node, duration: Duration },
    /// The root could not be scanned.
    Failed { error: VaultError, duration: Duration },
}

/// Handle to a running or finished scan.
pub struct ScanHandle {
    location: Location,
    outcome_rx: Receiver<ScanOutcome>,
    _thread: thread::JoinHandle<()>,
}

impl ScanHandle {
    /// The location being scanned.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Non-blocking poll. Returns the outcome exactly once.
    pub fn try_outcome(&self) -> Option<ScanOutcome> {
        match self.outcome_rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // The thread only drops its sender after sending, or if
                // `scan_vault` panicked.
                warn!("Scan thread for {} exited without a result", self.location);
                None
            }
        }
    }
}

/// Start scanning `root` on a background thread named `notepane-scanner`.
///
/// Only fails if the thread cannot be spawned.
pub fn start_scan(access: Arc<dyn ContentAccess>, root: Location) -> Result<ScanHandle, VaultError> {
    let (outcome_tx, outcome_rx) = crossbeam_channel::bounded::<ScanOutcome>(1);
    let location = root.clone();

    let thread = thread::Builder::new()
        .name("notepane-scanner".into())
        .spawn(move || {
            let start = Instant::now();
            let outcome = match scan_vault(access.as_ref(), &root) {
                Ok(tree) => ScanOutcome::Complete {
                    root: tree,
                    duration: start.elapsed(),
                },
                Err(error) => ScanOutcome::Failed {
                    error,
                    duration: start.elapsed(),
                },
            };
            // The receiver may already be gone if the UI replaced this scan.
            let _ = outcome_tx.send(outcome);
        })
        .map_err(|e| VaultError::io("notepane-scanner", e))?;

    Ok(ScanHandle {
        location,
        outcome_rx,
        _thread: thread,
    })
}
