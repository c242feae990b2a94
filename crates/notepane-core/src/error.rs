/// Error taxonomy shared by the core crate.
///
/// Root-level failures (bad vault root, unwritable file, bridge setup) are
/// returned to the caller as a [`VaultError`]. Per-subdirectory failures
/// during a scan never surface here; the scanner swallows them locally.
use thiserror::Error;

/// Everything that can go wrong while reading, writing or scanning a vault.
#[derive(Debug, Error)]
pub enum VaultError {
    /// A filesystem call failed for `path`.
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// User input was expected to be a URL but did not parse as one.
    #[error("invalid URL {input:?}: {source}")]
    Parse {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// One-time setup of the platform document bridge failed.
    /// Sticky: every later bridge call in the session reports it again.
    #[error("document bridge unavailable: {0}")]
    BridgeInit(String),

    /// A call across the document bridge failed.
    #[error("document bridge call failed: {0}")]
    Bridge(String),

    /// The document bridge reported an unsuccessful write.
    #[error("failed to write {path}")]
    WriteFailed { path: String },

    /// The location cannot be scanned (unset, or a remote URL that no
    /// installed backend can list).
    #[error("{0} is not a scannable vault location")]
    Unsupported(String),
}

impl VaultError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
