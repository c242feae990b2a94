/// Notepane Core -- vault scanning, tree flattening and content access.
///
/// This crate has no UI dependencies. The GUI crate drives it, and so does
/// the binary's headless `--print-tree` mode.
///
/// # Modules
///
/// - [`location`] -- local path / URL normalisation and markdown name tests.
/// - [`access`] -- the [`ContentAccess`](access::ContentAccess) seam, its
///   filesystem and document-bridge backends, and the router between them.
/// - [`model`] -- the owned [`Node`](model::Node) tree.
/// - [`scanner`] -- depth-bounded, markdown-pruning vault scan, plus a
///   background worker.
/// - [`flatten`] -- pre-order flattening for list rendering.
/// - [`config`] -- start-up settings from the environment and CLI.
/// - [`error`] -- [`VaultError`](error::VaultError).
pub mod access;
pub mod config;
pub mod error;
pub mod flatten;
pub mod location;
pub mod model;
pub mod scanner;

pub use error::VaultError;
pub use location::Location;
pub use model::Node;
