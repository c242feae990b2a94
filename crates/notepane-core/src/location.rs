/// Location utility -- normalises user input into either a local absolute
/// path or a parsed URL, and classifies markdown-like filenames.
use crate::access::BRIDGED_SCHEME_PREFIX;
use crate::error::VaultError;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Either a local file path or a remote URL. `Unset` is the zero value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Location {
    #[default]
    Unset,
    /// Absolute local path (best effort -- see [`Location::from_path`]).
    Local(PathBuf),
    /// Parsed URL, including platform document URIs (`content://...`).
    Remote(Url),
}

impl Location {
    /// Resolve `s` to an absolute path. Never fails: if resolution errors,
    /// `s` is used unmodified. An empty result is `Unset`.
    pub fn from_path(s: impl AsRef<Path>) -> Self {
        let raw = s.as_ref();
        let resolved = std::path::absolute(raw).unwrap_or_else(|_| raw.to_path_buf());
        if resolved.as_os_str().is_empty() {
            Self::Unset
        } else {
            Self::Local(resolved)
        }
    }

    /// Parse `s` as a URL.
    pub fn from_url(s: &str) -> Result<Self, VaultError> {
        Url::parse(s)
            .map(Self::Remote)
            .map_err(|source| VaultError::Parse {
                input: s.to_string(),
                source,
            })
    }

    /// Heuristic entry point for free-form user input (CLI argument, path
    /// editor): URL-looking strings and document URIs parse as URLs,
    /// everything else is treated as a filesystem path.
    pub fn parse(s: &str) -> Result<Self, VaultError> {
        let s = s.trim();
        if is_likely_url(s) || s.starts_with(BRIDGED_SCHEME_PREFIX) {
            Self::from_url(s)
        } else {
            Ok(Self::from_path(s))
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// The string form used as a content-access key: the path for local
    /// locations, the serialised URL for remote ones, empty when unset.
    pub fn as_key(&self) -> String {
        match self {
            Self::Unset => String::new(),
            Self::Local(path) => path.to_string_lossy().into_owned(),
            Self::Remote(url) => url.as_str().to_string(),
        }
    }

    /// Leaf component (file or directory name).
    pub fn name(&self) -> String {
        match self {
            Self::Unset => String::new(),
            Self::Local(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned()),
            Self::Remote(url) => url
                .path_segments()
                .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Parent directory (local) or the URL with its last path segment removed.
    pub fn dir(&self) -> String {
        match self {
            Self::Unset => String::new(),
            Self::Local(path) => path
                .parent()
                .unwrap_or(path)
                .to_string_lossy()
                .into_owned(),
            Self::Remote(url) => {
                let mut parent = url.clone();
                let dir = Path::new(url.path())
                    .parent()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_else(|| url.path().to_string());
                parent.set_path(&dir);
                parent.to_string()
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

/// True iff `s` begins with `http://` or `https://`. Heuristic only.
pub fn is_likely_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// True iff the lowercased extension of `s` is `.md` or `.markdown`.
pub fn is_maybe_markdown(s: &str) -> bool {
    Path::new(s)
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "md" || ext == "markdown"
        })
        .unwrap_or(false)
}

/// The scanner's (stricter) test: the lowercased name ends in `.md`.
pub fn is_markdown_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".md")
}
