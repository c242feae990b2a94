/// Direct filesystem backend.
use super::{ContentAccess, Entry, ListRequest};
use crate::error::VaultError;
use compact_str::CompactString;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Permission bits for files created by [`LocalFs::write`].
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// `std::fs`-backed [`ContentAccess`]. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl ContentAccess for LocalFs {
    fn read(&self, path: &str) -> Result<Vec<u8>, VaultError> {
        fs::read(path).map_err(|e| VaultError::io(path, e))
    }

    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), VaultError> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(NEW_FILE_MODE);
        }
        let mut file = options.open(path).map_err(|e| VaultError::io(path, e))?;
        file.write_all(bytes).map_err(|e| VaultError::io(path, e))
    }

    fn list(&self, request: ListRequest<'_>) -> Result<Vec<Entry>, VaultError> {
        let dir = request.target();
        let read_dir = fs::read_dir(dir).map_err(|e| VaultError::io(dir, e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| VaultError::io(dir, e))?;
            // `DirEntry::file_type` does not follow symlinks; a link to a
            // directory is listed as a file and filtered out by name.
            let is_dir = entry
                .file_type()
                .map(|t| t.is_dir())
                .map_err(|e| VaultError::io(entry.path().to_string_lossy(), e))?;
            entries.push(Entry {
                name: CompactString::new(entry.file_name().to_string_lossy()),
                is_dir,
                id: entry.path().to_string_lossy().into_owned(),
            });
        }
        Ok(entries)
    }

    fn display_name(&self, root: &str) -> Result<String, VaultError> {
        fs::metadata(root).map_err(|e| VaultError::io(root, e))?;
        let path = Path::new(root);
        Ok(path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.to_string()))
    }

    fn is_bridged_uri(&self, _path: &str) -> bool {
        false
    }
}
