//! Zip archive access for packaged crates.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use crate::error::{PackError, PackResult};

/// Result of extracting an archive.
#[derive(Clone, Debug)]
pub struct ExtractedCrate {
    /// Directory the archive was extracted into.
    pub dir: PathBuf,
    /// Number of regular files written.
    pub files: usize,
}

/// A zipped RO-Crate opened for reading.
pub struct CrateArchive {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl std::fmt::Debug for CrateArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrateArchive")
            .field("path", &self.path)
            .field("entries", &self.archive.len())
            .finish()
    }
}

impl CrateArchive {
    /// Open a zip archive.
    pub fn open(path: &Path) -> PackResult<Self> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(file)?;
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries, directories included.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Entry names in archive order.
    pub fn entry_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    /// Extract every entry below `dir`.
    ///
    /// Returns only once all entries are written. Any entry whose name would
    /// land outside `dir` aborts the extraction. `dir` must be absent or
    /// empty so no document of an earlier extraction can be read back.
    pub fn extract_to(&mut self, dir: &Path) -> PackResult<ExtractedCrate> {
        if dir.exists() && std::fs::read_dir(dir)?.next().is_some() {
            return Err(PackError::TargetNotEmpty {
                path: dir.to_path_buf(),
            });
        }
        std::fs::create_dir_all(dir)?;
        let mut files = 0;

        for i in 0..self.archive.len() {
            let mut entry = self.archive.by_index(i)?;
            let relative = entry
                .enclosed_name()
                .map(|p| p.to_path_buf())
                .ok_or_else(|| PackError::UnsafeEntry {
                    name: entry.name().to_string(),
                })?;
            let out_path = dir.join(relative);

            if entry.is_dir() {
                std::fs::create_dir_all(&out_path)?;
                continue;
            }
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&out_path)?;
            io::copy(&mut entry, &mut out)?;
            files += 1;
        }

        debug!(archive = %self.path.display(), dir = %dir.display(), files, "extracted crate");
        Ok(ExtractedCrate {
            dir: dir.to_path_buf(),
            files,
        })
    }
}
