//! Filesystem infrastructure: implements `ApplicationSource` and `ArtifactSink`.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::debug;

use crate::application::ports::{ApplicationSource, ArtifactSink};
use crate::domain::{CatalogError, FileEntry};

/// Mode recorded for every entry of a client-built archive.
const ARCHIVE_ENTRY_MODE: u32 = 0o600;

/// Recursively list the regular files below `root`.
///
/// Paths come back relative to `root`, `/`-separated and prefixed with
/// `relative` (`"."` for the top call). Entries are visited in name order
/// within each directory. Symlinks are followed; anything that is neither a
/// directory nor a regular file is skipped.
///
/// # Errors
///
/// Returns `CatalogError::Io` if a directory cannot be listed, an entry cannot
/// be inspected, or a name is not valid UTF-8.
pub fn walk(root: &Path, relative: &str) -> Result<Vec<String>, CatalogError> {
    let entries = std::fs::read_dir(root)
        .map_err(|e| CatalogError::io(format!("cannot read directory {}", root.display()), e))?;
    let mut names = entries
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CatalogError::io(format!("cannot read directory {}", root.display()), e))?;
    names.sort();

    let mut files = Vec::new();
    for name in names {
        let path = root.join(&name);
        let Some(name) = name.to_str() else {
            return Err(CatalogError::io(
                format!("cannot push {}", path.display()),
                io::Error::new(io::ErrorKind::InvalidData, "file name is not valid UTF-8"),
            ));
        };
        let metadata = std::fs::metadata(&path)
            .map_err(|e| CatalogError::io(format!("cannot inspect {}", path.display()), e))?;
        let entry = format!("{relative}/{name}");
        if metadata.is_dir() {
            files.extend(walk(&path, &entry)?);
        } else if metadata.is_file() {
            files.push(entry);
        } else {
            debug!(path = %path.display(), "skipping special file");
        }
    }
    Ok(files)
}

/// An application tree on the local disk.
pub struct LocalApplicationDir {
    root: PathBuf,
}

impl LocalApplicationDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ApplicationSource for LocalApplicationDir {
    fn list_files(&self) -> Result<Vec<String>, CatalogError> {
        walk(&self.root, ".")
    }

    fn read_file(&self, relative_path: &str) -> Result<Vec<u8>, CatalogError> {
        let path = self.root.join(relative_path);
        std::fs::read(&path)
            .map_err(|e| CatalogError::io(format!("cannot read {}", path.display()), e))
    }
}

/// Output directory for pulled applications.
pub struct LocalArtifactDir {
    dir: PathBuf,
}

impl LocalArtifactDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSink for LocalArtifactDir {
    fn write_file(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, CatalogError> {
        write_atomically(&self.dir.join(file_name), |file| file.write_all(contents))
    }

    fn write_archive(&self, base_name: &str, files: &[FileEntry]) -> Result<PathBuf, CatalogError> {
        write_atomically(&self.dir.join(format!("{base_name}.tgz")), |file| {
            write_tar_gz(file, files)
        })
    }
}

/// Build a gzip-compressed tar of `files` into `out`.
///
/// # Errors
///
/// Returns an error if an entry path is absolute or escapes the archive root,
/// or if writing fails.
pub fn write_tar_gz(out: impl Write, files: &[FileEntry]) -> io::Result<()> {
    let mut builder = tar::Builder::new(GzEncoder::new(out, Compression::default()));
    for file in files {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_mode(ARCHIVE_ENTRY_MODE);
        header.set_size(file.contents.len() as u64);
        builder.append_data(&mut header, &file.relative_path, file.contents.as_slice())?;
    }
    builder.into_inner()?.finish()?;
    Ok(())
}

/// Write through a temporary file in the destination directory and rename it
/// into place, so an interrupted write never leaves a partial file behind.
fn write_atomically(
    path: &Path,
    write: impl FnOnce(&mut File) -> io::Result<()>,
) -> Result<PathBuf, CatalogError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let context = || format!("cannot write {}", path.display());
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| CatalogError::io(context(), e))?;
    write(tmp.as_file_mut()).map_err(|e| CatalogError::io(context(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| CatalogError::io(context(), e))?;
    tmp.persist(path)
        .map_err(|e| CatalogError::io(context(), e.error))?;
    debug!(path = %path.display(), "file written");
    Ok(path.to_path_buf())
}
