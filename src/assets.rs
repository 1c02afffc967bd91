//! Static asset replication.
//!
//! Stylesheets and scripts referenced by the templates live in one
//! directory tree. After a document is written, the tree is copied next
//! to it, keeping relative paths, so the output page finds
//! `static/styles.css` and friends.
//!
//! The tree shipped with the crate is compiled into the library; a tree
//! on disk can be used instead with [`replicate`].

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Directory under the base directory holding the asset tree.
pub const ASSET_DIR: &str = "assets";

static BUNDLED_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Write the built-in asset tree into the directory that contains
/// `output_path`. Returns the number of files written.
pub fn replicate_bundled(output_path: &Path) -> Result<usize> {
    let dest_root = destination_root(output_path);
    let copied = write_bundled(&BUNDLED_ASSETS, &dest_root)?;
    log::debug!(
        "wrote {} bundled assets into {}",
        copied,
        dest_root.display()
    );
    Ok(copied)
}

fn write_bundled(dir: &Dir<'_>, dest_root: &Path) -> Result<usize> {
    let mut copied = 0;

    for file in dir.files() {
        let dest = dest_root.join(file.path());
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::AssetCopy {
                path: dest.clone(),
                source,
            })?;
        }
        fs::write(&dest, file.contents()).map_err(|source| Error::AssetCopy {
            path: dest.clone(),
            source,
        })?;
        log::trace!("wrote {}", dest.display());
        copied += 1;
    }

    for sub in dir.dirs() {
        copied += write_bundled(sub, dest_root)?;
    }
    Ok(copied)
}

/// Copy every regular file under `asset_root` into the directory that
/// contains `output_path`.
///
/// Intermediate directories are created as needed and existing files
/// are overwritten. An output located inside `asset_root` is rejected
/// before anything is copied. Returns the number of files copied.
pub fn replicate(asset_root: &Path, output_path: &Path) -> Result<usize> {
    let dest_root = destination_root(output_path);
    ensure_outside(asset_root, &dest_root, output_path)?;
    let mut copied = 0;

    for entry in WalkDir::new(asset_root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(asset_root, e))?;
        if entry.file_type().is_dir() {
            continue;
        }

        let src = entry.path();
        let relative = src.strip_prefix(asset_root).map_err(|e| Error::AssetCopy {
            path: src.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, e),
        })?;
        let dest = dest_root.join(relative);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::AssetCopy {
                path: dest.clone(),
                source,
            })?;
        }
        fs::copy(src, &dest).map_err(|source| Error::AssetCopy {
            path: src.to_path_buf(),
            source,
        })?;

        log::trace!("copied {} -> {}", src.display(), dest.display());
        copied += 1;
    }

    log::debug!("replicated {} assets into {}", copied, dest_root.display());
    Ok(copied)
}

fn destination_root(output_path: &Path) -> PathBuf {
    match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn ensure_outside(asset_root: &Path, dest_root: &Path, output_path: &Path) -> Result<()> {
    let root = asset_root.canonicalize().map_err(|source| Error::AssetCopy {
        path: asset_root.to_path_buf(),
        source,
    })?;
    let dest = resolve_lenient(dest_root).map_err(|source| Error::AssetCopy {
        path: dest_root.to_path_buf(),
        source,
    })?;

    if dest.starts_with(&root) {
        return Err(Error::AssetCopy {
            path: output_path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("output lies inside the asset directory {}", asset_root.display()),
            ),
        });
    }
    Ok(())
}

/// Canonicalize the longest existing ancestor of `path` and append the
/// components that do not exist yet.
fn resolve_lenient(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut missing: Vec<OsString> = Vec::new();

    loop {
        let target = if existing.as_os_str().is_empty() {
            Path::new(".")
        } else {
            existing
        };
        match target.canonicalize() {
            Ok(base) => {
                return Ok(missing.iter().rev().fold(base, |acc, name| acc.join(name)));
            }
            Err(err) => match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name.to_os_string());
                    existing = parent;
                }
                _ => return Err(err),
            },
        }
    }
}

fn walk_error(asset_root: &Path, err: walkdir::Error) -> Error {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| asset_root.to_path_buf());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
    Error::AssetCopy { path, source }
}
