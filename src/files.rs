use std::{
    fs::read_dir,
    path::{Path, PathBuf},
};

use crate::internal_prelude::*;

/// File extensions that are considered for tagging.
///
/// Compared case-insensitively, so `.FLAC` files are picked up as well.
const EXTENSIONS: &[&str] = &["flac"];

/// Recursively collect all audio files below `root`.
///
/// Directories are visited depth-first in lexicographic order and filenames
/// are sorted within each directory. This order determines which remote
/// track each file is paired with, so it has to be stable.
pub fn collect_audio_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("Input path {root:?} isn't a directory");
    }

    let mut files = Vec::new();
    collect_directory(root, &mut files)?;

    info!("Found {} audio files below {root:?}", files.len());
    Ok(files)
}

/// Handle a single directory: matching files first, subdirectories after.
fn collect_directory(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = Vec::new();
    for entry in read_dir(dir).wrap_err_with(|| format!("Couldn't read directory {dir:?}"))? {
        let entry = entry.wrap_err("Couldn't open directory entry.")?;
        entries.push(entry.path());
    }
    entries.sort();

    for path in &entries {
        if !path.is_file() {
            continue;
        }
        if has_audio_extension(path) {
            files.push(path.clone());
        } else {
            trace!("Skipping {path:?}");
        }
    }

    for path in &entries {
        if path.is_dir() {
            collect_directory(path, files)?;
        }
    }

    Ok(())
}

fn has_audio_extension(path: &Path) -> bool {
    let Some(extension) = path.extension().and_then(|extension| extension.to_str()) else {
        return false;
    };

    EXTENSIONS
        .iter()
        .any(|candidate| extension.eq_ignore_ascii_case(candidate))
}
