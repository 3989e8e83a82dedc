use std::path::PathBuf;

use crate::{discogs::Release, internal_prelude::*};

/// Release metadata together with the local files it applies to.
///
/// Built once per run, read by the tagging step, never persisted.
#[derive(Clone, Debug)]
pub struct Album {
    pub artist: String,
    pub title: String,
    pub year: u32,
    pub genres: Vec<String>,
    pub tracklist: Vec<String>,
    pub files: Vec<PathBuf>,
}

impl Album {
    /// Pair a fetched release with the local file listing.
    ///
    /// The pairing is purely positional: the first local file gets the first
    /// remote track and so on. If the lengths disagree, both lists are
    /// truncated to the shorter one and a warning is logged.
    pub fn from_release(release: Release, mut files: Vec<PathBuf>) -> Result<Album> {
        let artist = release
            .artists
            .first()
            .map(|artist| artist.name.clone())
            .ok_or_eyre("Release doesn't list any artists")?;

        let mut tracklist: Vec<String> = release
            .tracklist
            .into_iter()
            .map(|track| track.title)
            .collect();

        if tracklist.len() != files.len() {
            warn!(
                "Release has {} tracks, but {} local files were found. Only the first {} will be tagged.",
                tracklist.len(),
                files.len(),
                tracklist.len().min(files.len()),
            );
        }
        let count = tracklist.len().min(files.len());
        tracklist.truncate(count);
        files.truncate(count);

        Ok(Album {
            artist,
            title: release.title,
            year: release.year,
            genres: release.genres,
            tracklist,
            files,
        })
    }
}
