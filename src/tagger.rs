use lofty::{
    config::WriteOptions,
    prelude::{Accessor, TagExt},
    tag::{Tag, TagType},
};

use crate::{internal_prelude::*, models::Album};

/// Write the album metadata into each file's Vorbis comments.
///
/// Files are written one at a time, immediately, with a progress line after
/// each save. A failed write aborts the remaining batch and leaves earlier
/// files tagged.
pub fn tag_tracks(album: &Album) -> Result<()> {
    let genre = album
        .genres
        .first()
        .ok_or_eyre("Release doesn't list any genres")?;

    let total = album.tracklist.len();
    for (index, (file, title)) in album.files.iter().zip(&album.tracklist).enumerate() {
        let track_number = index as u32 + 1;
        debug!("Writing {title:?} to {file:?}");

        let mut tag = Tag::new(TagType::VorbisComments);
        tag.set_title(title.clone());
        tag.set_album(album.title.clone());
        tag.set_artist(album.artist.clone());
        tag.set_year(album.year);
        tag.set_genre(genre.clone());
        tag.set_track(track_number);

        tag.save_to_path(file, WriteOptions::new())
            .wrap_err_with(|| format!("Failed to write tags to {file:?}"))?;

        println!("Tagged track {track_number} of {total}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use lofty::{file::TaggedFileExt, probe::Probe};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    /// A FLAC stream with a single STREAMINFO block and no audio frames.
    /// 44.1kHz, stereo, 16 bit, zero total samples.
    fn write_empty_flac(path: &Path) {
        let mut data = Vec::new();
        data.extend_from_slice(b"fLaC");
        // Block header: last-metadata-block flag, type 0, length 34.
        data.extend_from_slice(&[0x80, 0x00, 0x00, 0x22]);
        data.extend_from_slice(&[
            0x10, 0x00, // min block size
            0x10, 0x00, // max block size
            0x00, 0x00, 0x00, // min frame size
            0x00, 0x00, 0x00, // max frame size
            0x0A, 0xC4, 0x42, 0xF0, 0x00, 0x00, 0x00, 0x00, // rate/channels/bps/samples
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // md5
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ]);
        std::fs::write(path, data).unwrap();
    }

    fn album(files: Vec<PathBuf>, tracklist: Vec<String>) -> Album {
        Album {
            artist: "DJ Shadow".to_string(),
            title: "Endtroducing.....".to_string(),
            year: 1996,
            genres: vec!["Electronic".to_string(), "Hip Hop".to_string()],
            tracklist,
            files,
        }
    }

    /// All six fields come back out of the file after tagging, with the
    /// 1-based track number matching the file's position.
    #[test]
    fn tagged_fields_survive_a_round_trip() {
        let dir = tempdir().unwrap();
        let mut files = Vec::new();
        for name in ["01 Track.flac", "02 Track.flac"] {
            let path = dir.path().join(name);
            write_empty_flac(&path);
            files.push(path);
        }

        let album = album(
            files.clone(),
            vec!["First".to_string(), "Second".to_string()],
        );
        tag_tracks(&album).unwrap();

        for (index, file) in files.iter().enumerate() {
            let tagged = Probe::open(file).unwrap().read().unwrap();
            let tag = tagged.primary_tag().unwrap();

            assert_eq!(tag.title().as_deref(), Some(album.tracklist[index].as_str()));
            assert_eq!(tag.album().as_deref(), Some("Endtroducing....."));
            assert_eq!(tag.artist().as_deref(), Some("DJ Shadow"));
            assert_eq!(tag.year(), Some(1996));
            assert_eq!(tag.genre().as_deref(), Some("Electronic"));
            assert_eq!(tag.track(), Some(index as u32 + 1));
        }
    }

    /// Only the first genre is written, the rest of the list is ignored.
    #[test]
    fn only_the_first_genre_is_used() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("01.flac");
        write_empty_flac(&path);

        let album = album(vec![path.clone()], vec!["First".to_string()]);
        tag_tracks(&album).unwrap();

        let tagged = Probe::open(&path).unwrap().read().unwrap();
        let tag = tagged.primary_tag().unwrap();
        assert_eq!(tag.genre().as_deref(), Some("Electronic"));
    }

    #[test]
    fn empty_genre_list_is_an_error() {
        let mut album = album(Vec::new(), Vec::new());
        album.genres.clear();

        assert!(tag_tracks(&album).is_err());
    }

    /// A file that isn't actually a FLAC stream aborts the batch.
    #[test]
    fn unwritable_file_aborts_the_batch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("01.flac");
        std::fs::write(&path, b"not a flac stream").unwrap();

        let album = album(vec![path], vec!["First".to_string()]);

        assert!(tag_tracks(&album).is_err());
    }
}
