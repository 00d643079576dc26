//! Clip discovery and the wrapping playlist cursor.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StartupError;

/// Fixed, non-empty list of clips with a cursor that wraps around.
#[derive(Debug, Clone)]
pub struct Playlist {
    clips: Vec<PathBuf>,
    cursor: usize,
}

impl Playlist {
    /// Build a playlist, rejecting an empty one.
    pub fn new(clips: Vec<PathBuf>, dir: &Path) -> Result<Self, StartupError> {
        if clips.is_empty() {
            return Err(StartupError::NoClipsFound { dir: dir.to_path_buf() });
        }
        Ok(Playlist { clips, cursor: 0 })
    }

    pub fn current(&self) -> &Path {
        &self.clips[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn clips(&self) -> &[PathBuf] {
        &self.clips
    }

    /// Move to the next clip, wrapping to the first after the last.
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.clips.len();
    }
}

/// List regular files in `dir` whose suffix matches `extension` (case-insensitive,
/// a leading dot is ignored).
/// Subdirectories are not descended. Sorted by file name.
pub fn list_clips(dir: &Path, extension: &str) -> Result<Playlist, StartupError> {
    let extension = extension.trim_start_matches('.');
    let read_err = |cause: std::io::Error| StartupError::ReadDir {
        dir: dir.to_path_buf(),
        cause,
    };

    let mut clips = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            clips.push(path);
        }
    }
    clips.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Playlist::new(clips, dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn names(playlist: &Playlist) -> Vec<String> {
        playlist
            .clips()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.wav");
        touch(dir.path(), "a.WAV");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "wav");
        fs::create_dir(dir.path().join("nested.wav")).unwrap();

        let playlist = list_clips(dir.path(), "wav").unwrap();
        assert_eq!(names(&playlist), vec!["a.WAV", "b.wav"]);
    }

    #[test]
    fn leading_dot_in_extension_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.wav");
        let playlist = list_clips(dir.path(), ".wav").unwrap();
        assert_eq!(names(&playlist), vec!["a.wav"]);
    }

    #[test]
    fn empty_directory_is_no_clips_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_clips(dir.path(), "wav").unwrap_err();
        assert!(matches!(err, StartupError::NoClipsFound { .. }));
    }

    #[test]
    fn directory_without_matching_files_is_no_clips_found() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "readme.md");
        let err = list_clips(dir.path(), "wav").unwrap_err();
        assert!(matches!(err, StartupError::NoClipsFound { .. }));
    }

    #[test]
    fn missing_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_clips(&dir.path().join("absent"), "wav").unwrap_err();
        assert!(matches!(err, StartupError::ReadDir { .. }));
    }

    #[test]
    fn cursor_starts_at_zero_and_wraps() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.wav", "a.wav", "b.wav"] {
            touch(dir.path(), name);
        }
        let mut playlist = list_clips(dir.path(), "wav").unwrap();
        assert_eq!(playlist.cursor(), 0);
        assert!(playlist.current().ends_with("a.wav"));

        for _ in 0..playlist.len() {
            playlist.advance();
        }
        assert_eq!(playlist.cursor(), 0);
    }

    #[test]
    fn full_cycle_returns_to_start_for_any_length() {
        for len in 1..8 {
            let clips = (0..len).map(|i| PathBuf::from(format!("{i}.wav"))).collect();
            let mut playlist = Playlist::new(clips, Path::new(".")).unwrap();
            playlist.advance();
            let start = playlist.cursor();
            for _ in 0..len {
                playlist.advance();
            }
            assert_eq!(playlist.cursor(), start, "length {len}");
        }
    }
}
