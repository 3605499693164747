//! Module to acquire track payloads from the file system

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::{
    config::ImportConfig,
    feedback::Feedback,
    import::error::ImportError,
    playlist::Playlist,
};

pub mod error;

const MUSIC_EXTENSIONS: &[&str] = &["mp3", "flac", "wav", "m4a", "ogg", "aac"];

pub fn is_music_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MUSIC_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// A track ready to be queued: metadata checked, payload read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub title: String,
    pub artist: String,
    pub payload: Vec<u8>,
}

impl Upload {
    /// Fails when title or artist are blank or the payload is empty.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        payload: Vec<u8>,
    ) -> Result<Self, ImportError> {
        let title = title.into().trim().to_string();
        let artist = artist.into().trim().to_string();
        if title.is_empty() || artist.is_empty() || payload.is_empty() {
            return Err(ImportError::MissingFields);
        }
        Ok(Self {
            title,
            artist,
            payload,
        })
    }

    pub fn add_to(self, playlist: &mut Playlist) -> Feedback {
        let feedback = Feedback::added(&self.title, &self.artist);
        playlist.add(self.title, self.artist, self.payload);
        feedback
    }
}

/// Reads a music file from disk into an [`Upload`].
pub fn read_track(path: &Path, title: &str, artist: &str) -> Result<Upload, ImportError> {
    if !is_music_file(path) {
        return Err(ImportError::NotMusic(path.to_path_buf()));
    }
    let payload = std::fs::read(path).map_err(|source| ImportError::Fs {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", payload.len(), path.to_string_lossy());
    Upload::new(title, artist, payload)
}

/// Recursively collects music files under `root`, sorted by path.
pub fn scan_dir(follow_symlinks: bool, root: &Path, ignored_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let root_str = root.to_string_lossy();

    let mut paths = WalkDir::new(root)
        .follow_links(follow_symlinks)
        .into_iter()
        // keep the entry if it's not inside any ignored directory
        .filter_entry(|entry| {
            !ignored_dirs
                .iter()
                .any(|ignored| entry.path().starts_with(ignored))
        })
        .filter_map(|e| match e {
            Ok(e) => Some(e),
            Err(err) => {
                warn!("error while scanning dir {root_str}, skipping an entry: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|path| is_music_file(path))
        .collect::<Vec<_>>();

    paths.sort();
    paths
}

pub fn scan_dirs(config: &ImportConfig) -> Vec<PathBuf> {
    config
        .roots
        .iter()
        .flat_map(|root| scan_dir(config.follow_symlinks, root, &config.ignored_dirs))
        .collect()
}

/// Queues every music file under the configured roots.
///
/// Titles come from file stems (the whole file name when the stem is blank),
/// artists from `default_artist`. Files that cannot be read or are empty are
/// logged and skipped. Returns how many tracks were added.
pub fn import_into(playlist: &mut Playlist, config: &ImportConfig) -> usize {
    let mut added = 0;
    for path in scan_dirs(config) {
        match read_track(&path, &title_for(&path), &config.default_artist) {
            Ok(upload) => {
                upload.add_to(playlist);
                added += 1;
            }
            Err(err) => {
                warn!("skipping {}: {err}", path.to_string_lossy());
            }
        }
    }
    added
}

fn title_for(path: &Path) -> String {
    [path.file_stem(), path.file_name()]
        .into_iter()
        .flatten()
        .map(|name| name.to_string_lossy().trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_default()
}
