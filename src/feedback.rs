//! User-facing messages for playlist results.
//!
//! The playlist only returns values; shells turn them into [`Feedback`] and
//! decide how to show it.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{domain::track::Track, playlist::PlaylistError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Warning,
    Error,
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Level::Success => "ok",
            Level::Warning => "warning",
            Level::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub level: Level,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    pub fn added(title: &str, artist: &str) -> Self {
        Self::success(format!("Added: {title} by {artist}"))
    }

    pub fn deleted(title: &str, result: &Result<Track, PlaylistError>) -> Self {
        match result {
            Ok(_) => Self::success(format!("Deleted: {title}")),
            Err(PlaylistError::EmptyPlaylist) => {
                Self::error(format!("Cannot delete '{title}'. Playlist is empty."))
            }
            Err(PlaylistError::NotFound { title }) => {
                Self::error(format!("Song '{title}' not found."))
            }
            Err(other) => Self::error(other.to_string()),
        }
    }

    /// feedback for `advance` / `retreat`
    pub fn navigated(result: &Result<&Track, PlaylistError>) -> Self {
        match result {
            Ok(track) => Self::now_playing(Some(track)),
            Err(PlaylistError::AtEnd) => Self::warning("End of playlist."),
            Err(PlaylistError::AtStart) => Self::warning("Already at the beginning."),
            Err(PlaylistError::EmptyPlaylist) => Self::warning("Playlist is empty."),
            Err(other) => Self::error(other.to_string()),
        }
    }

    pub fn now_playing(current: Option<&Track>) -> Self {
        match current {
            Some(track) => Self::success(format!("Now playing: {track}")),
            None => Self::warning("Playlist is empty or no song is selected."),
        }
    }

    pub fn missing_upload_fields() -> Self {
        Self::warning("Please fill all fields and upload a file.")
    }

    pub fn is_success(&self) -> bool {
        self.level == Level::Success
    }
}

impl Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::Playlist;

    #[test]
    fn test_delete_messages() {
        let mut playlist = Playlist::new();

        let empty = playlist.delete("A");
        assert_eq!(
            Feedback::deleted("A", &empty),
            Feedback::error("Cannot delete 'A'. Playlist is empty.")
        );

        playlist.add("A", "X", vec![]);
        let missing = playlist.delete("B");
        assert_eq!(
            Feedback::deleted("B", &missing),
            Feedback::error("Song 'B' not found.")
        );

        let removed = playlist.delete("A");
        assert_eq!(
            Feedback::deleted("A", &removed),
            Feedback::success("Deleted: A")
        );
    }

    #[test]
    fn test_navigation_messages() {
        let mut playlist = Playlist::new();
        assert_eq!(
            Feedback::navigated(&playlist.advance()),
            Feedback::warning("Playlist is empty.")
        );

        playlist.add("A", "X", vec![]);
        playlist.add("B", "Y", vec![]);
        assert_eq!(
            Feedback::navigated(&playlist.retreat()),
            Feedback::warning("Already at the beginning.")
        );
        assert_eq!(
            Feedback::navigated(&playlist.advance()),
            Feedback::success("Now playing: B by Y")
        );
        assert_eq!(
            Feedback::navigated(&playlist.advance()),
            Feedback::warning("End of playlist.")
        );
    }

    #[test]
    fn test_now_playing_without_track() {
        let feedback = Feedback::now_playing(None);

        assert!(!feedback.is_success());
        assert_eq!(
            feedback.to_string(),
            "[warning] Playlist is empty or no song is selected."
        );
    }

    #[test]
    fn test_serializes_lowercase_level() -> anyhow::Result<()> {
        let json = serde_json::to_string(&Feedback::added("A", "X"))?;

        assert_eq!(json, r#"{"level":"success","message":"Added: A by X"}"#);

        Ok(())
    }
}
