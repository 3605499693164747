use std::fmt::{self, Display};

use super::hash::PayloadDigest;

/// Represent a music track held by a playlist.
///
/// The payload is kept as opaque bytes; nothing here decodes audio.
#[derive(Clone, PartialEq, Eq)]
pub struct Track {
    title: String,
    artist: String,
    payload: Vec<u8>,
}

impl Track {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            payload,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn digest(&self) -> PayloadDigest {
        PayloadDigest::of(&self.payload)
    }
}

impl Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.artist)
    }
}

// payloads can be megabytes, only their size is printed
impl fmt::Debug for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Track")
            .field("title", &self.title)
            .field("artist", &self.artist)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_by_artist() {
        let track = Track::new("Blue", "Joni", vec![1, 2, 3]);
        assert_eq!(track.to_string(), "Blue by Joni");
    }

    #[test]
    fn test_debug_hides_payload_bytes() {
        let track = Track::new("Blue", "Joni", vec![7; 4096]);
        let debug = format!("{track:?}");

        assert!(debug.contains("payload_len: 4096"));
        assert!(!debug.contains("7, 7"));
    }
}
