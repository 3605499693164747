use std::fmt::{self, Display};

use super::Node;
use crate::domain::track::Track;

const CURRENT_MARKER: &str = "▶ ";
const PLAIN_MARKER: &str = "  ";

/// Borrowing iterator over the tracks of a playlist, head to tail.
pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iter<'a> {
    pub(super) fn new(head: Option<&'a Node>) -> Self {
        Self { next: head }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Track;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.track
        })
    }
}

/// One row of the rendered playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// 1-based
    pub position: usize,
    pub track: &'a Track,
    pub is_current: bool,
}

impl Display for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_current {
            CURRENT_MARKER
        } else {
            PLAIN_MARKER
        };
        write!(
            f,
            "{marker}{}. {} by {}",
            self.position,
            self.track.title(),
            self.track.artist()
        )
    }
}

pub struct Entries<'a> {
    tracks: Iter<'a>,
    index: usize,
    current: Option<usize>,
}

impl<'a> Entries<'a> {
    pub(super) fn new(tracks: Iter<'a>, current: Option<usize>) -> Self {
        Self {
            tracks,
            index: 0,
            current,
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let track = self.tracks.next()?;
        let entry = Entry {
            position: self.index + 1,
            track,
            is_current: self.current == Some(self.index),
        };
        self.index += 1;
        Some(entry)
    }
}

/// Display lines of a playlist, see [`super::Playlist::render`].
pub struct Render<'a> {
    entries: Entries<'a>,
}

impl<'a> Render<'a> {
    pub(super) fn new(entries: Entries<'a>) -> Self {
        Self { entries }
    }
}

impl Iterator for Render<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|entry| entry.to_string())
    }
}
