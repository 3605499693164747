//! Ordered playback queue stored as a singly linked chain of tracks.
//!
//! Every node owns its successor, so the chain cannot form cycles and dropping
//! the [`Playlist`] releases every track. The "current" cursor is the zero-based
//! position of the active node: a position names exactly one node, so cursor
//! comparisons never depend on titles or artists being unique.

use std::fmt;

use log::debug;

use crate::domain::track::Track;

pub mod error;
mod render;

pub use error::PlaylistError;
pub use render::{Entries, Entry, Iter, Render};

struct Node {
    track: Track,
    next: Option<Box<Node>>,
}

/// Link slot inside the chain: either `head` or some node's `next`.
type Link = Option<Box<Node>>;

/// Main structure that implements the playback queue.
#[derive(Default)]
pub struct Playlist {
    head: Link,
    /// position of the current node, `None` iff the chain is empty
    current: Option<usize>,
    length: usize,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a track at the tail.
    ///
    /// The first track added to an empty playlist also becomes current.
    /// Titles are not checked for duplicates.
    pub fn add(&mut self, title: impl Into<String>, artist: impl Into<String>, payload: Vec<u8>) {
        let track = Track::new(title, artist, payload);
        debug!("appending '{}' at position {}", track, self.length + 1);

        let length = self.length;
        let Some(tail) = self.link_mut(length) else {
            unreachable!("chain is shorter than its length {length}");
        };
        *tail = Some(Box::new(Node { track, next: None }));

        if self.current.is_none() {
            self.current = Some(0);
        }
        self.length += 1;
    }

    /// Removes the first track whose title is exactly `title` and hands it back.
    ///
    /// When the removed track was current, the cursor moves to its successor,
    /// or to its predecessor if it was the tail.
    pub fn delete(&mut self, title: &str) -> Result<Track, PlaylistError> {
        if self.length == 0 {
            return Err(PlaylistError::EmptyPlaylist);
        }

        let position = self
            .iter()
            .position(|track| track.title() == title)
            .ok_or_else(|| PlaylistError::NotFound {
                title: title.to_owned(),
            })?;

        let Some(slot) = self.link_mut(position) else {
            unreachable!("matched position {position} is outside the chain");
        };
        let Some(mut removed) = slot.take() else {
            unreachable!("matched position {position} holds no node");
        };
        *slot = removed.next.take();
        self.length -= 1;

        self.current = match self.current {
            _ if self.length == 0 => None,
            Some(current) if current == position && position == self.length => Some(position - 1),
            Some(current) if current > position => Some(current - 1),
            other => other,
        };

        debug!(
            "deleted '{}' from position {}, cursor now {:?}",
            removed.track,
            position + 1,
            self.current
        );
        Ok(removed.track)
    }

    /// Moves the cursor to the next track and returns it.
    pub fn advance(&mut self) -> Result<&Track, PlaylistError> {
        let current = self.current.ok_or(PlaylistError::EmptyPlaylist)?;
        if current + 1 >= self.length {
            return Err(PlaylistError::AtEnd);
        }

        self.current = Some(current + 1);
        Ok(self.expect_current())
    }

    /// Moves the cursor to the previous track and returns it.
    ///
    /// Nodes carry no backward link, so the predecessor is found by walking from
    /// the head.
    pub fn retreat(&mut self) -> Result<&Track, PlaylistError> {
        if self.head.is_none() {
            return Err(PlaylistError::EmptyPlaylist);
        }
        let current = self.current.ok_or(PlaylistError::EmptyPlaylist)?;
        if current == 0 {
            return Err(PlaylistError::AtStart);
        }

        let mut node = self.head.as_deref();
        let mut previous = 0;
        while let Some(candidate) = node {
            if previous + 1 == current {
                break;
            }
            node = candidate.next.as_deref();
            previous += 1;
        }
        debug_assert!(node.is_some(), "cursor {current} has no predecessor in the chain");

        self.current = Some(previous);
        Ok(self.expect_current())
    }

    /// Display lines in chain order, the current one marked with `▶`.
    ///
    /// The iterator is lazy; call again for a fresh pass.
    pub fn render(&self) -> Render<'_> {
        Render::new(self.entries())
    }

    pub fn entries(&self) -> Entries<'_> {
        Entries::new(self.iter(), self.current)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.head.as_deref())
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn peek_current(&self) -> Option<&Track> {
        self.iter().nth(self.current?)
    }

    /// 1-based position of the current track
    pub fn current_position(&self) -> Option<usize> {
        self.current.map(|position| position + 1)
    }

    /// Slot holding the node at `position`; `position == len` is the empty slot after the tail.
    fn link_mut(&mut self, position: usize) -> Option<&mut Link> {
        let mut link = &mut self.head;
        for _ in 0..position {
            link = &mut link.as_mut()?.next;
        }
        Some(link)
    }

    fn expect_current(&self) -> &Track {
        match self.peek_current() {
            Some(track) => track,
            None => unreachable!(
                "cursor {:?} points outside a chain of {}",
                self.current, self.length
            ),
        }
    }
}

impl Drop for Playlist {
    // unlink node by node, recursive Box drops overflow on long chains
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl fmt::Debug for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Playlist")
            .field("length", &self.length)
            .field("current", &self.current)
            .field("tracks", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
