use thiserror::Error;

/// Expected outcomes of playlist operations that did not change anything.
///
/// None of these leave the chain in a different state than before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("playlist is empty")]
    EmptyPlaylist,

    #[error("track '{title}' not found")]
    NotFound { title: String },

    #[error("already at the end of the playlist")]
    AtEnd,

    #[error("already at the start of the playlist")]
    AtStart,
}
