use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("filesystem error at {}: {source}", .path.display())]
    Fs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a supported music file", .0.display())]
    NotMusic(PathBuf),

    #[error("title, artist and payload are required")]
    MissingFields,
}
