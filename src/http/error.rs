use rouille::Response;
use thiserror::Error;

use crate::{feedback::Feedback, playlist::PlaylistError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(Feedback),

    /// the playlist state does not allow the operation (empty, at a boundary)
    #[error("{0}")]
    Conflict(Feedback),

    #[error("{0}")]
    BadRequest(Feedback),

    #[error("{0}")]
    PayloadTooLarge(Feedback),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Wraps already-rendered feedback for a failed playlist operation.
    pub fn from_playlist(err: &PlaylistError, feedback: Feedback) -> Self {
        match err {
            PlaylistError::NotFound { .. } => ApiError::NotFound(feedback),
            PlaylistError::EmptyPlaylist | PlaylistError::AtEnd | PlaylistError::AtStart => {
                ApiError::Conflict(feedback)
            }
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::BadRequest(_) => 400,
            ApiError::PayloadTooLarge(_) => 413,
            ApiError::Internal(_) => 500,
        }
    }

    pub fn into_response(self) -> Response {
        let status = self.status_code();
        let feedback = match self {
            ApiError::NotFound(feedback)
            | ApiError::Conflict(feedback)
            | ApiError::BadRequest(feedback)
            | ApiError::PayloadTooLarge(feedback) => feedback,

            ApiError::Internal(msg) => {
                log::error!("internal error: {msg}");
                Feedback::error("internal server error")
            }
        };
        Response::json(&feedback).with_status_code(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_errors_map_to_status() {
        let feedback = Feedback::warning("x");

        let not_found = PlaylistError::NotFound {
            title: "A".to_string(),
        };
        assert_eq!(
            ApiError::from_playlist(&not_found, feedback.clone()).status_code(),
            404
        );
        for err in [
            PlaylistError::EmptyPlaylist,
            PlaylistError::AtEnd,
            PlaylistError::AtStart,
        ] {
            assert_eq!(
                ApiError::from_playlist(&err, feedback.clone()).status_code(),
                409
            );
        }
    }

    #[test]
    fn test_internal_hides_details() {
        let response = ApiError::Internal("lock poisoned".to_string()).into_response();

        assert_eq!(response.status_code, 500);
    }
}
