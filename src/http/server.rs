use log::info;
use rouille::{Request, Response};
use serde::{Deserialize, Serialize};
use std::{
    io::Read,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    config::HttpConfig,
    domain::track::Track,
    feedback::Feedback,
    http::error::ApiError,
    import::{Upload, error::ImportError},
    playlist::{Entry, Playlist, PlaylistError},
};

const STREAM_MIME: &str = "audio/mpeg";

/// Serves one shared playlist to every client.
///
/// The mutex makes each playlist operation atomic relative to other requests.
pub struct HttpServer {
    playlist: Arc<Mutex<Playlist>>,
    pub config: HttpConfig,
}

impl HttpServer {
    pub fn new(playlist: Playlist, config: HttpConfig) -> Self {
        Self {
            playlist: Arc::new(Mutex::new(playlist)),
            config,
        }
    }

    pub fn run(self) {
        let addr = format!("{}:{}", self.config.bind_addr, self.config.port);
        rouille::start_server(addr, move |request| self.handle_request(request));
    }

    fn handle_request(&self, request: &Request) -> Response {
        Self::log_request(request);

        let result = rouille::router!(request,
            (GET) (/) => {
                Ok(Response::html(include_str!("../../html/index.html")))
            },
            (GET) (/playlist) => {
                self.get_playlist()
            },
            (POST) (/tracks) => {
                self.add_track(request)
            },
            (DELETE) (/tracks) => {
                self.delete_track(request)
            },
            (POST) (/playlist/next) => {
                self.advance()
            },
            (POST) (/playlist/prev) => {
                self.retreat()
            },
            (GET) (/playlist/current) => {
                self.get_current()
            },
            (GET) (/playlist/current/stream) => {
                self.stream_current()
            },
            _ => Ok(Response::empty_404())
        );

        let response = result.unwrap_or_else(ApiError::into_response);
        info!("Response: {} {}", request.method(), response.status_code);
        response
    }

    fn log_request(request: &Request) {
        info!("{} {}", request.method(), request.url());
    }

    fn lock(&self) -> Result<MutexGuard<'_, Playlist>, ApiError> {
        self.playlist
            .lock()
            .map_err(|e| ApiError::Internal(format!("Could not access playlist under lock: {e}")))
    }

    fn get_playlist(&self) -> Result<Response, ApiError> {
        let playlist = self.lock()?;
        Ok(Response::json(&PlaylistResponse::from_domain(&playlist)))
    }

    /// Query carries the metadata, the body is the raw payload.
    fn add_track(&self, request: &Request) -> Result<Response, ApiError> {
        let title = request.get_param("title").unwrap_or_default();
        let artist = request.get_param("artist").unwrap_or_default();
        let payload = self.read_payload(request)?;

        let upload = Upload::new(title, artist, payload).map_err(|err| match err {
            ImportError::MissingFields => ApiError::BadRequest(Feedback::missing_upload_fields()),
            other => ApiError::BadRequest(Feedback::error(other.to_string())),
        })?;
        log::debug!(
            "UPLOAD '{}' by '{}', {} bytes",
            upload.title,
            upload.artist,
            upload.payload.len()
        );

        let mut playlist = self.lock()?;
        let feedback = upload.add_to(&mut playlist);
        Ok(Response::json(&feedback).with_status_code(201))
    }

    fn read_payload(&self, request: &Request) -> Result<Vec<u8>, ApiError> {
        let Some(body) = request.data() else {
            return Ok(Vec::new());
        };
        let read_err = |e: std::io::Error| ApiError::Internal(format!("Could not read upload: {e}"));

        let mut payload = Vec::new();
        match self.config.max_upload_bytes {
            Some(limit) => {
                body.take(limit.saturating_add(1))
                    .read_to_end(&mut payload)
                    .map_err(read_err)?;
                if payload.len() as u64 > limit {
                    return Err(ApiError::PayloadTooLarge(Feedback::error(format!(
                        "Upload exceeds the {limit} byte limit."
                    ))));
                }
            }
            None => {
                let mut body = body;
                body.read_to_end(&mut payload).map_err(read_err)?;
            }
        }
        Ok(payload)
    }

    fn delete_track(&self, request: &Request) -> Result<Response, ApiError> {
        let title = request
            .get_param("title")
            .filter(|title| !title.is_empty())
            .ok_or_else(|| ApiError::BadRequest(Feedback::warning("Please enter a title to delete.")))?;

        let mut playlist = self.lock()?;
        let result = playlist.delete(&title);
        let feedback = Feedback::deleted(&title, &result);
        match result {
            Ok(_) => Ok(Response::json(&feedback)),
            Err(err) => Err(ApiError::from_playlist(&err, feedback)),
        }
    }

    fn advance(&self) -> Result<Response, ApiError> {
        let mut playlist = self.lock()?;
        Self::navigation_response(playlist.advance())
    }

    fn retreat(&self) -> Result<Response, ApiError> {
        let mut playlist = self.lock()?;
        Self::navigation_response(playlist.retreat())
    }

    fn navigation_response(
        result: Result<&Track, PlaylistError>,
    ) -> Result<Response, ApiError> {
        let feedback = Feedback::navigated(&result);
        match result {
            Ok(_) => Ok(Response::json(&feedback)),
            Err(err) => Err(ApiError::from_playlist(&err, feedback)),
        }
    }

    fn get_current(&self) -> Result<Response, ApiError> {
        let playlist = self.lock()?;
        let track = playlist
            .peek_current()
            .ok_or_else(|| ApiError::Conflict(Feedback::now_playing(None)))?;
        let position = playlist.current_position().unwrap_or_default();

        Ok(Response::json(&CurrentResponse::from_domain(track, position)))
    }

    /// hands the current payload to the browser's audio element
    fn stream_current(&self) -> Result<Response, ApiError> {
        let playlist = self.lock()?;
        let track = playlist
            .peek_current()
            .ok_or_else(|| ApiError::Conflict(Feedback::now_playing(None)))?;
        log::debug!(
            "STREAM '{}' -> 200 OK, {} bytes",
            track,
            track.payload().len()
        );

        Ok(Response::from_data(STREAM_MIME, track.payload().to_vec())
            .with_additional_header("X-Track-Title", track.title().to_string())
            .with_additional_header("X-Track-Artist", track.artist().to_string()))
    }
}

#[derive(Serialize, Deserialize)]
struct PlaylistResponse {
    length: usize,
    /// 1-based position of the current track
    current: Option<usize>,
    entries: Vec<EntryResponse>,
}

#[derive(Serialize, Deserialize)]
struct EntryResponse {
    position: usize,
    title: String,
    artist: String,
    current: bool,
    line: String,
    digest: String,
}

#[derive(Serialize, Deserialize)]
struct CurrentResponse {
    position: usize,
    title: String,
    artist: String,
    size: usize,
    digest: String,
}

impl PlaylistResponse {
    fn from_domain(playlist: &Playlist) -> Self {
        Self {
            length: playlist.len(),
            current: playlist.current_position(),
            entries: playlist.entries().map(EntryResponse::from_domain).collect(),
        }
    }
}

impl EntryResponse {
    fn from_domain(entry: Entry<'_>) -> Self {
        Self {
            position: entry.position,
            title: entry.track.title().to_string(),
            artist: entry.track.artist().to_string(),
            current: entry.is_current,
            line: entry.to_string(),
            digest: entry.track.digest().to_hex(),
        }
    }
}

impl CurrentResponse {
    fn from_domain(track: &Track, position: usize) -> Self {
        Self {
            position,
            title: track.title().to_string(),
            artist: track.artist().to_string(),
            size: track.payload().len(),
            digest: track.digest().to_hex(),
        }
    }
}

#[cfg(test)]
pub fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: rouille::Response,
) -> anyhow::Result<T> {
    Ok(serde_json::from_reader(
        response.data.into_reader_and_size().0,
    )?)
}
