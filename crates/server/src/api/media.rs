use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    extract::{Path as AxumPath, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;
use tracing::warn;

use crate::range::{parse_range_header, RangeError};
use crate::state::{AppState, JsonResult};
use crate::utils::{json_error, json_error_response, lookup_error, subtitle_error};

pub async fn get_image(
    State(state): State<AppState>,
    AxumPath((identifier, index)): AxumPath<(String, usize)>,
) -> Response {
    let path = match state
        .library
        .group(&identifier)
        .and_then(|group| group.image_path(index))
    {
        Ok(path) => path.to_path_buf(),
        Err(err) => return lookup_error(err).into_response(),
    };

    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(err) => {
            warn!("Failed to read image {}: {}", path.display(), err);
            return json_error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to read image");
        }
    };

    let mut response = Response::new(Body::from(data));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type(&path));
    response
}

pub async fn get_audio(
    State(state): State<AppState>,
    AxumPath((identifier, index)): AxumPath<(String, usize)>,
    headers: HeaderMap,
) -> Response {
    let path = match state
        .library
        .group(&identifier)
        .and_then(|group| group.resource_pair(index))
    {
        Ok(pair) => pair.audio.clone(),
        Err(err) => return lookup_error(err).into_response(),
    };

    match stream_file(&path, headers.get(header::RANGE)).await {
        Ok(response) => response,
        Err(err) => {
            warn!("Failed to stream audio {}: {}", path.display(), err);
            json_error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to read audio")
        }
    }
}

/// Captions of the subtitle paired with resource `index`, as
/// `[[seconds, text], ...]`.
pub async fn get_subtitle(
    State(state): State<AppState>,
    AxumPath((identifier, index)): AxumPath<(String, usize)>,
) -> JsonResult<Vec<(f64, String)>> {
    let path: PathBuf = state
        .library
        .group(&identifier)
        .and_then(|group| group.resource_pair(index))
        .map_err(lookup_error)?
        .subtitle
        .clone();

    let parsed = tokio::task::spawn_blocking(move || subtitles::parse_subtitle(&path))
        .await
        .map_err(|err| {
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("subtitle task failed: {}", err),
            )
        })?;
    let lines = parsed.map_err(subtitle_error)?;

    Ok(Json(
        lines
            .into_iter()
            .map(|line| (line.timestamp, line.text))
            .collect(),
    ))
}

async fn stream_file(
    path: &Path,
    range: Option<&HeaderValue>,
) -> Result<Response, std::io::Error> {
    let mut file = tokio::fs::File::open(path).await?;
    let size = file.metadata().await?.len();

    let range = match range.map(|value| value.to_str()) {
        None => None,
        Some(Ok(value)) => match parse_range_header(value, size) {
            Ok(range) => Some(range),
            Err(RangeError::Invalid) => {
                return Ok(json_error_response(StatusCode::BAD_REQUEST, "invalid range"))
            }
            Err(RangeError::Unsatisfiable) => {
                let mut response =
                    json_error_response(StatusCode::RANGE_NOT_SATISFIABLE, "range not satisfiable");
                if let Ok(value) = HeaderValue::from_str(&format!("bytes */{}", size)) {
                    response.headers_mut().insert(header::CONTENT_RANGE, value);
                }
                return Ok(response);
            }
        },
        Some(Err(_)) => return Ok(json_error_response(StatusCode::BAD_REQUEST, "invalid range")),
    };

    let mut response = match range {
        Some(range) => {
            file.seek(SeekFrom::Start(range.start)).await?;
            let body = Body::from_stream(ReaderStream::new(file.take(range.length())));
            let mut response = Response::new(body);
            *response.status_mut() = StatusCode::PARTIAL_CONTENT;
            response.headers_mut().insert(
                header::CONTENT_LENGTH,
                HeaderValue::from(range.length()),
            );
            if let Ok(value) = HeaderValue::from_str(&range.content_range(size)) {
                response.headers_mut().insert(header::CONTENT_RANGE, value);
            }
            response
        }
        None => {
            let mut response = Response::new(Body::from_stream(ReaderStream::new(file)));
            response
                .headers_mut()
                .insert(header::CONTENT_LENGTH, HeaderValue::from(size));
            response
        }
    };

    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type(path));
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    Ok(response)
}

fn content_type(path: &Path) -> HeaderValue {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    HeaderValue::from_str(mime.as_ref())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
}
