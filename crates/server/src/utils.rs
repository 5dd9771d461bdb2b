use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use library::LookupError;
use subtitles::SubtitleError;

use crate::state::ErrorResponse;

pub fn json_error(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub fn json_error_response(status: StatusCode, message: impl Into<String>) -> Response {
    json_error(status, message).into_response()
}

pub fn lookup_error(err: LookupError) -> (StatusCode, Json<ErrorResponse>) {
    json_error(StatusCode::NOT_FOUND, err.to_string())
}

pub fn subtitle_error(err: SubtitleError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        SubtitleError::UnsupportedFormat(_) => StatusCode::NOT_IMPLEMENTED,
        SubtitleError::Io(_) | SubtitleError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_error(status, err.to_string())
}
