//! Error handling.

use axum::{
    http::header,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use thiserror::Error;
use tracing::{event, Level};

/// Climate API error type
///
/// This type encapsulates the various errors that may occur while answering a query.
/// None of them are recovered from; each one is rendered as an API error response.
#[derive(Debug, Error)]
pub enum ClimateApiError {
    /// The cutoff offset took the date outside the supported calendar range
    #[error("date {date} is out of range for the recent year cutoff")]
    DateOutOfRange { date: String },

    /// Error formatting a computed date
    #[error("failed to format date")]
    DateFormat(#[from] time::error::Format),

    /// Error reading from the measurement store
    #[error("error querying the measurement store")]
    Database(#[from] sqlx::Error),

    /// No measurement rows exist to anchor a most recent date
    #[error("no measurements available to determine the most recent date")]
    EmptyDataset,

    /// The most recent stored date is not an ISO-8601 calendar date
    #[error("stored date {date} is not a valid YYYY-MM-DD date")]
    MalformedDate {
        date: String,
        #[source]
        source: time::error::Parse,
    },
}

impl IntoResponse for ClimateApiError {
    /// Convert from a `ClimateApiError` into an [axum::response::Response].
    fn into_response(self) -> Response {
        ErrorResponse::from(self).into_response()
    }
}

/// Body of error response
///
/// Implements serde (de)serialise.
#[derive(Deserialize, Serialize)]
struct ErrorBody {
    /// Main error message
    message: String,

    /// Optional list of causes
    #[serde(skip_serializing_if = "Option::is_none")]
    caused_by: Option<Vec<String>>,
}

impl ErrorBody {
    /// Return a new ErrorBody
    ///
    /// # Arguments
    ///
    /// * `error`: The error that occurred
    fn new<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        let message = error.to_string();
        let mut caused_by: Option<Vec<String>> = None;
        let mut current = error.source();
        while let Some(source) = current {
            caused_by
                .get_or_insert_with(Vec::new)
                .push(source.to_string());
            current = source.source();
        }
        // Remove duplicate entries.
        if let Some(caused_by) = caused_by.as_mut() {
            caused_by.dedup()
        }
        ErrorBody { message, caused_by }
    }
}

/// A response to send in error cases
///
/// Implements serde (de)serialise.
#[derive(Deserialize, Serialize)]
struct ErrorResponse {
    /// HTTP status of the response
    #[serde(skip)]
    status: StatusCode,

    /// Response body
    error: ErrorBody,
}

impl ErrorResponse {
    /// Return a new ErrorResponse
    ///
    /// # Arguments
    ///
    /// * `status`: HTTP status of the response
    /// * `error`: The error that occurred. This will be formatted into a suitable `ErrorBody`
    fn new<E>(status: StatusCode, error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        ErrorResponse {
            status,
            error: ErrorBody::new(error),
        }
    }

    /// Return a 500 internal server error ErrorResponse
    fn internal_server_error<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }
}

impl From<ClimateApiError> for ErrorResponse {
    /// Convert from a `ClimateApiError` into an `ErrorResponse`.
    fn from(error: ClimateApiError) -> Self {
        // Every failure is a server-side data problem; request input is never rejected.
        let response = match &error {
            ClimateApiError::DateOutOfRange { date: _ }
            | ClimateApiError::DateFormat(_)
            | ClimateApiError::Database(_)
            | ClimateApiError::EmptyDataset
            | ClimateApiError::MalformedDate { date: _, source: _ } => {
                Self::internal_server_error(&error)
            }
        };

        // Log server errors.
        if response.status.is_server_error() {
            event!(Level::ERROR, "{}", error.to_string());
            let mut current = error.source();
            while let Some(source) = current {
                event!(Level::ERROR, "Caused by: {}", source.to_string());
                current = source.source();
            }
        }

        response
    }
}

impl IntoResponse for ErrorResponse {
    /// Convert from an `ErrorResponse` into an `axum::response::Response`.
    ///
    /// Renders the response as JSON.
    fn into_response(self) -> Response {
        let json_body = serde_json::to_string_pretty(&self);
        match json_body {
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialise error response: {}", err),
            )
                .into_response(),
            Ok(json_body) => (
                self.status,
                [(&header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string())],
                json_body,
            )
                .into_response(),
        }
    }
}
