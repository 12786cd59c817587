//! Response helpers shared by the API and static handlers.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, error};

use crate::error::Error;

/// Body for every 404.
pub const NOT_FOUND_PAGE: &str = "<h1>404 - Not Found</h1>";

/// Body for every 500.
pub const SERVER_ERROR_PAGE: &str = "<h1>500 - Internal Server Error</h1>";

/// Serialize `value` with two-space indentation as an `application/json` response.
pub fn pretty_json<T: Serialize + ?Sized>(value: &T) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(err) => Error::from(err).into_response(),
    }
}

fn html_page(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "text/html")], body).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            debug!(error = %self, "not found");
            html_page(StatusCode::NOT_FOUND, NOT_FOUND_PAGE)
        } else {
            error!(error = %self, "request failed");
            html_page(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_PAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = Error::not_found("/nope").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
    }

    #[test]
    fn test_other_errors_map_to_500() {
        let response = Error::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = Error::invalid_payload("not an object").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_pretty_json_sets_content_type() {
        let response = pretty_json(&json!({"a": 1}));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }
}
