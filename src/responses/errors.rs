use crate::errors::ServerError;
use crate::responses::json_response;
use crate::templates::html_error_response;
use astra::{Body, Response};
use serde::Serialize;

pub use crate::errors::ResultResp;

const DETAILS_HINT: &str = "Check server logs for more information";

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

/// Convert a ServerError into a response: JSON for API routes, an HTML page otherwise.
pub fn error_to_response(err: ServerError, api: bool) -> Response {
    if !api {
        return html_error_response(err);
    }

    let status = err.status();
    let body = ErrorBody {
        success: false,
        error: err.to_string(),
        details: (status >= 500).then_some(DETAILS_HINT),
    };

    json_response(status, &body)
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
