mod transport;
mod types;

pub use transport::{ReqwestTransport, Transport};
pub use types::*;

use crate::{Error, Result};
use tracing::debug;

/// Turns a raw backend response into an idea or a classified failure.
pub fn classify_response(response: RawResponse) -> Result<GenerationResponse> {
    match response.status {
        400 => Err(Error::HttpClientError(error_text(
            &response.body,
            "Invalid request",
        ))),
        500 => Err(Error::HttpServerError(error_text(
            &response.body,
            "Server error occurred",
        ))),
        _ if !response.is_success() => Err(Error::HttpOtherStatus {
            status: response.status,
            status_text: response.status_text,
        }),
        _ => {
            let parsed: GenerationResponse =
                serde_json::from_str(&response.body).map_err(|e| {
                    debug!("Unparseable success body: {}", e);
                    Error::InvalidResponse
                })?;

            if parsed.idea.is_empty() {
                return Err(Error::InvalidResponse);
            }

            Ok(parsed)
        }
    }
}

fn error_text(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|error| !error.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_success_returns_idea() {
        let response = RawResponse::new(200, r#"{"idea":"Build a tiny planner"}"#);
        let parsed = classify_response(response).unwrap();
        assert_eq!(parsed.idea, "Build a tiny planner");
    }

    #[test]
    fn test_success_ignores_extra_fields() {
        let response = RawResponse::new(201, r#"{"idea":"Seed library","model":"x"}"#);
        assert_eq!(classify_response(response).unwrap().idea, "Seed library");
    }

    #[test]
    fn test_success_without_idea_is_invalid() {
        let response = RawResponse::new(200, r#"{"result":"nope"}"#);
        assert!(matches!(
            classify_response(response),
            Err(Error::InvalidResponse)
        ));
    }

    #[test]
    fn test_success_with_empty_idea_is_invalid() {
        let response = RawResponse::new(200, r#"{"idea":""}"#);
        assert!(matches!(
            classify_response(response),
            Err(Error::InvalidResponse)
        ));
    }

    #[test]
    fn test_success_with_garbage_body_is_invalid() {
        let response = RawResponse::new(200, "<html>oops</html>");
        assert!(matches!(
            classify_response(response),
            Err(Error::InvalidResponse)
        ));
    }

    #[test]
    fn test_bad_request_uses_backend_error() {
        let response = RawResponse::new(400, r#"{"error":"Topic is required"}"#);
        match classify_response(response) {
            Err(Error::HttpClientError(msg)) => assert_eq!(msg, "Topic is required"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_bad_request_fallback() {
        let response = RawResponse::new(400, "");
        match classify_response(response) {
            Err(Error::HttpClientError(msg)) => assert_eq!(msg, "Invalid request"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_server_error_fallback() {
        let response = RawResponse::new(500, r#"{"detail":"boom"}"#);
        match classify_response(response) {
            Err(Error::HttpServerError(msg)) => assert_eq!(msg, "Server error occurred"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_other_status_carries_status_text() {
        let response = RawResponse::new(503, "");
        match classify_response(response) {
            Err(Error::HttpOtherStatus {
                status,
                status_text,
            }) => {
                assert_eq!(status, 503);
                assert_eq!(status_text, "Service Unavailable");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
