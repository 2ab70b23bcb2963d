//! Conversion of raw failures into the normalized error model.
//!
//! `parse` is total: every failure shape maps to exactly one `ApiError` and
//! the conversion itself never fails. The message templates for transport
//! failures and multi-detail errors are a compatibility contract and must
//! not be reworded.

use serde::Deserialize;

use super::{ApiError, ApiErrorCode, ErrorDetail, InnerError};
use crate::http::TransportFailure;

/// A failure as observed at the HTTP boundary, before normalization.
#[derive(Debug)]
pub enum RawFailure {
    /// The server answered with a non-success status.
    HttpError { status: u16, body: String },
    /// No response was received (DNS, connection, TLS).
    TransportError(TransportFailure),
    /// The request timed out before any response arrived.
    Timeout,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: WireError,
}

#[derive(Deserialize)]
struct WireError {
    code: String,
    message: String,
    #[serde(default)]
    details: Option<Vec<WireDetail>>,
}

#[derive(Deserialize)]
struct WireDetail {
    code: String,
    message: String,
    #[serde(default)]
    target: Option<String>,
    #[serde(default, rename = "innerError")]
    inner_error: Option<WireInner>,
}

#[derive(Deserialize)]
struct WireInner {
    code: String,
}

/// Normalizes any failure into an `ApiError`.
pub fn parse(failure: RawFailure) -> ApiError {
    match failure {
        RawFailure::HttpError { status, body } => parse_http_error(status, body),
        RawFailure::TransportError(original) => transport_error(original),
        RawFailure::Timeout => ApiError::new(ApiErrorCode::Unknown, "Request timed out."),
    }
}

fn parse_http_error(status: u16, body: String) -> ApiError {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) else {
        // No recognizable error body; carry the raw status and body through.
        return ApiError::new(
            ApiErrorCode::Unknown,
            format!("Unknown error occurred.\nResponse status code: {status},\nresponse body: {body}"),
        );
    };

    let code = ApiErrorCode::from_wire(&envelope.error.code);
    let details = envelope.error.details.map(|details| {
        details
            .into_iter()
            .map(|detail| ErrorDetail {
                code: ApiErrorCode::from_wire(&detail.code),
                message: detail.message,
                target: detail.target,
                inner_error: detail
                    .inner_error
                    .map(|inner| InnerError { code: ApiErrorCode::from_wire(&inner.code) }),
            })
            .collect::<Vec<_>>()
    });
    let message = match &details {
        Some(details) if !details.is_empty() => compose_message(&envelope.error.message, details),
        _ => envelope.error.message,
    };

    ApiError {
        code,
        message,
        details,
        original_error: None,
    }
}

/// Multi-detail composition: `"{top} Details:\n"` then one 1-indexed line
/// per detail, `" Target: {target}."` appended when the detail names one.
fn compose_message(top: &str, details: &[ErrorDetail]) -> String {
    let mut message = format!("{top} Details:\n");
    for (i, detail) in details.iter().enumerate() {
        message.push_str(&format!("{}. {}: {}", i + 1, detail.code, detail.message));
        if let Some(target) = &detail.target {
            message.push_str(&format!(" Target: {target}."));
        }
        message.push('\n');
    }
    message
}

fn transport_error(original: TransportFailure) -> ApiError {
    let message = format!(
        "Unknown error occurred.\nOriginal error message: {},\noriginal error code: {},\nresponse status code: undefined,\nresponse body: undefined",
        original.message, original.code
    );
    ApiError {
        code: ApiErrorCode::Unrecognized,
        message,
        details: None,
        original_error: Some(original),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_with_details_composes_exact_message() {
        let body = r#"{
            "error": {
                "code": "InvalidiModelsRequest",
                "message": "Cannot create iModel.",
                "details": [
                    {
                        "code": "InvalidValue",
                        "message": "Provided 'extent' value is not valid. Valid 'latitude' value range is -90 to 90.",
                        "target": "extent"
                    },
                    {
                        "code": "MissingRequiredProperty",
                        "message": "Required property is missing.",
                        "target": "name"
                    },
                    {
                        "code": "InvalidRequestBody",
                        "message": "Failed to parse request body. Make sure it is a valid JSON."
                    }
                ]
            }
        }"#;
        let error = parse(RawFailure::HttpError { status: 422, body: body.to_string() });
        assert_eq!(error.code, ApiErrorCode::InvalidIModelsRequest);
        assert_eq!(
            error.message,
            "Cannot create iModel. Details:\n\
             1. InvalidValue: Provided 'extent' value is not valid. Valid 'latitude' value range is -90 to 90. Target: extent.\n\
             2. MissingRequiredProperty: Required property is missing. Target: name.\n\
             3. InvalidRequestBody: Failed to parse request body. Make sure it is a valid JSON.\n"
        );
        let details = error.details.as_ref().expect("details present");
        assert_eq!(details.len(), 3);
        assert_eq!(details[0].target.as_deref(), Some("extent"));
        assert_eq!(details[2].target, None);
    }

    #[test]
    fn structured_body_without_details_keeps_message() {
        let body = r#"{"error": {"code": "iModelNotFound", "message": "Requested iModel is not available."}}"#;
        let error = parse(RawFailure::HttpError { status: 404, body: body.to_string() });
        assert_eq!(error.code, ApiErrorCode::IModelNotFound);
        assert_eq!(error.message, "Requested iModel is not available.");
        assert!(error.details.is_none());
        assert!(error.original_error.is_none());
    }

    #[test]
    fn unrecognized_top_level_code_becomes_sentinel() {
        let body = r#"{"error": {"code": "BrandNewFailureMode", "message": "Something new."}}"#;
        let error = parse(RawFailure::HttpError { status: 400, body: body.to_string() });
        assert_eq!(error.code, ApiErrorCode::Unrecognized);
        assert_eq!(error.message, "Something new.");
    }

    #[test]
    fn detail_inner_error_is_mapped() {
        let body = r#"{
            "error": {
                "code": "DataConflict",
                "message": "Conflict.",
                "details": [
                    {
                        "code": "ConflictWithAnotherUser",
                        "message": "Another user holds the lock.",
                        "innerError": {"code": "NewerChangesExist"}
                    }
                ]
            }
        }"#;
        let error = parse(RawFailure::HttpError { status: 409, body: body.to_string() });
        let details = error.details.as_ref().expect("details present");
        assert_eq!(
            details[0].inner_error,
            Some(InnerError { code: ApiErrorCode::NewerChangesExist })
        );
    }

    #[test]
    fn transport_failure_synthesizes_exact_template() {
        let error = parse(RawFailure::TransportError(TransportFailure {
            code: "ENOTFOUND".to_string(),
            message: "getaddrinfo ENOTFOUND foo.bar".to_string(),
        }));
        assert_eq!(error.code, ApiErrorCode::Unrecognized);
        assert_eq!(
            error.message,
            "Unknown error occurred.\n\
             Original error message: getaddrinfo ENOTFOUND foo.bar,\n\
             original error code: ENOTFOUND,\n\
             response status code: undefined,\n\
             response body: undefined"
        );
        let original = error.original_error.as_ref().expect("original attached");
        assert_eq!(original.code, "ENOTFOUND");
    }

    #[test]
    fn unparsable_body_becomes_unknown_with_raw_payload() {
        let error = parse(RawFailure::HttpError {
            status: 502,
            body: "<html>Bad Gateway</html>".to_string(),
        });
        assert_eq!(error.code, ApiErrorCode::Unknown);
        assert_eq!(
            error.message,
            "Unknown error occurred.\nResponse status code: 502,\nresponse body: <html>Bad Gateway</html>"
        );
    }

    #[test]
    fn timeout_becomes_unknown() {
        let error = parse(RawFailure::Timeout);
        assert_eq!(error.code, ApiErrorCode::Unknown);
        assert_eq!(error.message, "Request timed out.");
    }
}
