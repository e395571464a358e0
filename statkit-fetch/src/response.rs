//! Response decoding.
//!
//! Turns an HTTP response into a [`Payload`] according to the requested
//! format, recognizing the remote error envelope
//! (`{"result": "error", "message": "..."}`).

use std::time::Duration;

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;
use statkit_core::ResponseFormat;
use tracing::{debug, warn};

use crate::error::FetchError;

/// Longest body excerpt kept in [`FetchError::Status`].
const MAX_ERROR_BODY: usize = 512;

// ============================================================================
// Payload
// ============================================================================

/// A decoded response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Decoded JSON (format `json`).
    Json(Value),
    /// Text body (formats `xml`, `csv`, `tsv`, `html`, `rss`).
    Text(String),
    /// The untouched HTTP response (format `original`).
    Original(RawResponse),
}

impl Payload {
    /// Returns the JSON value, if any.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the text body, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Unwraps the JSON value.
    pub fn into_json(self) -> Result<Value, FetchError> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Text(_) => Err(FetchError::InvalidResponse(
                "expected JSON, got a text payload".to_string(),
            )),
            Self::Original(_) => Err(FetchError::InvalidResponse(
                "expected JSON, got a passthrough payload".to_string(),
            )),
        }
    }

    /// Deserializes the JSON value into `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        Ok(serde_json::from_value(self.into_json()?)?)
    }
}

// ============================================================================
// Raw Response
// ============================================================================

/// An HTTP response captured without decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, in received order.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    async fn read(response: Response, timeout: Duration) -> Result<Self, FetchError> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?
            .to_vec();

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// ============================================================================
// Error Envelope
// ============================================================================

/// Returns the message of an error envelope, or `None` for other values.
pub fn error_envelope(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    if object.get("result").and_then(Value::as_str) != Some("error") {
        return None;
    }

    Some(
        object
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string(),
    )
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes a response in the given format.
///
/// `timeout` is the request timeout, reported when reading the body runs
/// out of time.
pub async fn decode(
    response: Response,
    format: ResponseFormat,
    timeout: Duration,
) -> Result<Payload, FetchError> {
    let status = response.status();

    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => return Err(FetchError::Timeout(timeout)),
            Err(e) => {
                warn!(status = %status, error = %e, "Failed to read error body");
                format!("<unreadable body: {e}>")
            }
        };
        let envelope = serde_json::from_str::<Value>(&body)
            .ok()
            .as_ref()
            .and_then(error_envelope);
        if let Some(message) = envelope {
            warn!(status = %status, message = %message, "API error with failure status");
            return Err(FetchError::Api { message });
        }
        return Err(FetchError::Status {
            status: status.as_u16(),
            body: truncate(&body),
        });
    }

    if format.is_passthrough() {
        return Ok(Payload::Original(RawResponse::read(response, timeout).await?));
    }

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::from_reqwest(e, timeout))?;
    decode_body(&body, format)
}

/// Decodes a successful response body.
pub fn decode_body(body: &str, format: ResponseFormat) -> Result<Payload, FetchError> {
    if !format.is_json() {
        return Ok(Payload::Text(body.to_string()));
    }

    let value: Value = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Failed to parse JSON response");
        FetchError::Json(e)
    })?;

    if let Some(message) = error_envelope(&value) {
        debug!(message = %message, "API returned error envelope");
        return Err(FetchError::Api { message });
    }

    Ok(Payload::Json(value))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_error_envelope_detection() {
        assert_eq!(
            error_envelope(&json!({"result": "error", "message": "X"})),
            Some("X".to_string())
        );
        assert_eq!(
            error_envelope(&json!({"result": "error"})),
            Some("unknown error".to_string())
        );
        assert_eq!(error_envelope(&json!({"result": "success", "message": "ok"})), None);
        assert_eq!(error_envelope(&json!([{"result": "error"}])), None);
        assert_eq!(error_envelope(&json!("error")), None);
    }

    #[test]
    fn test_decode_json_success() {
        let payload = decode_body(r#"{"nb_visits": 12}"#, ResponseFormat::Json).unwrap();
        assert_eq!(payload.as_json(), Some(&json!({"nb_visits": 12})));
    }

    #[test]
    fn test_decode_json_error_envelope() {
        let err = decode_body(r#"{"result":"error","message":"X"}"#, ResponseFormat::Json)
            .unwrap_err();
        assert!(err.is_api());
        assert_eq!(err.api_message(), Some("X"));
    }

    #[test]
    fn test_decode_malformed_json_is_transport_class() {
        let err = decode_body("<html>oops</html>", ResponseFormat::Json).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_decode_text_formats_untouched() {
        let payload = decode_body("label,nb_visits\n/,3\n", ResponseFormat::Csv).unwrap();
        assert_eq!(payload.as_text(), Some("label,nb_visits\n/,3\n"));
    }

    #[test]
    fn test_payload_decode_typed() {
        #[derive(Debug, serde::Deserialize)]
        struct Summary {
            nb_visits: u64,
        }

        let summary: Summary = Payload::Json(json!({"nb_visits": 5})).decode().unwrap();
        assert_eq!(summary.nb_visits, 5);

        let err = Payload::Text("x".into()).decode::<Summary>().unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_truncate() {
        let long = "a".repeat(MAX_ERROR_BODY + 10);
        assert_eq!(truncate(&long).len(), MAX_ERROR_BODY + 3);
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn test_raw_response_header_lookup() {
        let raw = RawResponse {
            status: 200,
            headers: vec![("content-type".into(), "text/plain".into())],
            body: b"hi".to_vec(),
        };
        assert_eq!(raw.header("Content-Type"), Some("text/plain"));
        assert_eq!(raw.text(), "hi");
    }
}
