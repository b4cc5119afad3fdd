use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayPalError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a non-success status. The message carries the
    /// top-level `message` field plus any `details[].description` entries
    /// from the PayPal error body.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: Value,
    },
}

impl PayPalError {
    /// Build an `Api` error from a status code and a raw response body.
    pub(crate) fn from_response(status: u16, text: &str) -> Self {
        let body: Value = serde_json::from_str(text).unwrap_or(Value::Null);

        let mut message = body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();

        if let Some(details) = body.get("details").and_then(|d| d.as_array()) {
            let descriptions: Vec<&str> = details
                .iter()
                .filter_map(|d| d.get("description").and_then(|s| s.as_str()))
                .collect();
            if !descriptions.is_empty() {
                message.push_str(": ");
                message.push_str(&descriptions.join("; "));
            }
        }

        if body.is_null() {
            message = format!("API error: {text}");
        }

        PayPalError::Api {
            status,
            message,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_appends_detail_descriptions() {
        let body = r#"{
            "message": "Invalid request",
            "details": [
                {"description": "currency_code is missing"},
                {"field": "value"},
                {"description": "value must be positive"}
            ]
        }"#;
        let err = PayPalError::from_response(422, body);
        match err {
            PayPalError::Api {
                status, message, ..
            } => {
                assert_eq!(status, 422);
                assert_eq!(
                    message,
                    "Invalid request: currency_code is missing; value must be positive"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_with_non_json_body_keeps_raw_text() {
        let err = PayPalError::from_response(502, "Bad Gateway");
        match err {
            PayPalError::Api { message, .. } => {
                assert_eq!(message, "API error: Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
