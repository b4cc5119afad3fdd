use crate::mcp::types::{ErrorObject, Message, Payload, ResponsePayload, ResponseStatus};
use serde_json::Value;

/// Error codes shared with existing peers; they must match exactly.
pub mod error_codes {
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

pub struct Protocol;

impl Protocol {
    pub fn success_response(id: Value, result: Value) -> Message {
        Message {
            id,
            payload: Payload::Response(ResponsePayload {
                status: ResponseStatus::Success,
                result: Some(result),
                error: None,
            }),
        }
    }

    pub fn error_response(
        id: Value,
        code: i32,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Message {
        Message {
            id,
            payload: Payload::Response(ResponsePayload {
                status: ResponseStatus::Error,
                result: None,
                error: Some(ErrorObject {
                    code,
                    message: message.into(),
                    data,
                }),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_response_echoes_id_and_code() {
        let msg = Protocol::error_response(
            json!("r1"),
            error_codes::METHOD_NOT_FOUND,
            "Method not found",
            Some(json!({"method": "nope"})),
        );
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["id"], "r1");
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"]["code"], -32601);
        assert_eq!(value["error"]["data"]["method"], "nope");
    }
}
