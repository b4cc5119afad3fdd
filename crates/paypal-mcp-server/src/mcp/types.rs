use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single message exchanged over the transport. The `id` is supplied by the
/// caller and echoed verbatim in the response; it may be a string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Value,
    #[serde(flatten)]
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// Liveness/introspection probe; answered with the server identity and
    /// the enabled capability list.
    Ping,
    Request(RequestPayload),
    Response(ResponsePayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ping_wire_shape() {
        let msg: Message = serde_json::from_value(json!({"id": 1, "type": "ping"})).unwrap();
        assert_eq!(msg.id, json!(1));
        assert_eq!(msg.payload, Payload::Ping);
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"id": 1, "type": "ping"})
        );
    }

    #[test]
    fn request_wire_shape() {
        let raw = json!({
            "id": "req-1",
            "type": "request",
            "method": "get_invoice",
            "params": {"invoice_id": "INV2-XYZ"}
        });
        let msg: Message = serde_json::from_value(raw.clone()).unwrap();
        match &msg.payload {
            Payload::Request(req) => {
                assert_eq!(req.method, "get_invoice");
                assert_eq!(req.params, json!({"invoice_id": "INV2-XYZ"}));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
        assert_eq!(serde_json::to_value(&msg).unwrap(), raw);
    }

    #[test]
    fn request_params_default_to_null() {
        let msg: Message =
            serde_json::from_value(json!({"id": 2, "type": "request", "method": "list_invoices"}))
                .unwrap();
        match msg.payload {
            Payload::Request(req) => assert_eq!(req.params, Value::Null),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn success_response_wire_shape() {
        let msg = Message {
            id: json!(7),
            payload: Payload::Response(ResponsePayload {
                status: ResponseStatus::Success,
                result: Some(json!({"ok": true})),
                error: None,
            }),
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"id": 7, "type": "response", "status": "success", "result": {"ok": true}})
        );
    }

    #[test]
    fn error_response_wire_shape() {
        let msg = Message {
            id: json!("abc"),
            payload: Payload::Response(ResponsePayload {
                status: ResponseStatus::Error,
                result: None,
                error: Some(ErrorObject {
                    code: -32601,
                    message: "Method not found".to_string(),
                    data: None,
                }),
            }),
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "id": "abc",
                "type": "response",
                "status": "error",
                "error": {"code": -32601, "message": "Method not found"}
            })
        );
    }

    #[test]
    fn roundtrip_preserves_message() {
        let msg = Message {
            id: json!(42),
            payload: Payload::Request(RequestPayload {
                method: "create_order".to_string(),
                params: json!({"currencyCode": "USD", "items": []}),
            }),
        };
        let encoded = serde_json::to_string(&msg).unwrap();
        let decoded: Message = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, msg);
    }
}
