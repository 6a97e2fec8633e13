//! JSON-RPC 2.0 wire types and the error taxonomy
//!
//! Every error envelope the server emits is built from an [`RpcError`], so the
//! `code` field can only ever carry one of the reserved [`ErrorCode`] values.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};
use thiserror::Error;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid Request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

/// Request identifier, echoed back verbatim in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(Number),
    String(String),
}

impl RequestId {
    /// `Ok(None)` marks a notification; `Err` carries an id of a disallowed type.
    pub fn from_value(value: Option<Value>) -> Result<Option<Self>, RpcError> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => Ok(Some(Self::Number(number))),
            Some(Value::String(id)) => Ok(Some(Self::String(id))),
            Some(other) => Err(RpcError::invalid_request(format!(
                "id must be a string, number, or null, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

/// An inbound request as decoded, before any validation.
///
/// Every field stays a raw JSON value so protocol checks can report precisely
/// what was wrong instead of failing the whole decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub jsonrpc: Option<Value>,
    #[serde(default)]
    pub method: Option<Value>,
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorObject {
    pub code: ErrorCode,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    Result(Value),
    Error(ErrorObject),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    #[serde(flatten)]
    pub payload: Payload,
    pub id: Option<RequestId>,
}

impl Response {
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            payload: Payload::Result(result),
            id,
        }
    }

    pub fn failure(id: Option<RequestId>, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            payload: Payload::Error(error.into_error_object()),
            id,
        }
    }
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("parse error: {detail}")]
    Parse { detail: String },
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
    #[error("method not found: {method}")]
    MethodNotFound { method: String },
    #[error("invalid params: {details}")]
    InvalidParams { details: Value },
    #[error("internal error: {category}")]
    Internal { category: &'static str },
}

impl RpcError {
    pub fn parse(detail: impl Into<String>) -> Self {
        Self::Parse {
            detail: detail.into(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            method: method.into(),
        }
    }

    pub fn invalid_params(details: Value) -> Self {
        Self::InvalidParams { details }
    }

    pub fn internal(category: &'static str) -> Self {
        Self::Internal { category }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse { .. } => ErrorCode::ParseError,
            Self::InvalidRequest { .. } => ErrorCode::InvalidRequest,
            Self::MethodNotFound { .. } => ErrorCode::MethodNotFound,
            Self::InvalidParams { .. } => ErrorCode::InvalidParams,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }

    pub fn into_error_object(self) -> ErrorObject {
        let code = self.code();
        let data = match self {
            Self::Parse { detail } => Value::String(detail),
            Self::InvalidRequest { reason } => Value::String(reason),
            Self::MethodNotFound { method } => Value::String(method),
            Self::InvalidParams { details } => details,
            Self::Internal { category } => Value::String(category.to_string()),
        };

        ErrorObject {
            code,
            message: code.message(),
            data: Some(data),
        }
    }
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{RequestId, Response, RpcError};

    #[test]
    fn success_envelope_has_result_and_no_error() {
        let response = Response::success(Some(RequestId::Number(7_i64.into())), json!([1, 2]));
        let encoded = serde_json::to_string(&response).expect("serialize response");

        assert_eq!(encoded, r#"{"jsonrpc":"2.0","result":[1,2],"id":7}"#);
    }

    #[test]
    fn null_result_is_still_encoded() {
        let response = Response::success(Some(RequestId::String("a".to_string())), json!(null));
        let encoded = serde_json::to_string(&response).expect("serialize response");

        assert_eq!(encoded, r#"{"jsonrpc":"2.0","result":null,"id":"a"}"#);
    }

    #[test]
    fn error_envelope_without_id_encodes_null_id() {
        let response = Response::failure(None, RpcError::method_not_found("nope"));
        let encoded = serde_json::to_string(&response).expect("serialize response");

        assert_eq!(
            encoded,
            r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found","data":"nope"},"id":null}"#
        );
    }

    #[test]
    fn request_id_keeps_number_representation() {
        let id = RequestId::from_value(Some(json!(1.5)))
            .expect("valid id")
            .expect("not a notification");

        assert_eq!(serde_json::to_string(&id).expect("serialize id"), "1.5");
    }

    #[test]
    fn request_id_treats_null_as_notification() {
        assert_eq!(RequestId::from_value(Some(json!(null))).expect("valid id"), None);
        assert_eq!(RequestId::from_value(None).expect("valid id"), None);
    }

    #[test]
    fn request_id_rejects_objects() {
        let error = RequestId::from_value(Some(json!({"a": 1}))).expect_err("object id");

        assert_eq!(error.code().code(), -32600);
    }
}
