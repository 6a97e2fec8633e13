//! The JSON-RPC request lifecycle
//!
//! Decodes a raw request body, validates the protocol envelope, routes to a
//! [`ToolMethod`], invokes it against the capability registry and encodes the
//! outcome. Every failure becomes exactly one error envelope; nothing escapes
//! to the transport.

use std::{
    fmt::Display,
    panic::{catch_unwind, AssertUnwindSafe},
    sync::Arc,
};

use axum::http::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::tools::{call_tool, ToolMethod, ToolOutcome};
use crate::domain::utils::normalize_params;
use crate::mcp::rpc::{Request, RequestId, Response, RpcError, JSONRPC_VERSION};
use crate::registry::ToolCapabilities;

/// What to do when a notification fails after its envelope was decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationErrorPolicy {
    /// Acknowledge without a body, as for a successful notification.
    #[default]
    Suppress,
    /// Send the error envelope with a null id.
    Respond,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Message(Response),
    Acknowledged,
}

impl Reply {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Message(_) => StatusCode::OK,
            Self::Acknowledged => StatusCode::NO_CONTENT,
        }
    }

    pub fn into_message(self) -> Option<Response> {
        match self {
            Self::Message(response) => Some(response),
            Self::Acknowledged => None,
        }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    capabilities: Arc<dyn ToolCapabilities>,
    notification_errors: NotificationErrorPolicy,
}

impl Dispatcher {
    pub fn new(
        capabilities: Arc<dyn ToolCapabilities>,
        notification_errors: NotificationErrorPolicy,
    ) -> Self {
        Self {
            capabilities,
            notification_errors,
        }
    }

    /// Reply for a body the transport failed to read.
    pub fn unreadable_body(&self, reason: impl Display) -> Reply {
        warn!(error = %reason, "failed to read request body");
        Reply::Message(Response::failure(None, RpcError::parse(reason.to_string())))
    }

    pub fn handle(&self, raw_body: &[u8]) -> Reply {
        let request = match decode(raw_body) {
            Ok(request) => request,
            Err(error) => return Reply::Message(Response::failure(None, error)),
        };

        let id = match RequestId::from_value(request.id.clone()) {
            Ok(id) => id,
            Err(error) => return Reply::Message(Response::failure(None, error)),
        };

        let method = match validate_envelope(&request) {
            Ok(method) => method.to_string(),
            Err(error) => return self.reply_error(id, error),
        };

        let outcome = self.invoke(&method, request.params);
        let audit_outcome = match &outcome {
            Ok(ToolOutcome::Found(_)) => "success",
            Ok(ToolOutcome::NotFound) => "not_found",
            Err(_) => "failure",
        };
        info!(method = %method, outcome = audit_outcome, "mcp action audited");

        match outcome {
            Ok(outcome) => match id {
                Some(id) => Reply::Message(Response::success(Some(id), outcome.into_result())),
                None => {
                    debug!(method = %method, "notification handled without response");
                    Reply::Acknowledged
                }
            },
            Err(error) => self.reply_error(id, error),
        }
    }

    fn invoke(&self, method: &str, params: Option<Value>) -> Result<ToolOutcome, RpcError> {
        let params = normalize_params(params)?;
        let tool =
            ToolMethod::from_name(method.trim()).ok_or_else(|| RpcError::method_not_found(method))?;

        let capabilities = self.capabilities.as_ref();
        catch_unwind(AssertUnwindSafe(|| call_tool(capabilities, tool, &params))).unwrap_or_else(
            |_| {
                warn!(method = tool.name(), "tool invocation panicked");
                Err(RpcError::internal("panic"))
            },
        )
    }

    fn reply_error(&self, id: Option<RequestId>, error: RpcError) -> Reply {
        if let RpcError::Internal { category } = &error {
            warn!(category = *category, "request failed with internal error");
        }

        match id {
            Some(id) => Reply::Message(Response::failure(Some(id), error)),
            None => match self.notification_errors {
                NotificationErrorPolicy::Suppress => {
                    debug!(error = %error, "suppressed error for notification");
                    Reply::Acknowledged
                }
                NotificationErrorPolicy::Respond => {
                    Reply::Message(Response::failure(None, error))
                }
            },
        }
    }
}

fn decode(raw_body: &[u8]) -> Result<Request, RpcError> {
    if raw_body.iter().all(u8::is_ascii_whitespace) {
        return Err(RpcError::parse("empty request body"));
    }

    let raw_text = || String::from_utf8_lossy(raw_body).into_owned();
    let payload: Value = serde_json::from_slice(raw_body).map_err(|_| RpcError::parse(raw_text()))?;
    let Value::Object(mut fields) = payload else {
        return Err(RpcError::parse(raw_text()));
    };

    Ok(Request {
        jsonrpc: fields.remove("jsonrpc"),
        method: fields.remove("method"),
        params: fields.remove("params"),
        id: fields.remove("id"),
    })
}

fn validate_envelope(request: &Request) -> Result<&str, RpcError> {
    if request.jsonrpc.as_ref().and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return Err(RpcError::invalid_request("jsonrpc must be exactly \"2.0\""));
    }

    match request.method.as_ref().and_then(Value::as_str) {
        Some(method) if !method.trim().is_empty() => Ok(method),
        _ => Err(RpcError::invalid_request(
            "method must be a non-empty string",
        )),
    }
}
