//! Tool methods exposed over JSON-RPC
//!
//! [`ToolMethod`] is the routing table: the full, closed set of callable
//! methods. Each method declares its parameters once; the same declarations
//! drive argument validation and the discovery manifest.

use serde_json::{json, Map, Value};

use crate::domain::utils::{ensure_required, required_i32, required_str, ParamKind, ParamSpec};
use crate::mcp::rpc::RpcError;
use crate::registry::ToolCapabilities;

const TIME_REPORT_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "year",
        kind: ParamKind::Integer,
        description: "The year for the report.",
    },
    ParamSpec {
        name: "month",
        kind: ParamKind::Integer,
        description: "The month for the report (1-12).",
    },
];

const SEARCH_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "query",
    kind: ParamKind::String,
    description: "The search query.",
}];

const FETCH_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "id",
    kind: ParamKind::String,
    description: "The ID of the content to fetch.",
}];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolMethod {
    GetTimeReportStats,
    SearchContent,
    FetchContent,
}

impl ToolMethod {
    pub const ALL: [ToolMethod; 3] = [
        Self::GetTimeReportStats,
        Self::SearchContent,
        Self::FetchContent,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::GetTimeReportStats => "getTimeReportStats",
            Self::SearchContent => "searchContent",
            Self::FetchContent => "fetchContent",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::GetTimeReportStats => "Fetches time report statistics for a given year and month.",
            Self::SearchContent => "Searches for content based on a query string.",
            Self::FetchContent => "Fetches a specific content item by its ID.",
        }
    }

    /// Legacy REST path serving the same data, relative to the base path.
    pub fn rest_path(self) -> &'static str {
        match self {
            Self::GetTimeReportStats => "/time-report",
            Self::SearchContent => "/search",
            Self::FetchContent => "/fetch",
        }
    }

    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            Self::GetTimeReportStats => TIME_REPORT_PARAMS,
            Self::SearchContent => SEARCH_PARAMS,
            Self::FetchContent => FETCH_PARAMS,
        }
    }

    pub fn params_schema(self) -> Value {
        let properties = self
            .params()
            .iter()
            .map(|spec| {
                (
                    spec.name.to_string(),
                    json!({
                        "type": spec.kind.schema_type(),
                        "description": spec.description,
                    }),
                )
            })
            .collect::<Map<String, Value>>();
        let required = self.params().iter().map(|spec| spec.name).collect::<Vec<_>>();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Outcome of a tool call that passed parameter validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Found(Value),
    NotFound,
}

impl ToolOutcome {
    pub fn into_result(self) -> Value {
        match self {
            Self::Found(value) => value,
            Self::NotFound => Value::Null,
        }
    }
}

pub fn call_tool(
    capabilities: &dyn ToolCapabilities,
    method: ToolMethod,
    params: &Map<String, Value>,
) -> Result<ToolOutcome, RpcError> {
    ensure_required(params, method.params())?;

    match method {
        ToolMethod::GetTimeReportStats => {
            let year = required_i32(params, "year")?;
            let month = required_i32(params, "month")?;
            let entries = capabilities.time_report(year, month);
            Ok(ToolOutcome::Found(to_result_value(&entries)?))
        }
        ToolMethod::SearchContent => {
            let query = required_str(params, "query")?;
            let results = to_result_value(&capabilities.search(query))?;
            Ok(ToolOutcome::Found(json!({ "results": results })))
        }
        ToolMethod::FetchContent => {
            let id = required_str(params, "id")?;
            match capabilities.fetch(id) {
                Some(result) => Ok(ToolOutcome::Found(to_result_value(&result)?)),
                None => Ok(ToolOutcome::NotFound),
            }
        }
    }
}

fn to_result_value<T: serde::Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|_| RpcError::internal("serialization"))
}
