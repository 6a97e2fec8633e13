//! Discovery manifest advertising the tool methods and their parameter schemas

use serde::Serialize;
use serde_json::Value;

use crate::domain::tools::ToolMethod;
use crate::BASE_PATH;

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub rpc_endpoint: &'static str,
    pub endpoints: Endpoints,
    pub tools: Vec<ToolDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Endpoints {
    pub rpc: String,
    pub manifest: String,
    pub health: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub base_path: String,
    pub params_schema: Value,
}

pub fn build_manifest() -> Manifest {
    Manifest {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        description: "MCP tool manifest providing time reporting and search functionalities.",
        rpc_endpoint: BASE_PATH,
        endpoints: Endpoints {
            rpc: BASE_PATH.to_string(),
            manifest: format!("{BASE_PATH}/.well-known/mcp.json"),
            health: "/health",
        },
        tools: ToolMethod::ALL
            .into_iter()
            .map(|method| ToolDescriptor {
                name: method.name(),
                description: method.description(),
                base_path: format!("{BASE_PATH}{}", method.rest_path()),
                params_schema: method.params_schema(),
            })
            .collect(),
    }
}
