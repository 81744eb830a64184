use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::format::format_output;
use crate::notifications::{NotificationError, NotificationRequest};
use crate::registries::{visible_tools, CatalogFilter};
use crate::service::RunError;
use crate::tools::{Payload, ToolError, ToolKind};
use crate::usage::today;
use crate::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>, // Optional for notifications
}

#[derive(Debug, Deserialize, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub keywords: Vec<String>,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Default, Deserialize)]
struct ListToolsParams {
    #[serde(default)]
    query: String,
    filter: Option<String>,
}

fn rpc_error(code: i64, message: impl Into<String>) -> Value {
    serde_json::json!({
        "code": code,
        "message": message.into()
    })
}

fn to_result<T: Serialize>(value: T) -> Result<Value, Value> {
    serde_json::to_value(value).map_err(|e| {
        error!("Failed to serialize RPC result: {}", e);
        rpc_error(-32603, "Internal error")
    })
}

pub async fn rpc_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<JsonRpcRequest>,
) -> Response {
    info!("RPC request: method={}, id={:?}", req.method, req.id);

    if req.id.is_none() {
        return handle_notification(&req);
    }

    let mut response = JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: None,
        id: req.id.clone(),
    };

    let outcome = match req.method.as_str() {
        "initialize" => to_result(InitializeResult {
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "MicroToolsHub".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }),
        "tools/list" => handle_tools_list(&state, req.params),
        "tools/call" => handle_tool_call(&state, req.params),
        "usage/get" => to_result(state.tools.usage_report(today())),
        "notifications/subscribe" => handle_subscribe(&state, req.params),
        _ => {
            error!("Unknown method: {}", req.method);
            Err(rpc_error(-32601, "Method not found"))
        }
    };

    match outcome {
        Ok(result) => response.result = Some(result),
        Err(error) => response.error = Some(error),
    }

    (StatusCode::OK, axum::Json(response)).into_response()
}

/// Requests without an id get no reply. Nothing is run for them, so a
/// notification can't spend the daily allowance or record a sign-up.
fn handle_notification(req: &JsonRpcRequest) -> Response {
    match req.method.as_str() {
        "tools/call" | "notifications/subscribe" => {
            warn!("Ignoring {} sent without an id", req.method);
        }
        method => info!("Notification: {}", method),
    }
    StatusCode::NO_CONTENT.into_response()
}

fn handle_tools_list(state: &AppState, params: Option<Value>) -> Result<Value, Value> {
    let params: ListToolsParams = match params {
        Some(params) => serde_json::from_value(params)
            .map_err(|e| rpc_error(-32602, format!("Invalid params: {}", e)))?,
        None => ListToolsParams::default(),
    };

    let filter = match params.filter.as_deref() {
        Some(filter) => {
            state.analytics.track_filter_usage(filter);
            CatalogFilter::parse(filter)
        }
        None => CatalogFilter::All,
    };
    state.analytics.track_search_query(&params.query);

    let tools: Vec<Tool> = visible_tools(&filter, &params.query)
        .into_iter()
        .map(|tool| Tool {
            name: tool.id.to_string(),
            title: tool.name.to_string(),
            description: tool.description.to_string(),
            version: tool.version.to_string(),
            keywords: tool.keywords.iter().map(|kw| kw.to_string()).collect(),
            input_schema: get_tool_schema(tool.kind),
        })
        .collect();

    Ok(serde_json::json!({
        "tools": tools
    }))
}

fn string_argument(arguments: &Value, name: &str) -> Result<String, Value> {
    arguments
        .get(name)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| rpc_error(-32602, format!("Missing '{}' argument", name)))
}

fn handle_tool_call(state: &AppState, params: Option<Value>) -> Result<Value, Value> {
    let params = params.ok_or_else(|| rpc_error(-32602, "Missing params"))?;

    let tool_name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| rpc_error(-32602, "Missing 'name' parameter"))?;

    let kind: ToolKind = tool_name
        .parse()
        .map_err(|_| rpc_error(-32601, "Tool not found"))?;

    let empty_args = serde_json::json!({});
    let arguments = params.get("arguments").unwrap_or(&empty_args);

    let payload = if kind.takes_dates() {
        Payload::dates(
            string_argument(arguments, "start")?,
            string_argument(arguments, "end")?,
        )
    } else {
        Payload::text(string_argument(arguments, "text")?)
    };
    let mode = arguments.get("mode").and_then(|v| v.as_str());

    match state.tools.run(kind.id(), &payload, mode, today()) {
        Ok(run) => Ok(serde_json::json!({
            "content": [{
                "type": "text",
                "text": format_output(&run.output)
            }],
            "output": run.output,
            "usage": run.usage
        })),
        Err(RunError::LimitReached { limit }) => Err(serde_json::json!({
            "code": -32000,
            "message": RunError::LimitReached { limit }.to_string(),
            "data": { "limit": limit }
        })),
        Err(RunError::Tool(ToolError::NotFound(_))) => Err(rpc_error(-32601, "Tool not found")),
        Err(RunError::Tool(e)) => {
            warn!("Tool {} rejected input: {}", kind, e);
            Err(rpc_error(-32602, e.to_string()))
        }
        Err(RunError::Store(e)) => {
            error!("Failed to record usage for {}: {}", kind, e);
            Err(rpc_error(-32603, "Failed to record usage"))
        }
    }
}

fn handle_subscribe(state: &AppState, params: Option<Value>) -> Result<Value, Value> {
    let params = params.ok_or_else(|| rpc_error(-32602, "Missing params"))?;
    let mut request: NotificationRequest = serde_json::from_value(params)
        .map_err(|e| rpc_error(-32602, format!("Invalid params: {}", e)))?;
    request.source.get_or_insert_with(|| "rpc".to_string());

    match state.notifications.subscribe(request, Utc::now()) {
        Ok(signup) => {
            state
                .analytics
                .track_notification_signup(&signup.email, &signup.interests);
            Ok(serde_json::json!({
                "message": signup.thank_you_message(),
                "signup": signup
            }))
        }
        Err(NotificationError::InvalidEmail) => {
            Err(rpc_error(-32602, NotificationError::InvalidEmail.to_string()))
        }
        Err(NotificationError::Store(e)) => {
            error!("Failed to store notification signup: {}", e);
            Err(rpc_error(-32603, "Failed to store signup"))
        }
    }
}

fn get_tool_schema(kind: ToolKind) -> Value {
    match kind {
        ToolKind::DateDifference => serde_json::json!({
            "type": "object",
            "properties": {
                "start": {
                    "type": "string",
                    "format": "date",
                    "description": "Start date (YYYY-MM-DD)"
                },
                "end": {
                    "type": "string",
                    "format": "date",
                    "description": "End date (YYYY-MM-DD)"
                }
            },
            "required": ["start", "end"]
        }),
        ToolKind::CaseConverter => serde_json::json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "The text to convert"
                },
                "mode": {
                    "type": "string",
                    "enum": ["upper", "lower"],
                    "description": "Target case"
                }
            },
            "required": ["text", "mode"]
        }),
        ToolKind::WordCounter
        | ToolKind::CharacterCounter
        | ToolKind::TextCleaner
        | ToolKind::BulletParagraph => serde_json::json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "The text to process"
                }
            },
            "required": ["text"]
        }),
    }
}
