/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Routes tool calls to the mood tools
/// 3. Sends JSON-RPC responses to stdout

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{MoodTrackerServer, ServerError};

/// MCP server that handles communication with the client
pub struct McpServer {
    /// The underlying mood tracker
    tracker: MoodTrackerServer,
    /// Whether the client has sent `initialized`
    initialized: bool,
}

/// Input schema generated from a tool's parameter struct
fn input_schema<T: JsonSchema>() -> Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema).unwrap_or_else(|_| json!({"type": "object"}))
}

fn parse_args<P: DeserializeOwned>(args: Map<String, Value>) -> Result<P, ToolError> {
    serde_json::from_value(Value::Object(args)).map_err(|e| ToolError::InvalidParams(e.to_string()))
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(tracker: MoodTrackerServer) -> Self {
        Self {
            tracker,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and for notifications, which get no
    /// reply.
    pub async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request).await
    }

    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                if request.id.is_null() {
                    return None;
                }
                JsonRpcResponse::success(request.id, json!(null))
            }
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        };
        Some(response)
    }

    fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request
            .params
            .map(serde_json::from_value::<InitializeParams>)
        {
            Some(Ok(params)) => {
                let client = params.client_info.map(|c| format!("{} {}", c.name, c.version));
                info!(
                    "MCP client connected: {} (protocol {})",
                    client.as_deref().unwrap_or("unknown client"),
                    params.protocol_version
                );
            }
            Some(Err(e)) => warn!("Unreadable initialize params: {}", e),
            None => info!("MCP client connected"),
        }

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Mood Tracker MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(request.id, error_codes::INTERNAL_ERROR, e.to_string(), None),
        }
    }

    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools = vec![
            ToolDefinition {
                name: "mood_log".to_string(),
                description: "Log a mood score from 1 to 10 for today, with an optional note".to_string(),
                input_schema: input_schema::<tools::LogMoodParams>(),
            },
            ToolDefinition {
                name: "mood_stats".to_string(),
                description: "Weekly average, streak, recent entries, mood distribution and milestones".to_string(),
                input_schema: input_schema::<tools::StatsParams>(),
            },
            ToolDefinition {
                name: "mood_anomalies".to_string(),
                description: "Sudden drops of 3 points or more between consecutive entries".to_string(),
                input_schema: input_schema::<tools::AnomaliesParams>(),
            },
            ToolDefinition {
                name: "mood_patterns".to_string(),
                description: "Average mood per weekday with the best and most challenging day".to_string(),
                input_schema: input_schema::<tools::PatternsParams>(),
            },
            ToolDefinition {
                name: "mood_insights".to_string(),
                description: "Wellbeing recommendations or a two-week improvement plan".to_string(),
                input_schema: input_schema::<tools::InsightsParams>(),
            },
            ToolDefinition {
                name: "mood_export".to_string(),
                description: "Export all mood entries as JSON, oldest first".to_string(),
                input_schema: input_schema::<tools::ExportParams>(),
            },
            ToolDefinition {
                name: "mood_clear".to_string(),
                description: "Delete every mood entry for a user (requires confirm: true)".to_string(),
                input_schema: input_schema::<tools::ClearParams>(),
            },
        ];

        JsonRpcResponse::success(request.id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let name = tool_params.name;
        let args = tool_params.arguments;
        let ctx = self.tracker.request_context();

        let result = match name.as_str() {
            "mood_log" => {
                let outcome = parse_args(args).and_then(|p| tools::log_mood(self.tracker.storage(), &ctx, p));
                text_result(&name, outcome, |r| r.message.clone())
            }
            "mood_stats" => {
                let outcome = parse_args(args).and_then(|p| tools::get_mood_stats(self.tracker.storage(), &ctx, p));
                data_result(&name, outcome, |r| r.message.clone())
            }
            "mood_anomalies" => {
                let outcome =
                    parse_args(args).and_then(|p| tools::get_mood_anomalies(self.tracker.storage(), &ctx, p));
                text_result(&name, outcome, |r| r.message.clone())
            }
            "mood_patterns" => {
                let outcome =
                    parse_args(args).and_then(|p| tools::get_mood_patterns(self.tracker.storage(), &ctx, p));
                text_result(&name, outcome, |r| r.message.clone())
            }
            "mood_insights" => {
                let outcome = match parse_args(args) {
                    Ok(p) => {
                        let (storage, service) = self.tracker.parts_mut();
                        tools::get_mood_insights(storage, service, &ctx, p).await
                    }
                    Err(e) => Err(e),
                };
                text_result(&name, outcome, |r| r.message.clone())
            }
            "mood_export" => {
                let outcome = parse_args(args).and_then(|p| tools::export_moods(self.tracker.storage(), &ctx, p));
                data_result(&name, outcome, |r| r.message.clone())
            }
            "mood_clear" => {
                let outcome = parse_args(args).and_then(|p| tools::clear_moods(self.tracker.storage(), &ctx, p));
                text_result(&name, outcome, |r| r.message.clone())
            }
            _ => ToolCallResult::error(format!("Unknown tool: {}", name)),
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(request.id, error_codes::INTERNAL_ERROR, e.to_string(), None),
        }
    }
}

fn tool_failure(name: &str, error: ToolError) -> ToolCallResult {
    warn!(
        "Tool {} failed (code {}): {}",
        name,
        tool_error_to_json_rpc_code(&error),
        error
    );
    ToolCallResult::error(error.to_string())
}

/// Result with the response message only
fn text_result<T>(
    name: &str,
    outcome: Result<T, ToolError>,
    message: impl FnOnce(&T) -> String,
) -> ToolCallResult {
    match outcome {
        Ok(response) => ToolCallResult::success(message(&response)),
        Err(e) => tool_failure(name, e),
    }
}

/// Result with the message followed by the full response as JSON
fn data_result<T: Serialize>(
    name: &str,
    outcome: Result<T, ToolError>,
    message: impl FnOnce(&T) -> String,
) -> ToolCallResult {
    match outcome {
        Ok(response) => ToolCallResult::with_data(message(&response), &response)
            .unwrap_or_else(|e| ToolCallResult::error(e.to_string())),
        Err(e) => tool_failure(name, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;

    fn server() -> McpServer {
        let storage = SqliteStorage::open_in_memory().unwrap();
        McpServer::new(MoodTrackerServer::with_storage(storage))
    }

    async fn call(server: &mut McpServer, line: Value) -> Value {
        let response = server.process_line(&line.to_string()).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_handshake() {
        let mut server = server();
        let response = call(
            &mut server,
            json!({
                "jsonrpc": "2.0", "id": 1, "method": "initialize",
                "params": {"protocolVersion": MCP_VERSION, "capabilities": {}, "clientInfo": {"name": "test", "version": "1"}}
            }),
        )
        .await;

        assert_eq!(response["result"]["protocolVersion"], MCP_VERSION);
        assert_eq!(response["result"]["serverInfo"]["name"], "Mood Tracker MCP");

        let notification = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        assert!(server.process_line(&notification.to_string()).await.is_none());
        assert!(server.is_initialized());
    }

    #[tokio::test]
    async fn test_tools_list_has_schemas() {
        let mut server = server();
        let response = call(&mut server, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;

        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 7);
        let log = tools.iter().find(|t| t["name"] == "mood_log").unwrap();
        assert!(log["inputSchema"]["properties"]["mood"].is_object());
        assert_eq!(log["inputSchema"]["required"], json!(["mood"]));
    }

    #[tokio::test]
    async fn test_log_then_stats() {
        let mut server = server();
        let response = call(
            &mut server,
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
                   "params": {"name": "mood_log", "arguments": {"mood": 7, "note": "good run"}}}),
        )
        .await;
        assert_eq!(response["result"]["isError"], false);
        assert!(response["result"]["content"][0]["text"].as_str().unwrap().contains("7/10"));

        let response = call(
            &mut server,
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
                   "params": {"name": "mood_stats", "arguments": {}}}),
        )
        .await;
        let data: Value =
            serde_json::from_str(response["result"]["content"][1]["text"].as_str().unwrap()).unwrap();
        assert_eq!(data["summary"]["total"], 1);
        assert_eq!(data["summary"]["average"], 7.0);
    }

    #[tokio::test]
    async fn test_tool_errors_are_results() {
        let mut server = server();
        let response = call(
            &mut server,
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call",
                   "params": {"name": "mood_log", "arguments": {"mood": 12}}}),
        )
        .await;
        assert_eq!(response["result"]["isError"], true);

        let response = call(
            &mut server,
            json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call",
                   "params": {"name": "mood_fly", "arguments": {}}}),
        )
        .await;
        assert!(response["result"]["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Unknown tool"));
    }

    #[tokio::test]
    async fn test_bad_json_and_unknown_method() {
        let mut server = server();
        let response = server.process_line("{not json").await.unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::PARSE_ERROR);

        let response = call(&mut server, json!({"jsonrpc": "2.0", "id": 7, "method": "resources/list"})).await;
        assert_eq!(response["error"]["code"], error_codes::METHOD_NOT_FOUND);
    }
}
