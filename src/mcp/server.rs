/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin, one per line
/// 2. Routes tool calls to the habit tools
/// 3. Sends JSON-RPC responses to stdout

use std::collections::HashMap;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools;
use crate::{HabitMetricsServer, ServerError};

/// MCP server that handles communication with an MCP client
pub struct McpServer {
    /// The underlying habit metrics server
    habits: HabitMetricsServer,
    /// Whether the client has sent its initialized notification
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(habits: HabitMetricsServer) -> Self {
        Self {
            habits,
            initialized: false,
        }
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

    /// Whether the client completed the initialization handshake
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and for notifications, which get no
    /// response.
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
                    None
                ));
            }
        };

        let Some(id) = request.id.clone() else {
            self.handle_notification(&request.method);
            return None;
        };

        Some(self.handle_request(id, request))
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                info!("MCP client initialized");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    /// Handle a JSON-RPC request
    fn handle_request(&mut self, id: Value, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(id, json!(null))
            }
            "tools/list" => JsonRpcResponse::success(id, json!({"tools": tool_definitions()})),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => {
                JsonRpcResponse::error(
                    id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("Method '{}' not found", request.method),
                    None
                )
            }
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Habit Metrics MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(id, &result)
    }

    /// Handle tools/call request
    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None
                );
            }
        };

        debug!("Calling tool '{}'", tool_params.name);

        let result = match tool_params.name.as_str() {
            "habit_create" => self.call_habit_create(tool_params.arguments),
            "habit_log" => self.call_habit_log(tool_params.arguments),
            "habit_list" => self.call_habit_list(),
            "habit_status" => self.call_habit_status(tool_params.arguments),
            "habit_delete" => self.call_habit_delete(tool_params.arguments),
            _ => ToolCallResult::error(format!("Unknown tool: {}", tool_params.name)),
        };

        to_response(id, &result)
    }

    fn call_habit_create(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params: tools::CreateHabitParams = match parse_arguments(args) {
            Ok(params) => params,
            Err(result) => return result,
        };

        match tools::create_habit(self.habits.storage(), params) {
            Ok(response) => {
                ToolCallResult::success(format!("{}\nHabit ID: {}", response.message, response.habit_id))
            }
            Err(e) => tool_failure("habit_create", e),
        }
    }

    fn call_habit_log(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params: tools::LogHabitParams = match parse_arguments(args) {
            Ok(params) => params,
            Err(result) => return result,
        };

        match tools::log_habit(self.habits.storage(), params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => tool_failure("habit_log", e),
        }
    }

    fn call_habit_list(&self) -> ToolCallResult {
        match tools::list_habits(self.habits.storage()) {
            Ok(response) => {
                if response.habits.is_empty() {
                    return ToolCallResult::success(
                        "No habits found. Create your first habit to get started!".to_string()
                    );
                }

                let lines = response.habits.iter()
                    .map(|h| format!(
                        "🎯 #{} {} ({}) | 🔥 Current: {} | 🏆 Best: {} | ✅ Events: {}",
                        h.habit_id,
                        h.title,
                        h.kind,
                        h.current_streak,
                        h.max_streak,
                        h.total_events
                    ))
                    .collect::<Vec<_>>()
                    .join("\n");

                ToolCallResult::success(format!("📋 Habits ({})\n\n{}", response.habits.len(), lines))
            }
            Err(e) => tool_failure("habit_list", e),
        }
    }

    fn call_habit_status(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params: tools::StatusParams = match parse_arguments(args) {
            Ok(params) => params,
            Err(result) => return result,
        };

        match tools::get_habit_status(self.habits.storage(), self.habits.analytics(), params) {
            Ok(response) => match serde_json::to_string_pretty(&response.habits) {
                Ok(details) => ToolCallResult::success(format!("{}\n\n{}", response.message, details)),
                Err(e) => ToolCallResult::error(format!("Failed to serialize metrics: {}", e)),
            },
            Err(e) => tool_failure("habit_status", e),
        }
    }

    fn call_habit_delete(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params: tools::DeleteHabitParams = match parse_arguments(args) {
            Ok(params) => params,
            Err(result) => return result,
        };

        match tools::delete_habit(self.habits.storage(), params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => tool_failure("habit_delete", e),
        }
    }
}

/// Tool definitions advertised through tools/list
fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "habit_create".to_string(),
            description: "Create a new habit to track".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "title": {"type": "string", "description": "Title of the habit"},
                    "kind": {"type": "string", "description": "checkbox (default), numeric_higher or numeric_lower"}
                },
                "required": ["title"]
            }),
        },
        ToolDefinition {
            name: "habit_log".to_string(),
            description: "Record a habit event for today or a specific date".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "habit_id": {"type": "string", "description": "ID of the habit"},
                    "date": {"type": "string", "description": "Day of the event (YYYY-MM-DD, optional - defaults to today)"},
                    "value": {"type": "number", "description": "Recorded value (required for numeric habits)"}
                },
                "required": ["habit_id"]
            }),
        },
        ToolDefinition {
            name: "habit_list".to_string(),
            description: "List all habits with their current and best streaks".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        ToolDefinition {
            name: "habit_status".to_string(),
            description: "Show streak intervals and metric labels for a habit".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "habit_id": {"type": "string", "description": "ID of a specific habit (optional - shows all if omitted)"}
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "habit_delete".to_string(),
            description: "Delete a habit and all of its recorded events".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "habit_id": {"type": "string", "description": "ID of the habit to delete"}
                },
                "required": ["habit_id"]
            }),
        },
    ]
}

/// Deserialize tool arguments into the tool's parameter struct
///
/// Numeric habit IDs are accepted as well as strings.
fn parse_arguments<T: DeserializeOwned>(mut args: HashMap<String, Value>) -> Result<T, ToolCallResult> {
    if let Some(Value::Number(n)) = args.get("habit_id") {
        let id = Value::String(n.to_string());
        args.insert("habit_id".to_string(), id);
    }

    let object = Value::Object(args.into_iter().collect());
    serde_json::from_value(object)
        .map_err(|e| ToolCallResult::error(format!("Invalid arguments: {}", e)))
}

fn tool_failure(tool: &str, error: tools::ToolError) -> ToolCallResult {
    warn!("Tool '{}' failed: {}", tool, error);
    ToolCallResult::error(error.to_string())
}

fn to_response<T: serde::Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize result: {}", e),
            None
        ),
    }
}
