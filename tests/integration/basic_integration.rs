/// End-to-end tests through the MCP JSON-RPC surface
use habit_metrics_mcp::*;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    async fn new_server(temp_file: &NamedTempFile) -> McpServer {
        let server = HabitMetricsServer::new(temp_file.path().to_path_buf(), MetricsLocale::default())
            .await
            .expect("Failed to create server");
        McpServer::new(server)
    }

    async fn send(server: &mut McpServer, request: Value) -> Value {
        let response = server
            .process_line(&request.to_string())
            .await
            .expect("Expected a response");
        serde_json::to_value(response).expect("Response should serialize")
    }

    async fn call_tool(server: &mut McpServer, id: u64, name: &str, arguments: Value) -> (bool, String) {
        let response = send(server, json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments}
        })).await;

        let result = &response["result"];
        let is_error = result["isError"].as_bool().unwrap_or(true);
        let text = result["content"][0]["text"].as_str().unwrap_or_default().to_string();
        (is_error, text)
    }

    #[tokio::test]
    async fn test_initialize_and_list_tools() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut server = new_server(&temp_file).await;

        let init = send(&mut server, json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {"protocolVersion": "2024-11-05", "capabilities": {}}
        })).await;
        assert_eq!(init["result"]["protocolVersion"], json!("2024-11-05"));
        assert_eq!(init["result"]["serverInfo"]["name"], json!("Habit Metrics MCP"));

        let notification = server
            .process_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(notification.is_none());
        assert!(server.is_initialized());

        let null_id = send(&mut server, json!({"jsonrpc": "2.0", "id": null, "method": "tools/list"})).await;
        assert_eq!(null_id["id"], Value::Null);
        assert!(null_id["result"]["tools"].is_array());

        let tools = send(&mut server, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;
        let names: Vec<&str> = tools["result"]["tools"]
            .as_array()
            .expect("tools should be an array")
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert_eq!(names, vec!["habit_create", "habit_log", "habit_list", "habit_status", "habit_delete"]);
    }

    #[tokio::test]
    async fn test_streak_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut server = new_server(&temp_file).await;

        let (is_error, text) = call_tool(&mut server, 1, "habit_create", json!({"title": "Read"})).await;
        assert!(!is_error, "{}", text);
        assert!(text.contains("Habit ID: 1"));

        for (id, date) in [(2, "2024-01-01"), (3, "2024-01-02"), (4, "2024-01-05"), (5, "2024-01-06"), (6, "2024-01-07")] {
            let (is_error, text) = call_tool(&mut server, id, "habit_log", json!({"habit_id": 1, "date": date})).await;
            assert!(!is_error, "{}", text);
        }

        let (is_error, text) = call_tool(&mut server, 7, "habit_status", json!({"habit_id": "1"})).await;
        assert!(!is_error, "{}", text);
        assert!(text.contains("Current streak: 3 days (05.01.2024 - 07.01.2024)"));
        assert!(text.contains("Best streak: 3 days (05.01.2024 - 07.01.2024)"));
        assert!(text.contains("\"max_streak_length\": 3"));

        let (is_error, text) = call_tool(&mut server, 8, "habit_list", json!({})).await;
        assert!(!is_error);
        assert!(text.contains("Current: 3"));
        assert!(text.contains("Events: 5"));
    }

    #[tokio::test]
    async fn test_tool_errors_are_reported() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut server = new_server(&temp_file).await;

        let (is_error, text) = call_tool(&mut server, 1, "habit_log", json!({"habit_id": "42"})).await;
        assert!(is_error);
        assert!(text.contains("Habit not found"));

        let (is_error, _) = call_tool(&mut server, 2, "habit_create", json!({"title": "X", "kind": "weekly"})).await;
        assert!(is_error);

        let (is_error, _) = call_tool(&mut server, 3, "habit_create", json!({})).await;
        assert!(is_error);

        let (is_error, text) = call_tool(&mut server, 4, "habit_teleport", json!({})).await;
        assert!(is_error);
        assert!(text.contains("Unknown tool"));

        let unknown = send(&mut server, json!({"jsonrpc": "2.0", "id": 5, "method": "resources/list"})).await;
        assert_eq!(unknown["error"]["code"], json!(-32601));

        let garbage = server.process_line("{not json").await.expect("parse errors get a response");
        let garbage = serde_json::to_value(garbage).unwrap();
        assert_eq!(garbage["error"]["code"], json!(-32700));
    }

    #[tokio::test]
    async fn test_delete_removes_history() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut server = new_server(&temp_file).await;

        call_tool(&mut server, 1, "habit_create", json!({"title": "Coffee", "kind": "numeric_lower"})).await;
        let (is_error, _) = call_tool(&mut server, 2, "habit_log", json!({"habit_id": 1, "date": "2024-03-01", "value": 3})).await;
        assert!(!is_error);

        let (is_error, text) = call_tool(&mut server, 3, "habit_delete", json!({"habit_id": 1})).await;
        assert!(!is_error);
        assert!(text.contains("Coffee"));

        let (is_error, text) = call_tool(&mut server, 4, "habit_status", json!({})).await;
        assert!(!is_error);
        assert!(text.contains("No habits found"));
    }

    #[test]
    fn test_database_persistence() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let first = tokio_test::block_on(HabitMetricsServer::new(db_path.clone(), MetricsLocale::default()))
            .expect("Failed to create first server");
        first.storage()
            .create_habit(&NewHabit::new("Yoga".to_string(), HabitKind::Checkbox).unwrap())
            .unwrap();
        drop(first);

        let second = tokio_test::block_on(HabitMetricsServer::new(db_path, MetricsLocale::default()))
            .expect("Failed to create second server");
        assert_eq!(second.storage().list_habits().unwrap().len(), 1);
    }
}
