/// End-to-end MCP request handling over a real database file
use mood_tracker_mcp::*;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

async fn call_tool(server: &mut McpServer, id: u64, name: &str, arguments: Value) -> Value {
    let request = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    });
    let response = server
        .process_line(&request.to_string())
        .await
        .expect("tools/call always replies");
    serde_json::to_value(response).unwrap()
}

fn text(response: &Value, index: usize) -> &str {
    response["result"]["content"][index]["text"].as_str().unwrap_or_default()
}

async fn server_at(temp_file: &NamedTempFile) -> McpServer {
    let tracker = MoodTrackerServer::new(temp_file.path().to_path_buf())
        .await
        .expect("Failed to create server");
    McpServer::new(tracker)
}

#[tokio::test]
async fn test_log_week_and_read_back() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let mut server = server_at(&temp_file).await;

    for (i, mood) in [8, 7, 3].iter().enumerate() {
        let response = call_tool(&mut server, i as u64, "mood_log", json!({"mood": mood})).await;
        assert_eq!(response["result"]["isError"], false);
    }

    // All three share today's date
    let stats = call_tool(&mut server, 10, "mood_stats", json!({})).await;
    let data: Value = serde_json::from_str(text(&stats, 1)).unwrap();
    assert_eq!(data["summary"]["total"], 3);
    assert_eq!(data["summary"]["streak"], 1);
    assert_eq!(data["summary"]["today_mood"], 8);
    assert_eq!(data["summary"]["average"], 6.0);

    let anomalies = call_tool(&mut server, 11, "mood_anomalies", json!({})).await;
    assert!(text(&anomalies, 0).contains("7 → 3"));

    let patterns = call_tool(&mut server, 12, "mood_patterns", json!({})).await;
    assert!(text(&patterns, 0).contains("4 more moods"));

    let export = call_tool(&mut server, 13, "mood_export", json!({})).await;
    let data: Value = serde_json::from_str(text(&export, 1)).unwrap();
    let moods: Vec<i64> = data["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["mood"].as_i64().unwrap())
        .collect();
    assert_eq!(moods, vec![8, 7, 3]);
}

#[tokio::test]
async fn test_insights_through_mcp() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let mut server = server_at(&temp_file).await;

    call_tool(&mut server, 1, "mood_log", json!({"mood": 9})).await;

    let recs = call_tool(&mut server, 2, "mood_insights", json!({})).await;
    assert_eq!(recs["result"]["isError"], false);
    assert!(text(&recs, 0).contains("Wellbeing Suggestions"));

    let plan = call_tool(&mut server, 3, "mood_insights", json!({"kind": "plan"})).await;
    assert_eq!(plan["result"]["isError"], true);
    assert!(text(&plan, 0).contains("Not enough data"));
}

#[tokio::test]
async fn test_clear_requires_confirm() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let mut server = server_at(&temp_file).await;

    call_tool(&mut server, 1, "mood_log", json!({"mood": 5, "user_id": "user_1"})).await;

    let refused = call_tool(&mut server, 2, "mood_clear", json!({"user_id": "user_1"})).await;
    assert_eq!(refused["result"]["isError"], true);

    let cleared = call_tool(&mut server, 3, "mood_clear", json!({"user_id": "user_1", "confirm": true})).await;
    assert!(text(&cleared, 0).contains("Removed 1 entry for user_1"));
}

#[tokio::test]
async fn test_invalid_arguments() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let mut server = server_at(&temp_file).await;

    let missing = call_tool(&mut server, 1, "mood_log", json!({"note": "no score"})).await;
    assert_eq!(missing["result"]["isError"], true);
    assert!(text(&missing, 0).contains("Invalid parameters"));

    let blank_user = call_tool(&mut server, 2, "mood_stats", json!({"user_id": "  "})).await;
    assert_eq!(blank_user["result"]["isError"], true);
}
