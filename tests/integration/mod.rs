/// Integration test target: server, storage and MCP round trips
mod basic_integration;
mod mcp_workflow;
