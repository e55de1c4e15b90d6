/// End-to-end tests driving the MCP server
mod basic_integration;
