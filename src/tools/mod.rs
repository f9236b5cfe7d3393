//! Tool implementations shared by the MCP server and the CLI

pub mod search;
