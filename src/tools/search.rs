//! Search tool implementation
//!
//! Implements the `search` tool: query the registry store, optionally sort,
//! annotate the batch, and format the annotated outcome as markdown. Shared
//! by the MCP server and the CLI.

use crate::annotate::{
    annotate, sort_records, AnnotatedResult, SearchOutcome, Segment, SortField, SortOrder,
};
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::query::SearchQuery;
use crate::registry::RegistryStore;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tokio::time::{timeout, Duration};
use tracing::debug;

/// Arguments accepted by the `search` tool
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SearchToolParams {
    /// The registry query, an AND of every present field
    #[serde(flatten)]
    pub query: SearchQuery,
    /// Optional sort field for the advanced view
    #[serde(default)]
    pub sort: Option<SortField>,
    /// Sort direction, ascending when omitted
    #[serde(default)]
    pub order: Option<SortOrder>,
}

/// Shared implementation for search (used by MCP and CLI)
pub async fn run_search(
    store: &dyn RegistryStore,
    params: &SearchToolParams,
) -> Result<SearchOutcome, AppError> {
    let query = params.query.normalized();
    if query.is_empty() {
        debug!("Empty query, returning zero-match outcome");
        return Ok(SearchOutcome::empty());
    }

    debug!("Search request: {}", query.describe());

    let mut records = store.search(&query).await?;

    if let Some(field) = params.sort {
        sort_records(&mut records, field, params.order.unwrap_or_default());
    }

    Ok(annotate(records, &query.raw_text()))
}

fn render_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.is_match {
            out.push_str("**");
            out.push_str(&segment.text);
            out.push_str("**");
        } else {
            out.push_str(&segment.text);
        }
    }
    out
}

fn render_row(row: &AnnotatedResult) -> String {
    let mut line = String::new();
    line.push_str("- ");
    line.push_str(&render_segments(&row.highlighted_fields["name"]));
    line.push_str(" · ");
    line.push_str(&render_segments(&row.highlighted_fields["address"]));
    if !row.record.voter_id.is_empty() {
        line.push_str(&format!(" · {}", row.record.voter_id));
    }
    if row.is_top_result {
        line.push_str(" (top result)");
    }
    if row.shares_address_with_top {
        line.push_str(" [same address as top]");
    }
    if row.has_name_address_duplicate {
        line.push_str(" [possible duplicate]");
    }
    line.push('\n');
    line
}

/// Format an annotated outcome as markdown
pub fn format_outcome(query: &SearchQuery, outcome: &SearchOutcome) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Voter Search · {}\n\n", query.describe()));

    if outcome.total_matches == 0 {
        md.push_str("No matching voters.\n");
        return md;
    }

    if outcome.total_matches > outcome.results.len() {
        md.push_str(&format!(
            "Showing top {} of {} matches.\n\n",
            outcome.results.len(),
            outcome.total_matches
        ));
    } else {
        md.push_str(&format!("{} matches.\n\n", outcome.total_matches));
    }

    for row in &outcome.results {
        md.push_str(&render_row(row));
    }

    md
}

/// Shared search-and-format path
pub async fn execute_search(
    store: &dyn RegistryStore,
    params: &SearchToolParams,
) -> Result<ToolResult, AppError> {
    let outcome = run_search(store, params).await?;
    let markdown = format_outcome(&params.query.normalized(), &outcome);
    Ok(ToolResult::text(markdown))
}

/// Handle search tool call (MCP)
pub async fn handle_search(
    id: Option<Value>,
    args: Value,
    store: &dyn RegistryStore,
) -> McpResponse {
    match timeout(Duration::from_secs(120), handle_search_impl(args, store)).await {
        Ok(result) => match result {
            Ok(content) => match serde_json::to_value(content) {
                Ok(value) => McpResponse::success(id, value),
                Err(e) => McpResponse::error(id, "internal_error", &e.to_string()),
            },
            Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
        },
        Err(_) => McpResponse::error(id, "timeout", "Search request exceeded 120 second timeout"),
    }
}

async fn handle_search_impl(
    args: Value,
    store: &dyn RegistryStore,
) -> Result<ToolResult, AppError> {
    let params: SearchToolParams = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidQuery(format!("Invalid arguments: {}", e)))?;

    execute_search(store, &params).await
}
