//! rollmatch MCP Server & CLI (Rust)
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: Command-line utility for direct tool execution
//!
//! Implements one tool:
//! - `search` - Search the voter registry by name and address

mod annotate;
mod autofill;
mod cli;
mod error;
mod http;
mod mcp;
mod query;
mod registry;
mod tools;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, MCP server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        // CLI mode - parse arguments and execute
        run_cli_mode().await
    } else {
        // MCP server mode - default behavior
        run_mcp_mode().await
    }
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    // Execute command
    let result = match cli.command {
        Some(Commands::Search(args)) => execute_search_cli(args).await,
        Some(Commands::Verify(args)) => execute_verify_cli(args).await,
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    // Handle result and exit with appropriate code
    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Execute search command in CLI mode
async fn execute_search_cli(args: cli::SearchArgs) -> Result<String> {
    use registry::HttpRegistryStore;
    use tokio::time::{timeout, Duration};

    let params = args.to_params().map_err(|e| anyhow::anyhow!(e.message()))?;
    let store = HttpRegistryStore::new(args.registry_url.clone());

    let result = timeout(
        Duration::from_secs(120),
        tools::search::execute_search(&store, &params),
    )
    .await;

    match result {
        Ok(Ok(tool_result)) => {
            // Extract markdown text from ToolResult
            Ok(tool_result
                .content
                .first()
                .map(|c| c.text.clone())
                .unwrap_or_default())
        }
        Ok(Err(e)) => Err(anyhow::anyhow!(e.message())),
        Err(_) => Err(anyhow::anyhow!("Request exceeded 120 second timeout")),
    }
}

/// Execute verify command in CLI mode
///
/// Runs the ballot-entry auto-fill flow: the entry is offered for adoption,
/// then the automatic search fires after the second delay. Non-interactive,
/// so nothing ever cancels the timers here, but the flow is the same one an
/// interactive front end drives.
async fn execute_verify_cli(args: cli::VerifyArgs) -> Result<String> {
    use autofill::FormAutoFill;
    use query::{BallotEntry, QueryBuilder};
    use registry::HttpRegistryStore;
    use tokio::time::{timeout, Duration};
    use tools::search::SearchToolParams;

    let entry = BallotEntry {
        name_printed: args.name.clone(),
        street_number: args.street_number.clone(),
        street_name: args.street_name.clone(),
    };

    let autofill = FormAutoFill::new();
    autofill
        .offer(&entry)
        .await
        .ok_or_else(|| anyhow::anyhow!("Ballot entry name too short to search"))?;
    let form = autofill
        .auto_search_gate()
        .await
        .ok_or_else(|| anyhow::anyhow!("Automatic search was superseded"))?;

    let params = SearchToolParams {
        query: QueryBuilder::build(&form),
        sort: None,
        order: None,
    };
    let store = HttpRegistryStore::new(args.registry_url.clone());

    let result = timeout(
        Duration::from_secs(120),
        tools::search::execute_search(&store, &params),
    )
    .await;

    match result {
        Ok(Ok(tool_result)) => Ok(tool_result
            .content
            .first()
            .map(|c| c.text.clone())
            .unwrap_or_default()),
        Ok(Err(e)) => Err(anyhow::anyhow!(e.message())),
        Err(_) => Err(anyhow::anyhow!("Request exceeded 120 second timeout")),
    }
}

/// Map error text to exit code
fn get_exit_code(err: &anyhow::Error) -> i32 {
    let err_str = err.to_string().to_lowercase();

    if err_str.contains("invalid") || err_str.contains("usage") {
        1 // Invalid arguments or usage error
    } else if err_str.contains("network") || err_str.contains("connection") {
        2 // Network or API error
    } else if err_str.contains("not found") {
        3 // Not found error
    } else if err_str.contains("timeout") {
        4 // Timeout error
    } else {
        5 // Other application errors
    }
}

/// Run in MCP server mode
async fn run_mcp_mode() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    info!("Starting rollmatch MCP Server");

    // Handle stdio MCP communication
    mcp::handle_stdio().await?;

    Ok(())
}
