//! CLI mode implementation
//!
//! Provides command-line interface for the rollmatch search tool

use crate::annotate::{SortField, SortOrder};
use crate::error::AppError;
use crate::query::{MatchMode, SearchField, SearchQuery};
use crate::tools::search::SearchToolParams;
use clap::{Parser, Subcommand};

/// Rollmatch CLI
#[derive(Parser)]
#[command(name = "rollmatch")]
#[command(about = "Voter registry search utility", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the voter registry by name and address
    Search(SearchArgs),
    /// Verify a ballot sheet entry against the registry
    Verify(VerifyArgs),
}

/// Search command arguments
#[derive(Parser, Clone, Debug)]
pub struct SearchArgs {
    /// First name to search for
    #[arg(short = 'f', long)]
    pub first_name: Option<String>,

    /// How the first name must align (starts|within|ends)
    #[arg(long, default_value = "starts")]
    pub first_match: String,

    /// Last name to search for
    #[arg(short = 'l', long)]
    pub last_name: Option<String>,

    /// How the last name must align (starts|within|ends)
    #[arg(long, default_value = "starts")]
    pub last_match: String,

    /// Street number, matched exactly
    #[arg(short = 'n', long)]
    pub street_number: Option<String>,

    /// Street name to search for
    #[arg(short = 's', long)]
    pub street_name: Option<String>,

    /// How the street name must align (starts|within|ends)
    #[arg(long, default_value = "starts")]
    pub street_match: String,

    /// Sort field (firstName|lastName|streetNumber|streetName)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order (asc|desc)
    #[arg(long, default_value = "asc")]
    pub order: String,

    /// Registry store endpoint
    #[arg(
        long,
        env = "ROLLMATCH_REGISTRY_URL",
        default_value = "http://localhost:5000"
    )]
    pub registry_url: String,
}

/// Verify command arguments
#[derive(Parser, Clone, Debug)]
pub struct VerifyArgs {
    /// Name as printed on the ballot sheet ("First Last")
    #[arg(long)]
    pub name: String,

    /// Street number from the ballot sheet
    #[arg(short = 'n', long, default_value = "")]
    pub street_number: String,

    /// Street name from the ballot sheet
    #[arg(short = 's', long, default_value = "")]
    pub street_name: String,

    /// Registry store endpoint
    #[arg(
        long,
        env = "ROLLMATCH_REGISTRY_URL",
        default_value = "http://localhost:5000"
    )]
    pub registry_url: String,
}

impl SearchArgs {
    /// Convert the raw CLI flags into validated tool parameters
    pub fn to_params(&self) -> Result<SearchToolParams, AppError> {
        let field = |value: &Option<String>, mode: &str| -> Result<Option<SearchField>, AppError> {
            match value {
                Some(v) => Ok(Some(SearchField::new(v.clone(), MatchMode::parse(mode)?))),
                None => Ok(None),
            }
        };

        let query = SearchQuery {
            first_name: field(&self.first_name, &self.first_match)?,
            last_name: field(&self.last_name, &self.last_match)?,
            street_number: self.street_number.clone(),
            street_name: field(&self.street_name, &self.street_match)?,
        };

        let sort = match &self.sort {
            Some(token) => Some(SortField::parse(token)?),
            None => None,
        };

        Ok(SearchToolParams {
            query,
            sort,
            order: Some(SortOrder::parse(&self.order)?),
        })
    }
}
