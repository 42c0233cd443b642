//! CLI argument parsing

use clap::{Parser, Subcommand};

/// Translation and career chatbot service for job seekers
#[derive(Parser, Debug)]
#[command(name = "ai-service")]
#[command(version)]
#[command(about = "AI translation and career chatbot HTTP service")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(ServeArgs),

    /// Check a running instance against the HTTP endpoint contract
    Verify(VerifyArgs),
}

#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Path to a YAML or JSON config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Base URL of the running service
    #[arg(short, long, default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Number of times to repeat every check
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub rounds: u32,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
