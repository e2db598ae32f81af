/// Main entry point for the Mood Tracker MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use mood_tracker_mcp::{
    InsightService, MoodTrackerServer, RuleBasedProvider, UserId, DEFAULT_INSIGHT_TTL,
};

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|mut p| {
            p.push(".mood_tracker");
            p
        }),
        dirs::data_dir().map(|mut p| {
            p.push("mood_tracker");
            p
        }),
        dirs::config_dir().map(|mut p| {
            p.push("mood_tracker");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".mood_tracker");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if let Ok(()) = std::fs::create_dir_all(potential_path) {
            // Test if we can write to this directory
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("moods.db"));
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("mood_tracker");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("moods.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the Mood Tracker MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// User ID applied to tool calls that don't name one (anonymous if omitted)
    #[arg(long)]
    user: Option<String>,

    /// How long generated insights are cached, in seconds
    #[arg(long, default_value_t = DEFAULT_INSIGHT_TTL.as_secs())]
    insight_ttl: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("mood_tracker_mcp={}", log_level))
        .with_writer(std::io::stderr) // Send logs to stderr, not stdout
        .init();

    info!("Starting Mood Tracker MCP server");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let default_user = args.user.map(UserId::new).transpose()?;
    let insights = InsightService::new(
        Box::new(RuleBasedProvider::new()),
        Duration::from_secs(args.insight_ttl),
    );

    let server = MoodTrackerServer::new(db_path)
        .await?
        .with_default_user(default_user)
        .with_insight_service(insights);

    // Run the MCP server - this will handle JSON-RPC communication over stdin/stdout
    server.run().await?;

    info!("Mood Tracker MCP server shutdown complete");
    Ok(())
}
