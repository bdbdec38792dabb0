use anyhow::Result;
use clap::{Parser, Subcommand};
use searchlight::args::ArrayPolicy;
use searchlight::dispatch::Dispatcher;
use searchlight::mcp::{self, SearchlightMcp};
use searchlight_local::{TavilyClient, TavilyConfig};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[command(name = "searchlight")]
#[command(about = "Tavily search/extract as MCP tools (stdio server)", long_about = None)]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,
    /// Defaults to `mcp-stdio`.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as an MCP stdio server (for Cursor / Claude Desktop / MCP clients).
    McpStdio,
    /// Print the advertised tool catalogue as JSON (no API key needed).
    Tools,
    /// Print version info.
    Version(VersionCmd),
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    /// Tavily API key. Required to serve.
    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    /// Search endpoint (default: https://api.tavily.com/search).
    #[arg(long, env = "TAVILY_SEARCH_ENDPOINT", global = true)]
    search_endpoint: Option<String>,
    /// Extract endpoint (default: https://api.tavily.com/extract).
    #[arg(long, env = "TAVILY_EXTRACT_ENDPOINT", global = true)]
    extract_endpoint: Option<String>,
    /// Reject non-array values for include_domains/exclude_domains/urls instead of
    /// treating them as empty.
    #[arg(
        long,
        env = "SEARCHLIGHT_STRICT_ARRAYS",
        action = clap::ArgAction::SetTrue,
        global = true
    )]
    strict_arrays: bool,
}

#[derive(clap::Args, Debug)]
struct VersionCmd {
    /// Output format. Allowed: json, text
    #[arg(long = "output", default_value = "json")]
    output: String,
}

fn init_logging() {
    // Stdout carries the protocol; logs go to stderr only.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Opt-in env file (`SEARCHLIGHT_ENV_FILE`). Never overrides variables already set.
///
/// Runs before logging is installed so the file may set `RUST_LOG`; the outcome is
/// returned for `report_env_file` to log afterwards.
fn load_env_file() -> Option<(String, Result<(), dotenvy::Error>)> {
    let p = std::env::var("SEARCHLIGHT_ENV_FILE").ok()?;
    let p = p.trim();
    if p.is_empty() {
        return None;
    }
    let loaded = dotenvy::from_path(p).map(|_| ());
    Some((p.to_string(), loaded))
}

fn report_env_file(outcome: Option<(String, Result<(), dotenvy::Error>)>) {
    match outcome {
        None => {}
        Some((path, Ok(()))) => tracing::debug!(path = %path, "loaded env file"),
        Some((path, Err(e))) => tracing::warn!(path = %path, error = %e, "could not load env file"),
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let config = TavilyConfig::new(
        args.api_key.as_deref(),
        args.search_endpoint.as_deref(),
        args.extract_endpoint.as_deref(),
    )
    .inspect_err(|e| tracing::error!(error = %e, "refusing to start"))?;
    let arrays = if args.strict_arrays {
        ArrayPolicy::Strict
    } else {
        ArrayPolicy::Lenient
    };
    tracing::info!(
        search_endpoint = config.search_endpoint(),
        extract_endpoint = config.extract_endpoint(),
        strict_arrays = args.strict_arrays,
        "starting searchlight"
    );

    let client = TavilyClient::new(searchlight_local::http_client()?, &config);
    let svc = SearchlightMcp::new(Dispatcher::new(Arc::new(client), arrays));

    let ct = CancellationToken::new();
    tokio::spawn({
        let ct = ct.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received, closing transport");
                ct.cancel();
            }
        }
    });

    mcp::serve_stdio(svc, ct)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_file = load_env_file();
    init_logging();
    report_env_file(env_file);

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::McpStdio) {
        Commands::McpStdio => {
            serve(cli.serve).await?;
            // The blocking stdin reader can outlive the transport and hold the runtime open.
            std::process::exit(0);
        }
        Commands::Tools => {
            let tools = searchlight::descriptor::list_tools();
            println!("{}", serde_json::to_string_pretty(&tools)?);
        }
        Commands::Version(args) => {
            let v = serde_json::json!({
                "kind": "version",
                "name": "searchlight",
                "version": env!("CARGO_PKG_VERSION"),
            });
            match args.output.to_ascii_lowercase().as_str() {
                "text" => println!("searchlight {}", env!("CARGO_PKG_VERSION")),
                _ => println!("{v}"),
            }
        }
    }
    Ok(())
}
