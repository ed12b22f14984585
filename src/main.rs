//! WebSearch Agent: web search with AI summaries
//!
//! This is the main entry point for the application.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use websearch_agent::{
    cli::{self, QueryOptions},
    config::{self, SearchProvider, Settings},
    web::{create_router, AppState},
    ResearchAgent,
};

/// Search the web and summarize what it finds
#[derive(Parser, Debug)]
#[command(name = "websearch-agent")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to settings.yml
    #[arg(short, long, global = true, env = "WEBSEARCH_SETTINGS_PATH")]
    config: Option<PathBuf>,

    /// Search provider to use
    #[arg(short, long, global = true, value_enum)]
    provider: Option<SearchProvider>,

    /// Number of search results to fetch
    #[arg(short, long, global = true)]
    num_results: Option<usize>,

    /// Summarize the first results without AI relevance filtering
    #[arg(long, global = true)]
    no_filter: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask questions at an interactive prompt (default)
    Interactive,

    /// Answer a single question and exit
    Ask {
        /// The question to research
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Serve the JSON API
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Interactive);

    let default_level = match command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    init_tracing(default_level);

    let mut settings = config::load(cli.config.as_deref())?;
    if let Some(provider) = cli.provider {
        settings.search.provider = provider;
    }
    if cli.no_filter {
        settings.ai.filter_results = false;
    }

    match command {
        Commands::Interactive => {
            let agent = build_agent(&settings)?;
            let options = QueryOptions::for_agent(&agent, cli.num_results, cli.no_filter);
            cli::run_interactive(&agent, options).await
        }
        Commands::Ask { query } => {
            let agent = build_agent(&settings)?;
            let options = QueryOptions::for_agent(&agent, cli.num_results, cli.no_filter);
            cli::ask(&agent, &query.join(" "), options).await
        }
        Commands::Serve { port, bind } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            if let Some(bind) = bind {
                settings.server.bind_address = bind;
            }
            serve(settings).await
        }
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn build_agent(settings: &Settings) -> Result<ResearchAgent> {
    ResearchAgent::from_settings(settings).context(
        "Configuration error. Create a .env file with GROQ_API_KEY \
         (and SERPER_API_KEY when using the Serper provider)",
    )
}

async fn serve(settings: Settings) -> Result<()> {
    info!("Starting WebSearch Agent v{}", websearch_agent::VERSION);

    // The API still answers health checks without credentials
    let state = match ResearchAgent::from_settings(&settings) {
        Ok(agent) => AppState::new(agent),
        Err(e) => {
            error!("Agent not initialized: {:#}", e);
            AppState::unconfigured()
        }
    };

    let app = create_router(state);

    let addr = SocketAddr::new(
        settings
            .server
            .bind_address
            .parse()
            .with_context(|| format!("invalid bind address: {}", settings.server.bind_address))?,
        settings.server.port,
    );

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
