use clap::Parser;
use startup_agent_lib::config::{self, PartialProviderConfig, ProviderConfig};
use startup_agent_lib::server::{self, ServerAppState, DEFAULT_MAX_CONCURRENT_RUNS};
use startup_agent_lib::shutdown::{register_signal_handlers, ShutdownState};
use std::path::Path;
use std::sync::Arc;

/// Startup Agent - turns a startup goal into research, branding, pricing and an investor email
#[derive(Parser, Debug)]
#[command(name = "startup-agent")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port to bind the server to
    #[arg(long, default_value = "3001")]
    port: u16,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Maximum number of pipeline runs executing at once; extra requests wait
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT_RUNS)]
    max_concurrent_runs: usize,

    /// Allowed CORS origins (comma separated). Any origin when omitted
    #[arg(long, value_delimiter = ',')]
    cors_origins: Option<Vec<String>>,

    /// Chat-completion base URL (OpenAI-compatible)
    #[arg(long, env = "MINIMAX_BASE_URL")]
    chat_base_url: Option<String>,

    /// Chat-completion API key
    #[arg(long, env = "MINIMAX_API_KEY", hide_env_values = true)]
    chat_api_key: Option<String>,

    /// Chat model identifier (defaults to gpt-4o-mini)
    #[arg(long, env = "MINIMAX_MODEL")]
    chat_model: Option<String>,

    /// Tavily search API key
    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
    search_api_key: Option<String>,
}

impl Cli {
    fn provider_config(&self) -> PartialProviderConfig {
        PartialProviderConfig {
            chat_base_url: self.chat_base_url.clone(),
            chat_api_key: self.chat_api_key.clone(),
            chat_model: self.chat_model.clone(),
            search_api_key: self.search_api_key.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init();

    // Must run before parsing so env fallbacks see the file
    config::load_env_file(Path::new(config::ENV_FILE));
    let cli = Cli::parse();

    let providers = ProviderConfig::from_partial(cli.provider_config())?;
    log::info!(
        "Chat provider: {} (model {})",
        providers.chat_base_url,
        providers.chat_model
    );

    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let shutdown_state = ShutdownState::new();
        if let Err(e) = register_signal_handlers(shutdown_state.clone()) {
            log::warn!("Failed to register signal handlers: {}", e);
        }

        let state = ServerAppState::new(
            Arc::new(providers.chat_client()),
            Arc::new(providers.search_client()),
            shutdown_state,
            cli.max_concurrent_runs,
        );

        server::run_server(cli.port, &cli.bind, state, cli.cors_origins.clone())
            .await
            .map_err(|e| anyhow::anyhow!(e))?;

        log::info!("Server stopped");
        Ok::<(), anyhow::Error>(())
    })
}
