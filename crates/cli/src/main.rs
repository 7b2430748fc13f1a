use std::{path::PathBuf, sync::Arc};

use {
    clap::{Parser, Subcommand},
    secrecy::Secret,
    tracing::{error, info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    forgecord_channels::{ChannelReconciler, MembershipRegistry, PushRouter},
    forgecord_config::ForgecordConfig,
    forgecord_discord::{BridgeHandler, DiscordOutbound},
    forgecord_gateway::AppState,
    forgecord_hosting::HostingClient,
};

#[derive(Parser)]
#[command(name = "forgecord", about = "GitHub to Discord channel bridge")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file path (overrides the standard search locations).
    #[arg(long, global = true, env = "FORGECORD_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bridge (default when no subcommand is provided).
    Run,
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config with secrets redacted.
    Show,
    /// Check the config for startup problems.
    Validate,
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}

fn load_config(cli: &Cli) -> ForgecordConfig {
    let Some(path) = &cli.config else {
        return forgecord_config::discover_and_load();
    };
    let mut config = match forgecord_config::load_config(path) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "failed to load config, using defaults");
            ForgecordConfig::default()
        },
    };
    forgecord_config::apply_env_overrides(&mut config);
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli);
    let config = load_config(&cli);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_bridge(config).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                show_config(&config);
                Ok(())
            },
            ConfigAction::Validate => validate_config(&config),
        },
    }
}

fn show_config(config: &ForgecordConfig) {
    let mut redacted = config.clone();
    redacted.discord.token = Secret::new("[REDACTED]".into());
    redacted.hosting.token = Secret::new("[REDACTED]".into());
    match toml::to_string_pretty(&redacted) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => eprintln!("failed to render config: {e}"),
    }
}

fn validate_config(config: &ForgecordConfig) -> anyhow::Result<()> {
    let problems = config.validate();
    if problems.is_empty() {
        println!("config OK");
        return Ok(());
    }
    for problem in &problems {
        eprintln!("problem: {problem}");
    }
    anyhow::bail!("{} config problem(s)", problems.len())
}

async fn run_bridge(config: ForgecordConfig) -> anyhow::Result<()> {
    let problems = config.validate();
    if !problems.is_empty() {
        for problem in &problems {
            error!("{problem}");
        }
        anyhow::bail!("refusing to start with incomplete config");
    }

    let hosting = Arc::new(HostingClient::with_api_base(
        config.hosting.token.clone(),
        config.hosting.api_base.clone(),
    ));
    let registry = Arc::new(MembershipRegistry::new());
    let reconciler = Arc::new(ChannelReconciler::new(
        hosting.clone(),
        config.hosting.org.clone(),
    ));
    let handler = BridgeHandler::new(
        Arc::clone(&registry),
        Arc::clone(&reconciler),
        hosting.clone(),
    );

    let mut client = forgecord_discord::connect(&config.discord.token, handler)
        .await
        .map_err(|e| anyhow::anyhow!("discord connect failed: {e}"))?;

    // The webhook receiver shares the registry and the bot's HTTP handle.
    let state = AppState {
        router: Arc::new(PushRouter::new(config.notify.branch.clone())),
        registry: Arc::clone(&registry),
        outbound: Arc::new(DiscordOutbound::new(client.http.clone())),
    };
    let bind = config.webhook.bind.clone();
    let port = config.webhook.port;
    tokio::spawn(async move {
        if let Err(e) = forgecord_gateway::start(&bind, port, state).await {
            error!(error = %e, "webhook receiver exited");
        }
    });

    info!(org = %config.hosting.org, "starting discord gateway");
    client
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("discord client error: {e}"))?;
    Ok(())
}
