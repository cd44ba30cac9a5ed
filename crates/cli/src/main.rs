mod config_commands;
mod session_commands;

use {
    clap::{Parser, Subcommand},
    tgpanel_common::{ChatId, ThreadId, UserId},
    tgpanel_sessions::JsonFileSessionStore,
    tracing::{debug, info},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "tgpanel", about = "tgpanel: Telegram control-panel worker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Custom config directory (overrides default ~/.config/tgpanel/).
    #[arg(long, global = true, env = "TGPANEL_CONFIG_DIR")]
    config_dir: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which forum topic a panel reply would go to.
    ResolveThread {
        /// Telegram user id of the sender.
        #[arg(long)]
        user: UserId,
        /// Chat the event happened in (negative for groups).
        #[arg(long, allow_hyphen_values = true)]
        chat: ChatId,
        /// Topic the event itself was posted in.
        #[arg(long)]
        thread: Option<ThreadId>,
    },
    /// Session inspection.
    Sessions {
        #[command(subcommand)]
        action: session_commands::SessionAction,
    },
    /// Configuration inspection.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "tgpanel starting");

    if let Some(ref dir) = cli.config_dir {
        tgpanel_config::set_config_dir(dir.clone());
    }
    let config = tgpanel_config::discover_and_load();

    let sessions_path = config.sessions.resolved_path();
    let store = JsonFileSessionStore::new(sessions_path);

    match cli.command {
        Commands::ResolveThread { user, chat, thread } => {
            let resolved =
                session_commands::resolve_thread(&store, &config.telegram, user, chat, thread)
                    .await?;
            info!(%user, %chat, explicit = ?thread, resolved = ?resolved, "resolved panel thread");
            match resolved {
                Some(thread) => println!("{thread}"),
                None => println!("none"),
            }
            Ok(())
        },
        Commands::Sessions { action } => session_commands::handle_sessions(&store, action).await,
        Commands::Config { action } => config_commands::handle_config(&config, action),
    }
}
