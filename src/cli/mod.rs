pub mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "zense=info,tower_http=info";

#[derive(Parser)]
#[command(name = "zense")]
#[command(about = "Zense API - journaling, forum and venting backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply pending migrations and serve HTTP (default)")]
    Serve {
        #[arg(long, help = "Bind address, overrides APP_HOST")]
        host: Option<String>,

        #[arg(long, help = "Listen port, overrides APP_PORT")]
        port: Option<u16>,

        #[arg(long, help = "Start without touching the schema")]
        skip_migrations: bool,
    },

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,
}

/// `RUST_LOG` wins; otherwise info for this crate and request spans
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        skip_migrations: false,
    }) {
        Commands::Serve {
            host,
            port,
            skip_migrations,
        } => commands::serve::handle(host, port, skip_migrations).await,
        Commands::Migrate => commands::migrate::handle().await,
    }
}
