use clap::Parser;
use zense::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, GEMINI_API_KEY
    let _ = dotenvy::dotenv();

    cli::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = cli::run(cli).await {
        tracing::error!("{:#}", e);
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }

    Ok(())
}
