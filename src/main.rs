use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use tracing::error;

use autokeep::cli::{self, Cli};
use autokeep::config::environment::EnvironmentConfig;
use autokeep::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging (diagnóstico por stderr; la salida útil va por stdout)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EnvironmentConfig::from_env()?;
    let state = AppState::new(config);

    if let Err(e) = cli::run(cli.command, &state).await {
        error!("{}", e);
        eprintln!("❌ {}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
