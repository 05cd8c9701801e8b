use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use oolong::app::AppContext;
use oolong::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(None)?;

    match cli.command {
        Commands::Refresh => {
            commands::refresh(&ctx).await?;
        }
        Commands::List { limit } => {
            commands::list(&ctx, limit).await?;
        }
        Commands::Status => {
            commands::status(&ctx)?;
        }
        Commands::Clear => {
            commands::clear(&ctx)?;
        }
    }

    Ok(())
}
