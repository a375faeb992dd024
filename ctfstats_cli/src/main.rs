mod commands;
mod output;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "ctfstats")]
#[command(about = "Export a CTFtime team's season results as JSON")]
struct Cli {
    #[command(flatten)]
    scrape: commands::scrape::ScrapeArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ctfstats=info".parse()?)
                .add_directive("ctftime_api=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let base_url = std::env::var("CTFTIME_BASE_URL").ok();
    commands::scrape::run(&cli.scrape, base_url.as_deref()).await?;

    Ok(())
}
