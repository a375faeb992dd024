//! Fetch a team page, extract its seasons, and write the JSON document.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use ctfstats_lib::{scrape_profile, to_json, validation, CachedClient, DiskCache, PageLayout};

use crate::output;

/// Arguments for a scrape run.
#[derive(Args)]
pub struct ScrapeArgs {
    /// CTFtime team id (the number in https://ctftime.org/team/<id>)
    pub team_id: String,

    /// Directory receiving <team_id>.json
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Directory for cached team pages
    #[arg(long, default_value = "cache")]
    pub cache_dir: PathBuf,

    /// Always fetch the page, never read or write the cache
    #[arg(long)]
    pub no_cache: bool,

    /// Refetch cached pages older than this many seconds (default: never)
    #[arg(long)]
    pub cache_ttl_secs: Option<u64>,
}

pub async fn run(args: &ScrapeArgs, base_url: Option<&str>) -> Result<()> {
    let team_id = validation::validate_team_id(&args.team_id)?;

    let cache = if args.no_cache {
        None
    } else {
        Some(DiskCache::new(
            &args.cache_dir,
            args.cache_ttl_secs.map(Duration::from_secs),
        ))
    };
    let client = match base_url {
        Some(url) => CachedClient::with_base_url(url, cache),
        None => CachedClient::new(cache),
    };

    let html = client.get_team_page(&team_id).await?;
    let profile = scrape_profile(&html, &PageLayout::new()?);
    tracing::info!(
        "Extracted {} seasons with {} CTF results",
        profile.seasons().len(),
        profile.ctf_count()
    );

    let data = to_json(&profile)?;
    let path = output::output_path(&args.output_dir, &team_id);
    output::write_document(&path, &data)?;

    tracing::info!("Json file {} generated", path.display());
    Ok(())
}
