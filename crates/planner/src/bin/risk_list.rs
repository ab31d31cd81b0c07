use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use planner::{RiskThresholds, load_sites, mock_assets, risk::ranked_sites};

#[derive(Parser)]
#[command(author, version, about = "List sites by descending risk", long_about = None)]
struct Args {
    /// Site data file (.csv or .json); mock assets when omitted
    #[arg(short, long)]
    sites: Option<PathBuf>,

    /// Risk at or above which a site is shown as high
    #[arg(long, default_value_t = planner::DEFAULT_HIGH_RISK)]
    high: u8,

    /// Risk at or above which a site is shown as medium
    #[arg(long, default_value_t = planner::DEFAULT_MEDIUM_RISK)]
    medium: u8,
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    let thresholds = RiskThresholds {
        high: args.high,
        medium: args.medium,
    };
    if !thresholds.is_valid() {
        anyhow::bail!(
            "thresholds must satisfy medium <= high <= {}",
            planner::MAX_RISK
        );
    }

    let sites = match &args.sites {
        Some(path) => load_sites(path)?,
        None => mock_assets(),
    };
    info!("{} sites", sites.len());

    for site in ranked_sites(&sites) {
        println!(
            "{:>3}  {:<6}  {:<10}  {}",
            site.risk,
            thresholds.band(site.risk),
            site.id,
            site.label
        );
    }

    Ok(())
}
