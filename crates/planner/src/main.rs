use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

use planner::{
    Config, DEFAULT_CONFIG_PATH, Overrides, PlanReport, PlannerError, Policy, load_sites,
    mock_assets, plan,
};

#[derive(Parser)]
#[command(author, version, about = "Divide high-risk maintenance sites among crews", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Site data file (.csv or .json); overrides the config
    #[arg(short, long)]
    sites: Option<PathBuf>,

    /// Number of crews
    #[arg(short = 'n', long = "crews")]
    crews: Option<i64>,

    /// Assignment policy: round-robin | proximity-chain
    #[arg(short, long)]
    policy: Option<Policy>,

    /// Only plan the N highest-risk sites
    #[arg(short, long)]
    top_n: Option<usize>,

    /// Only plan sites with risk at or above this value
    #[arg(long)]
    threshold: Option<f64>,

    /// Report format: text | json | csv | html
    #[arg(short, long)]
    format: Option<String>,

    /// Report output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the plan without saving a report
    #[arg(long)]
    no_save: bool,
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    let mut config = if args.config.exists() {
        Config::load_from_file(&args.config).map_err(exit_on_invalid)?
    } else {
        warn!(
            "Config file not found: {}, using default settings",
            args.config.display()
        );
        Config::default()
    };

    let overrides = Overrides {
        sites: args.sites,
        crew_count: args.crews,
        policy: args.policy,
        top_n: args.top_n,
        risk_threshold: args.threshold,
        report_format: args.format,
        output_dir: args.output_dir,
    };
    config.apply_overrides(overrides).map_err(exit_on_invalid)?;

    let sites = match &config.planner.sites {
        Some(path) => {
            let sites = load_sites(path)
                .with_context(|| format!("failed to load sites from {}", path.display()))?;
            info!("Loaded {} sites from {}", sites.len(), path.display());
            sites
        }
        None => {
            info!("No site file configured, using mock assets");
            mock_assets()
        }
    };

    info!("Policy: {}", config.planner.policy);
    info!("Crews: {}", config.planner.crew_count);

    let mut request = config.to_request(sites);
    let result = match plan(&request) {
        Ok(result) => result,
        Err(PlannerError::MissingPosition { site_id }) => {
            warn!(
                "Site '{}' has no position; falling back to {}",
                site_id,
                Policy::RoundRobin
            );
            request.policy = Policy::RoundRobin;
            plan(&request)?
        }
        Err(e) => return Err(exit_on_invalid(e)),
    };

    let report = PlanReport::new(&request, result, config.display);
    print!("{}", report.render_text());

    if !args.no_save {
        let dir = PathBuf::from(&config.planner.output_dir);
        report.save_report(&dir, &config.planner.report_format)?;
    }

    Ok(())
}

/// Invalid planning arguments exit with status 2, whether they came from the
/// config file or from flags
fn exit_on_invalid(e: PlannerError) -> anyhow::Error {
    if let PlannerError::InvalidArgument(_) = e {
        error!("{e}");
        std::process::exit(2);
    }
    e.into()
}
