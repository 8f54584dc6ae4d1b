#![deny(unused_variables)]
#![deny(dead_code)]
#![deny(unused_imports)]
#![deny(clippy::no_effect_underscore_binding)]

mod report;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use icurisk::config::AppConfig;
use icurisk::model::SurvivalModel;
use icurisk::{FeatureVector, ThresholdPolicy, assess, shared_model};
use log::info;
use std::path::PathBuf;
use std::process;

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyCli {
    /// Low < 30%, Medium < 60%, High >= 60%
    Strict,
    /// Low < 30%, Medium < 70%, High >= 70%
    Lenient,
}

impl From<PolicyCli> for ThresholdPolicy {
    fn from(value: PolicyCli) -> Self {
        match value {
            PolicyCli::Strict => ThresholdPolicy::Strict,
            PolicyCli::Lenient => ThresholdPolicy::Lenient,
        }
    }
}

#[derive(Args)]
pub struct PredictArgs {
    /// Path to the patient record (.toml)
    #[arg(long)]
    pub patient: PathBuf,

    /// Path to the trained model artifact (.toml); overrides the config file
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Optional config file selecting the model and risk thresholds
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Named risk threshold policy
    #[arg(long, value_enum)]
    pub policy: Option<PolicyCli>,

    /// Upper bound (percent, exclusive) of the Low tier
    #[arg(long)]
    pub low_cut: Option<f64>,

    /// Upper bound (percent, exclusive) of the Medium tier
    #[arg(long)]
    pub high_cut: Option<f64>,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Path to the trained model artifact (.toml)
    #[arg(long)]
    pub model: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict 1-year mortality risk for one patient
    Predict(PredictArgs),
    /// Describe the patient file fields and their codes
    Features,
    /// Validate a model artifact and show its feature order
    Inspect(InspectArgs),
    /// Show version and build information
    Version,
}

#[derive(Parser)]
#[command(
    name = "icurisk",
    about = "1-year mortality risk assessment for elderly ICU patients"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

pub fn predict(args: PredictArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };
    let thresholds = config
        .thresholds
        .overridden_by(args.policy.map(Into::into), args.low_cut, args.high_cut)
        .resolve()?;
    let model_path = args.model.unwrap_or(config.model.path);

    let model = shared_model(&model_path)?;
    let patient = FeatureVector::load(&args.patient)?;
    let assessment = assess(model, &patient, &thresholds)?;
    print!("{}", report::render_assessment(&assessment));
    Ok(())
}

pub fn inspect(args: InspectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let model = SurvivalModel::load(&args.model)?;
    print!("{}", report::render_inspection(&model));
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let Cli { command } = cli;

    let result = match command {
        Some(Commands::Predict(args)) => predict(args),
        Some(Commands::Features) => {
            print!("{}", report::render_schema());
            Ok(())
        }
        Some(Commands::Inspect(args)) => inspect(args),
        Some(Commands::Version) => {
            print_version_info();
            Ok(())
        }
        None => {
            Cli::command().print_help().expect("print help");
            println!();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Format seconds into a human-readable duration like "2.4 hours ago"
fn format_duration_ago(seconds: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    if seconds < MINUTE {
        format!("{} seconds ago", seconds)
    } else if seconds < HOUR {
        format!("{:.1} minutes ago", seconds as f64 / MINUTE as f64)
    } else if seconds < DAY {
        format!("{:.1} hours ago", seconds as f64 / HOUR as f64)
    } else {
        format!("{:.1} days ago", seconds as f64 / DAY as f64)
    }
}

fn print_version_info() {
    let version = env!("CARGO_PKG_VERSION");
    let build_timestamp: u64 = option_env!("ICURISK_BUILD_TIMESTAMP")
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);

    println!("icurisk {}", version);

    if build_timestamp > 0 {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        if now > build_timestamp {
            println!("Built: {}", format_duration_ago(now - build_timestamp));
        } else {
            println!("Built: just now");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_pick_the_largest_whole_unit() {
        assert_eq!(format_duration_ago(42), "42 seconds ago");
        assert_eq!(format_duration_ago(90), "1.5 minutes ago");
        assert_eq!(format_duration_ago(2 * 3600), "2.0 hours ago");
        assert_eq!(format_duration_ago(3 * 86400), "3.0 days ago");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
