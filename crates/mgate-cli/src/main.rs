use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mgate_config::UnusedKeyPolicy;

mod commands;

use commands::{ConfigSource, Outcome};

/// Exit code telling CI to skip the deployment step.
const EXIT_REJECT: u8 = 1;
/// Exit code for unrecoverable input/config errors.
const EXIT_FATAL: u8 = 2;

#[derive(Parser)]
#[command(name = "mgate")]
#[command(about = "Model promotion gate CLI", long_about = None)]
struct Cli {
    /// Layered config paths in merge order (base -> overrides)
    #[arg(
        long = "config",
        global = true,
        env = "MGATE_CONFIG",
        value_delimiter = ',',
        default_value = "config.yaml"
    )]
    config_paths: Vec<PathBuf>,

    /// Fail when the config holds keys the command does not read
    #[arg(long, global = true)]
    strict_config: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a new model's R² score against the current model.
    ///
    /// Exit status: 0 deploy, 1 keep the current model, 2 invalid score,
    /// config or metadata (nothing is decided).
    Compare {
        /// R² score of the newly trained model
        #[arg(allow_negative_numbers = true)]
        score: String,

        /// Write promotion_report.json into this directory
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },

    /// Gate a candidate metadata file and, on deploy, make it the current model.
    Promote {
        /// Candidate metadata JSON (as written by `evaluate --out`)
        #[arg(long)]
        candidate: PathBuf,

        /// Write promotion_report.json into this directory
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },

    /// Score hold-out predictions (CSV with y_true,y_pred columns).
    Evaluate {
        #[arg(long)]
        predictions: PathBuf,

        /// Write candidate metadata (model.type + params from config) here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the current production model record.
    Current,

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    // Silent if the file does not exist; CI injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(Outcome::Deploy) | Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Reject) => ExitCode::from(EXIT_REJECT),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let config = ConfigSource {
        paths: cli.config_paths,
        unused_keys: if cli.strict_config {
            UnusedKeyPolicy::Fail
        } else {
            UnusedKeyPolicy::Warn
        },
    };
    match cli.cmd {
        Commands::Compare { score, report_dir } => {
            commands::gate::compare(&config, &score, report_dir.as_deref())
        }
        Commands::Promote {
            candidate,
            report_dir,
        } => commands::gate::promote(&config, &candidate, report_dir.as_deref()),
        Commands::Evaluate { predictions, out } => {
            commands::model::evaluate(&config, &predictions, out.as_deref())
        }
        Commands::Current => commands::model::current(&config),
        Commands::ConfigHash { paths } => {
            let loaded = mgate_config::load_layered_yaml(paths.as_slice())?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
            Ok(Outcome::Done)
        }
    }
}

fn init_tracing() {
    // stderr keeps stdout machine readable for CI.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
