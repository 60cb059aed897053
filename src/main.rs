use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use daledou::client::Fetcher;
use daledou::config::{Config, FileAccountSource};
use daledou::mission::MissionRegistry;
use daledou::models::JobKind;
use daledou::notify::{ConsoleNotifier, Notifier, WebhookNotifier};
use daledou::runner::JobRunner;
use daledou::scheduler::Scheduler;

#[derive(Parser)]
#[command(
    name = "daledou",
    version,
    about = "Scheduled daily-mission automation for the DaLeDou web game",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "daledou.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single job kind once and exit
    Run {
        /// Job kind: one, two or check
        kind: String,
    },

    /// Startup cookie check, then the timed tick loop (default)
    Timing,

    /// Run an explicit mission list once per account and print the reports
    Dev {
        /// Mission ids, in execution order
        missions: Vec<String>,
    },

    /// List registered mission ids
    Missions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    match cli.command.unwrap_or(Commands::Timing) {
        Commands::Run { kind } => {
            let kind: JobKind = kind.parse().map_err(anyhow::Error::msg)?;
            tracing::info!(kind = %kind, "one-shot run");
            run_once(&cli.config, kind).await?;
        }

        Commands::Timing => {
            timing(&cli.config).await?;
        }

        Commands::Dev { missions } => {
            dev(&cli.config, missions).await?;
        }

        Commands::Missions => {
            list_missions();
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("daledou=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("daledou=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    let config = Config::from_file(path)?;
    config.validate()?;
    Ok(config)
}

fn build_runner(config: &Config) -> Result<JobRunner> {
    let fetcher = Fetcher::new(&config.fetch)?;
    let registry = MissionRegistry::builtin();

    let notifier: Arc<dyn Notifier> = match WebhookNotifier::new(&config.push) {
        Ok(webhook) => Arc::new(webhook),
        Err(e) => {
            tracing::warn!(error = %e, "webhook unavailable, reports print to stdout");
            Arc::new(ConsoleNotifier)
        }
    };

    Ok(JobRunner::new(fetcher, registry, notifier))
}

async fn run_once(path: &Path, kind: JobKind) -> Result<()> {
    let config = load_config(path)?;
    let runner = build_runner(&config)?;
    let source = FileAccountSource::new(path);

    runner.run(kind, &source).await?;
    Ok(())
}

async fn timing(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    let runner = build_runner(&config)?;
    let source = FileAccountSource::new(path);

    let mut scheduler = Scheduler::from_config(&config.schedule)?;
    tracing::info!(
        first_round = %config.schedule.first_round,
        second_round = %config.schedule.second_round,
        check_interval_hours = config.schedule.check_interval_hours,
        "scheduled runs armed"
    );

    scheduler.run(&runner, &source).await;
    Ok(())
}

async fn dev(path: &Path, missions: Vec<String>) -> Result<()> {
    if missions.is_empty() {
        anyhow::bail!("dev mode needs at least one mission id");
    }

    let config = load_config(path)?;
    let runner = build_runner(&config)?;
    let source = FileAccountSource::new(path);

    for (qq, report) in runner.run_adhoc(&missions, &source).await? {
        println!("------------ {qq} ------------");
        println!("{report}");
    }
    Ok(())
}

fn list_missions() {
    let registry = MissionRegistry::builtin();
    for id in registry.ids() {
        println!("{id}");
    }
}
