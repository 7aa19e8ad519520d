//! realtime-metrics - operator tool for the realtime metrics store
//!
//! Records events, inspects counters and manages the low priority queue.

use clap::{Parser, Subcommand};
use realtime_metrics::utils::{current_timestamp, logging::init_logging};
use realtime_metrics::{
    Config, ProjectId, RealtimeMetricsStore, RedisPool, RedisRealtimeMetricsStore, Result,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "realtime-metrics", version, about = "Realtime load classification counters")]
struct Cli {
    /// Configuration file; environment variables override it, or replace it when it does not exist
    #[arg(
        short,
        long,
        env = "REALTIME_METRICS_CONFIG",
        default_value = "config/realtime_metrics.yaml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ping the backing store
    Health,
    /// Count one event for a project
    RecordEvent {
        project: ProjectId,
        /// Seconds since the UNIX epoch, defaults to now
        #[arg(long)]
        timestamp: Option<u64>,
    },
    /// Count one processing duration (seconds) for a project
    RecordDuration {
        project: ProjectId,
        duration: u64,
        #[arg(long)]
        timestamp: Option<u64>,
    },
    /// Print event counts in the retention window as JSON
    Counts {
        project: ProjectId,
        #[arg(long)]
        timestamp: Option<u64>,
    },
    /// Print duration histograms in the retention window as JSON
    Durations {
        project: ProjectId,
        #[arg(long)]
        timestamp: Option<u64>,
    },
    /// List projects with live event counters
    Projects,
    /// Manage the low priority queue
    Lpq {
        #[command(subcommand)]
        action: LpqCommand,
    },
    /// Print the effective configuration
    Config {
        /// Print JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
    /// Print build information
    Info,
}

#[derive(Debug, Subcommand)]
enum LpqCommand {
    /// List projects in the low priority queue
    List,
    /// Move a project to the low priority queue
    Add { project: ProjectId },
    /// Move projects back to the regular queue
    Remove {
        #[arg(required = true)]
        projects: Vec<ProjectId>,
    },
    /// Print the queue a project is routed to
    Check { project: ProjectId },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let from_file = tokio::fs::try_exists(&cli.config).await.unwrap_or(false);
    let config = if from_file {
        Config::from_file_with_env(&cli.config).await?
    } else {
        Config::from_env()?
    };
    init_logging(&config.logging)?;
    if !from_file {
        warn!("Configuration file {:?} not found, using environment", cli.config);
    }

    match cli.command {
        Command::Config { json } => {
            let rendered = if json {
                config.to_json()?
            } else {
                config.to_yaml()?
            };
            println!("{}", rendered);
            return Ok(());
        }
        Command::Info => {
            let build = realtime_metrics::build_info();
            println!(
                "{} {} ({}, built {}, {})",
                realtime_metrics::NAME,
                build.version,
                build.git_hash,
                build.build_time,
                build.rust_version
            );
            return Ok(());
        }
        _ => {}
    }

    let pool = Arc::new(RedisPool::new(&config.redis).await?);
    let store = RedisRealtimeMetricsStore::new(pool, &config.realtime_metrics)?;

    execute(&store, cli.command).await
}

async fn execute(store: &dyn RealtimeMetricsStore, command: Command) -> Result<()> {
    match command {
        Command::Health => {
            store.health_check().await?;
            println!("ok");
        }
        Command::RecordEvent { project, timestamp } => {
            let timestamp = timestamp.unwrap_or_else(current_timestamp);
            store.record_event(project, timestamp).await?;
            info!(project, timestamp, "Recorded event");
        }
        Command::RecordDuration {
            project,
            duration,
            timestamp,
        } => {
            let timestamp = timestamp.unwrap_or_else(current_timestamp);
            store.record_duration(project, timestamp, duration).await?;
            info!(project, timestamp, duration, "Recorded duration");
        }
        Command::Counts { project, timestamp } => {
            let timestamp = timestamp.unwrap_or_else(current_timestamp);
            let counts = store.event_counts(project, timestamp).await?;
            println!("{}", serde_json::to_string_pretty(&counts)?);
        }
        Command::Durations { project, timestamp } => {
            let timestamp = timestamp.unwrap_or_else(current_timestamp);
            let histograms = store.duration_histograms(project, timestamp).await?;
            println!("{}", serde_json::to_string_pretty(&histograms)?);
        }
        Command::Projects => {
            for project in store.projects().await? {
                println!("{}", project);
            }
        }
        Command::Lpq { action } => execute_lpq(store, action).await?,
        Command::Config { .. } | Command::Info => {}
    }
    Ok(())
}

async fn execute_lpq(store: &dyn RealtimeMetricsStore, action: LpqCommand) -> Result<()> {
    match action {
        LpqCommand::List => {
            let mut members: Vec<ProjectId> = store.list_members().await?.into_iter().collect();
            members.sort_unstable();
            for project in members {
                println!("{}", project);
            }
        }
        LpqCommand::Add { project } => store.add_member(project).await?,
        LpqCommand::Remove { projects } => {
            let requested: HashSet<ProjectId> = projects.into_iter().collect();
            let mut removed: Vec<ProjectId> =
                store.remove_members(&requested).await?.into_iter().collect();
            removed.sort_unstable();
            for project in removed {
                println!("{}", project);
            }
        }
        LpqCommand::Check { project } => {
            let queue = store.queue_for(project).await?;
            println!("{}", serde_json::to_string(&queue)?);
        }
    }
    Ok(())
}
