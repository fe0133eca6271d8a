//! Command-line interface definitions.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{error, info};

use crate::app::{scheduler, App};
use crate::config::Config;
use crate::domain::LeagueId;
use crate::error::Result;

/// Fixturecast - scheduled fixture synchronization and prediction grading.
#[derive(Parser, Debug)]
#[command(name = "fixturecast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the scheduler daemon (foreground)
    Run,

    /// Run one synchronization pass for a date (default: tomorrow)
    Sync {
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Restrict the run to a single league
        #[arg(long)]
        league: Option<String>,
    },

    /// Run one grading pass for a date (default: yesterday)
    Grade {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Report prediction accuracy for a date (default: yesterday)
    Accuracy {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Run one retention sweep
    Purge,

    /// Manage league eligibility
    #[command(subcommand)]
    Leagues(LeaguesCommand),
}

#[derive(Subcommand, Debug)]
pub enum LeaguesCommand {
    /// List every known league with its eligibility flags
    List,
    /// Mark leagues as detected
    Detect { ids: Vec<String> },
    /// Explicitly select or deselect a league
    Select {
        id: String,
        #[arg(long)]
        value: bool,
    },
    /// Clear the selection, restoring "no opinion"
    Unselect { id: String },
    /// Add or remove a league from the blacklist
    Blacklist {
        id: String,
        #[arg(long)]
        remove: bool,
    },
}

/// Execute the parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load(&cli.config)?;
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }
    config.init_logging();

    let app = Arc::new(App::build(&config)?);

    match cli.command {
        Command::Run => run_daemon(app).await,
        Command::Sync { date, league } => {
            let target = date.unwrap_or_else(|| Utc::now().date_naive() + chrono::Duration::days(1));
            let record = match league {
                Some(id) => app.run_sync_league(target, &LeagueId::new(id)).await?,
                None => app.run_sync(target).await?,
            };
            println!(
                "{} {}: {} considered, {} accepted",
                record.target_date, record.status, record.considered, record.accepted
            );
            for spend in &record.requests {
                println!("  {}: {} requests", spend.label, spend.requests);
            }
            Ok(())
        }
        Command::Grade { date } => {
            let date =
                date.unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(1));
            let report = app.run_grade(date).await?;
            println!(
                "{date}: {} graded, {} correct, {} pending",
                report.graded, report.correct, report.pending
            );
            Ok(())
        }
        Command::Accuracy { date } => {
            let date =
                date.unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(1));
            match app.queries().accuracy_for(date).await? {
                Some(accuracy) => println!("{date}: {:.1}%", accuracy * 100.0),
                None => println!("{date}: no graded fixtures"),
            }
            Ok(())
        }
        Command::Purge => {
            let report = app.run_retention(Utc::now().date_naive()).await?;
            println!(
                "purged {} fixtures, {} sync records",
                report.fixtures_purged, report.sync_records_purged
            );
            Ok(())
        }
        Command::Leagues(command) => leagues(app, command).await,
    }
}

async fn run_daemon(app: Arc<App>) -> Result<()> {
    info!("fixturecast starting");
    let mut scheduler = scheduler::start(Arc::clone(&app)).await?;

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    if let Err(e) = scheduler.shutdown().await {
        error!(error = %e, "scheduler shutdown failed");
    }
    info!("fixturecast stopped");
    Ok(())
}

async fn leagues(app: Arc<App>, command: LeaguesCommand) -> Result<()> {
    match command {
        LeaguesCommand::List => {
            for record in app.league_records().await? {
                println!(
                    "{}\t{}\tdetected={}\tselected={}\tblacklisted={}\teligible={}",
                    record.id,
                    record.name,
                    record.detected,
                    record
                        .selected
                        .map_or_else(|| "-".to_string(), |s| s.to_string()),
                    record.blacklisted,
                    record.eligible()
                );
            }
        }
        LeaguesCommand::Detect { ids } => {
            let ids: Vec<LeagueId> = ids.into_iter().map(LeagueId::new).collect();
            app.mark_leagues_detected(&ids).await?;
            println!("{} leagues marked detected", ids.len());
        }
        LeaguesCommand::Select { id, value } => {
            app.select_league(&LeagueId::new(id), Some(value)).await?;
        }
        LeaguesCommand::Unselect { id } => {
            app.select_league(&LeagueId::new(id), None).await?;
        }
        LeaguesCommand::Blacklist { id, remove } => {
            app.blacklist_league(&LeagueId::new(id), !remove).await?;
        }
    }
    Ok(())
}
