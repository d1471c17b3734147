mod client;
mod commands;
mod render;
mod utils;

use std::io::IsTerminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use huddle_core::HuddleError;
use huddle_core::config::HuddleConfig;

use crate::client::Client;
use crate::commands::edit::EditArgs;
use crate::commands::new::NewArgs;

#[derive(Parser)]
#[command(name = "huddle")]
#[command(about = "Schedule events across profiles and timezones")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List profiles, or add one
    Profiles {
        /// Only show profiles whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
    /// Choose the profile to act as
    Use {
        /// Profile id or name
        profile: Option<String>,

        /// Narrow the picker by name
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show events of the current profile
    Events {
        /// Viewing timezone label (e.g. "Tokyo")
        #[arg(long = "tz")]
        timezone: Option<String>,

        /// Show every event, not only the current profile's
        #[arg(short, long)]
        all: bool,
    },
    /// Create an event
    New {
        /// Participant id or name (repeatable)
        #[arg(short, long)]
        with: Vec<String>,

        /// Timezone label the times are given in
        #[arg(long = "tz")]
        timezone: Option<String>,

        /// Start date/time (e.g., "2025-03-20T15:00")
        #[arg(short, long)]
        start: Option<String>,

        /// End date/time (e.g., "2025-03-20T16:00")
        #[arg(short, long)]
        end: Option<String>,

        /// Day for --start/--end given as HH:MM (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Change an event's participants, timezone or times
    Edit {
        /// Event id
        event: String,

        /// Participant to add (repeatable)
        #[arg(short, long)]
        add: Vec<String>,

        /// Participant to remove (repeatable)
        #[arg(short, long)]
        remove: Vec<String>,

        #[arg(long = "tz")]
        timezone: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        /// Day for --start/--end given as HH:MM (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show the change history of an event
    Logs {
        /// Event id
        event: String,
    },
    /// List supported timezone labels
    Timezones,
    /// Show the config file path and effective settings
    Config,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Create a profile
    Add {
        name: String,

        /// Timezone label for the profile
        #[arg(short, long)]
        timezone: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        let kind = e.downcast_ref::<HuddleError>().map_or("other", HuddleError::kind);
        tracing::error!(kind, error = %e, "command failed");
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands) -> Result<()> {
    let mut config = HuddleConfig::load()?;
    let interactive = std::io::stdin().is_terminal();

    // Commands that never touch the network
    match command {
        Commands::Timezones => {
            commands::timezones::run();
            return Ok(());
        }
        Commands::Config => return commands::config::run(&config),
        _ => {}
    }

    let client = Client::from_config(&config)?;

    match command {
        Commands::Profiles { search, action } => match action {
            Some(ProfileAction::Add { name, timezone }) => {
                commands::profiles::add(&client, &name, timezone.as_deref()).await?;
            }
            None => commands::profiles::list(&client, &config, search.as_deref()).await?,
        },
        Commands::Use { profile, search } => {
            let chosen =
                commands::select::run(&client, profile.as_deref(), search.as_deref(), interactive)
                    .await?;
            config.current_profile = Some(chosen.id);
            config.save()?;
        }
        Commands::Events { timezone, all } => {
            commands::events::run(&client, &config, timezone.as_deref(), all).await?
        }
        Commands::New {
            with,
            timezone,
            start,
            end,
            date,
        } => {
            let args = NewArgs {
                with,
                timezone,
                start,
                end,
                date,
            };
            commands::new::run(&client, &config, args, interactive).await?;
        }
        Commands::Edit {
            event,
            add,
            remove,
            timezone,
            start,
            end,
            date,
        } => {
            let args = EditArgs {
                event,
                add,
                remove,
                timezone,
                start,
                end,
                date,
            };
            commands::edit::run(&client, &config, args, interactive).await?;
        }
        Commands::Logs { event } => commands::logs::run(&client, &event).await?,
        Commands::Timezones | Commands::Config => {}
    }

    Ok(())
}
