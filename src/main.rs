//! playlist-along - Convert, inject and create M3U playlists

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod error;
mod generate;
mod playlist;
mod storage;

use cli::commands::CreateArgs;
use cli::{Cli, Commands};
use config::Config;
use playlist::{Placement, Playlist};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "playlist_along=debug"
    } else {
        "playlist_along=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = Config::load(cli.config.as_deref())?;

    // Completions do not need a playlist
    if let Some(Commands::Completion { shell }) = cli.command {
        cli::commands::completion(shell);
        return Ok(());
    }
    let command = cli.command;

    let Some(file) = cli.file else {
        if command.is_none() {
            Cli::command().print_help()?;
        } else {
            println!("No file for script. Try 'playlist-along --help' for help.");
        }
        return Ok(());
    };
    let playlist = Playlist::new(&file);

    match command.unwrap_or(Commands::Display) {
        Commands::Display => {
            cli::commands::display(&playlist)?;
        }
        Commands::Convert { dest, copy } => {
            cli::commands::convert(&playlist, &dest, copy, &config)?;
        }
        Commands::Inject {
            injected,
            top: _,
            bottom,
        } => {
            let placement = if bottom { Placement::Bottom } else { Placement::Top };
            cli::commands::inject(&playlist, &Playlist::new(injected), placement, &config)?;
        }
        Commands::Create {
            from,
            nat_sort,
            platform_sort,
            rel: _,
            abs,
            extended,
            here,
            empty,
        } => {
            let args = CreateArgs {
                from,
                nat_sort,
                platform_sort,
                absolute: abs,
                extended,
                here,
                empty,
            };
            cli::commands::create(&file, &args, &config)?;
        }
        Commands::Completion { shell } => {
            cli::commands::completion(shell);
        }
    }

    Ok(())
}
