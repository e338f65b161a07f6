/// Jukebox - local folder player with request queue, rotation and crossfades
use anyhow::Context;
use clap::{Parser, Subcommand};
use jukebox::{render, Command, JukeboxConfig};
use jukebox_audio_desktop::DesktopJukebox;
use jukebox_core::Catalog;
use jukebox_library::scan_directory;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "jukebox")]
#[command(about = "Play a folder of music with requests, rotation and crossfades", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "JUKEBOX_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory and print its catalog
    Scan {
        /// Directory path to scan
        path: PathBuf,
    },
    /// Scan a directory and start the interactive player
    Play {
        /// Directory path to play
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = JukeboxConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate()?;

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Commands::Scan { path } => {
            let catalog = load_catalog(&path, &config)?;
            for track in catalog.tracks() {
                println!("{}", render::track_row(track));
            }
            println!("{} tracks", catalog.len());
        }
        Commands::Play { path } => {
            let catalog = load_catalog(&path, &config)?;
            play(catalog, &config)?;
        }
    }

    Ok(())
}

fn load_catalog(path: &Path, config: &JukeboxConfig) -> anyhow::Result<Catalog> {
    scan_directory(path, &config.library)
        .with_context(|| format!("Failed to scan {}", path.display()))
}

fn play(catalog: Catalog, config: &JukeboxConfig) -> anyhow::Result<()> {
    if catalog.is_empty() {
        println!("No audio files found; nothing to play.");
    }

    let jukebox = DesktopJukebox::start(catalog.clone(), config.engine_config())
        .context("Failed to start audio output")?;

    let events = jukebox.events().clone();
    thread::spawn(move || {
        for event in events.iter() {
            if let Some(line) = render::event_line(&event) {
                println!("{}", line);
            }
        }
    });

    println!("{}", render::status_report(&jukebox.status()));
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match &command {
            Command::Quit => break,
            Command::Help => println!("{}", jukebox::commands::HELP),
            Command::Status => println!("{}", render::status_report(&jukebox.status())),
            Command::List => {
                for track in catalog.tracks() {
                    println!("{}", render::track_row(track));
                }
            }
            Command::Search(query) => {
                let matches = catalog.search(query);
                for track in &matches {
                    println!("{}", render::track_row(track));
                }
                println!("{} matches", matches.len());
            }
            _ => {
                for request in command.to_jukebox() {
                    jukebox.send(request)?;
                }
            }
        }
        io::stdout().flush()?;
    }

    jukebox.shutdown();
    Ok(())
}
