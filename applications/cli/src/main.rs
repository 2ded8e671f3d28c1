/// Tapedeck - terminal music player
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tapedeck_cli::{parse_input, write_track_list, AppConfig, Input, Session, HELP};
use tapedeck_playback::Command;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tapedeck")]
#[command(about = "Single-album music player with a simulated audio engine", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TAPEDECK_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive player (default)
    Play {
        /// Start playing this track (1-based)
        #[arg(short, long)]
        track: Option<usize>,
    },
    /// List configured tracks
    Tracks,
    /// Validate the configuration and exit
    Check,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the event stream
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tapedeck=info,tapedeck_cli=info,tapedeck_playback=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate()?;

    match cli.command.unwrap_or(Commands::Play { track: None }) {
        Commands::Play { track } => play(&config, track).await?,
        Commands::Tracks => {
            let catalog = config.catalog()?;
            write_track_list(&catalog, &mut std::io::stdout().lock())?;
        }
        Commands::Check => {
            let catalog = config.catalog()?;
            info!("Configuration OK: {} tracks", catalog.len());
        }
    }

    Ok(())
}

async fn play(config: &AppConfig, start_track: Option<usize>) -> anyhow::Result<()> {
    let mut session = Session::new(config)?;
    let mut stdout = std::io::stdout();

    if let Some(number) = start_track {
        anyhow::ensure!(number > 0, "track numbers start at 1");
        session.apply(Command::SelectTrack(number - 1), &mut stdout)?;
    }
    session.write_status(&mut stdout)?;

    eprintln!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(session.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };

                match parse_input(&line) {
                    Ok(Some(Input::Command(command))) => session.apply(command, &mut stdout)?,
                    Ok(Some(Input::Status)) => session.write_status(&mut stdout)?,
                    Ok(Some(Input::Tracks)) => {
                        let mut stderr = std::io::stderr().lock();
                        write_track_list(session.player().catalog(), &mut stderr)?;
                        stderr.flush()?;
                    }
                    Ok(Some(Input::Help)) => eprintln!("{HELP}"),
                    Ok(Some(Input::Quit)) => break,
                    Ok(None) => {}
                    Err(e) => warn!("{}", e),
                }
            }
            _ = ticker.tick() => {
                if let Err(e) = session.tick(&mut stdout) {
                    error!("Failed to advance engine: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}
