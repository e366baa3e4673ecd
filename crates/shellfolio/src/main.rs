//! Shellfolio - portfolio terminal with a hidden CTF.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::tty::IsTty;
use shellfolio::errors::{EXIT_COMMAND_FAILED, EXIT_CONFIG_ERROR};
use shellfolio::render::Renderer;
use shellfolio::{logging, repl, tui};
use shellfolio_core::{
    ChallengeEntry, Config, FileStorage, MemoryStorage, Storage, TerminalSession, VERSION,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "shellfolio")]
#[command(about = "Portfolio terminal with a hidden CTF", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Config file (default: $SHELLFOLIO_CONFIG or the XDG config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding saved progress
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep progress in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log filter, e.g. "debug" or "shellfolio_core=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal (default)
    Shell {
        /// Read whole lines instead of raw key presses
        #[arg(long)]
        line_mode: bool,
    },

    /// Run commands non-interactively, one per argument
    Run {
        #[arg(required = true)]
        lines: Vec<String>,
    },

    /// Print saved CTF progress as JSON
    Progress,

    /// Print the challenge list with solved marks as JSON
    Challenges,

    /// Erase saved CTF progress, asking first unless --yes is given
    Reset {
        /// Don't ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if cli.no_color {
        config.color = false;
    }
    Ok(config)
}

fn open_storage(cli: &Cli, config: &Config) -> Box<dyn Storage> {
    if cli.ephemeral {
        return Box::new(MemoryStorage::new());
    }
    let storage = FileStorage::new(config.data_dir());
    debug!(path = %storage.path().display(), "using file storage");
    Box::new(storage)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref())?;

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("shellfolio: {:#}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let storage = open_storage(&cli, &config);
    let renderer = Renderer::new(&config.prompt, config.color);
    let bell = config.bell;
    let mut session = TerminalSession::new(config, storage);
    info!(session = %session.id(), "session started");

    match cli.command.unwrap_or(Commands::Shell { line_mode: false }) {
        Commands::Shell { line_mode } => {
            if line_mode || !io::stdin().is_tty() {
                repl::run_line_mode(&mut session, &renderer)
            } else {
                if bell {
                    session.on_unlock(|| {
                        print!("\x07");
                        let _ = io::stdout().flush();
                    });
                }
                tui::run_interactive(&mut session, &renderer)
            }
        }
        Commands::Run { lines } => {
            let mut stdout = io::stdout();
            if repl::run_lines(&mut session, &renderer, &lines, &mut stdout)? {
                std::process::exit(EXIT_COMMAND_FAILED);
            }
            Ok(())
        }
        Commands::Progress => {
            let json = serde_json::to_string_pretty(session.progress())
                .context("failed to serialise progress")?;
            println!("{}", json);
            Ok(())
        }
        Commands::Challenges => {
            let entries = ChallengeEntry::listing(session.catalog(), session.progress());
            let json = serde_json::to_string_pretty(&entries)
                .context("failed to serialise challenge list")?;
            println!("{}", json);
            Ok(())
        }
        Commands::Reset { yes } => {
            let mut stdout = io::stdout();
            let confirmed = yes
                || repl::confirm(
                    "Erase all saved CTF progress?",
                    &mut io::stdin().lock(),
                    &mut stdout,
                )?;
            if !confirmed {
                println!("Nothing erased. Pass --yes to skip this question.");
                return Ok(());
            }
            let lines = ["reset --confirm".to_string()];
            repl::run_lines(&mut session, &renderer, &lines, &mut stdout)?;
            Ok(())
        }
    }
}
