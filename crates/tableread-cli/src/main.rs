//! Tableread writers-room client
//!
//! Joins the shared script session, mirrors live edits from the simulated
//! collaborator, and pushes your own lines into the room.
//!
//! # Usage
//!
//! ```bash
//! # Join with defaults (collaborator line every 15 seconds)
//! tableread
//!
//! # Speed the collaborator up for a demo
//! tableread --peer-interval 5
//!
//! # Seed the room from a draft on disk
//! tableread --seed draft.fountain
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use parking_lot::Mutex;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use tableread_content::{CannedContentService, ContentService, SuggestionKind};
use tableread_core::{RoomConfig, ScriptRoom, UpdateOrigin};

/// Tableread writers-room client
#[derive(Parser, Debug)]
#[command(name = "tableread")]
#[command(author, version, about = "Tableread - collaborative writers-room client")]
struct Args {
    /// Seconds between simulated collaborator edits
    #[arg(long, env = "TABLEREAD_PEER_INTERVAL", default_value = "15")]
    peer_interval: u64,

    /// Seed the script from a file instead of the built-in scene
    #[arg(long, env = "TABLEREAD_SEED")]
    seed: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TABLEREAD_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Quiet mode (no banner)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .init();

    let mut config = RoomConfig::default();
    config.peer_interval = Duration::from_secs(args.peer_interval.max(1));
    if let Some(path) = &args.seed {
        config.seed_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    // connect() spawns the collaborator task for the first subscriber, so it
    // needs the runtime context.
    let (room, mut subscription) = {
        let _guard = runtime.enter();
        let room = ScriptRoom::with_config(config);
        let subscription = room.connect();
        (room, subscription)
    };
    let subscriber_id = subscription.id();

    if !args.quiet {
        print_banner();
    }

    println!("{}\n", subscription.initial_content());

    // Local copy of the script, the way an editor pane holds it. Broadcasts
    // replace it wholesale, our own echoes included.
    let script = Arc::new(Mutex::new(subscription.initial_content().to_string()));

    let printer_script = script.clone();
    runtime.spawn(async move {
        while let Some(update) = subscription.recv().await {
            *printer_script.lock() = update.content.to_string();
            if update.origin == UpdateOrigin::SimulatedPeer {
                println!("\n{}", "--- collaborator edit ---".yellow());
                if let Some(block) = update.content.rsplit("\n\n").next() {
                    println!("{}\n", block.yellow());
                }
            }
        }
    });

    let content = CannedContentService;
    let mut rl = DefaultEditor::new()?;

    loop {
        let prompt = format!("{}> ", "tableread".green());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match line.split_once(' ') {
                    _ if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") => {
                        break;
                    }
                    _ if line.eq_ignore_ascii_case("help") => print_help(),
                    _ if line.eq_ignore_ascii_case("show") => {
                        println!("{}", script.lock());
                    }
                    _ if line.eq_ignore_ascii_case("status") => {
                        let stats = room.stats();
                        let live = if stats.simulator_active {
                            "active".green()
                        } else {
                            "idle".yellow()
                        };
                        println!("revision {} | collaborator {}", stats.revision, live);
                    }
                    _ if line.eq_ignore_ascii_case("suggest") => {
                        eprintln!(
                            "{} usage: suggest <dialogue|flow|consistency>",
                            "Error:".red()
                        );
                    }
                    Some(("suggest", kind)) =>
                        match parse_suggestion_kind(kind.trim()) {
                            Some(kind) => {
                                let draft = script.lock().clone();
                                match runtime.block_on(content.suggest(&draft, kind)) {
                                    Ok(text) => println!("{}", text.cyan()),
                                    Err(e) => eprintln!("{} {}", "Error:".red(), e),
                                }
                            }
                            None => {
                                eprintln!(
                                    "{} usage: suggest <dialogue|flow|consistency>",
                                    "Error:".red()
                                );
                            }
                        },
                    _ => {
                        // Anything else is a new line for the script.
                        let next = format!("{}\n\n{}", script.lock(), line);
                        *script.lock() = next.clone();
                        room.update_script(&next);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                break;
            }
        }
    }

    room.disconnect(subscriber_id);
    println!("{}", "Left the writers room.".cyan());

    Ok(())
}

fn parse_suggestion_kind(kind: &str) -> Option<SuggestionKind> {
    match kind.to_lowercase().as_str() {
        "dialogue" => Some(SuggestionKind::Dialogue),
        "flow" => Some(SuggestionKind::Flow),
        "consistency" => Some(SuggestionKind::Consistency),
        _ => None,
    }
}

fn print_banner() {
    println!(
        r#"
  ╔╦╗╔═╗╔╗ ╦  ╔═╗╦═╗╔═╗╔═╗╔╦╗
   ║ ╠═╣╠╩╗║  ║╣ ╠╦╝║╣ ╠═╣ ║║
   ╩ ╩ ╩╚═╝╩═╝╚═╝╩╚═╚═╝╩ ╩═╩╝
  Collaborative writers room - version {}
  Type 'help' for commands, 'quit' to leave
"#,
        env!("CARGO_PKG_VERSION")
    );
}

fn print_help() {
    println!(
        "\n{}\n\
         \x20 show                                  Print the current script\n\
         \x20 status                                Revision and collaborator state\n\
         \x20 suggest <dialogue|flow|consistency>   Ask the script assistant\n\
         \x20 help                                  This help\n\
         \x20 quit                                  Leave the room\n\n\
         Any other input is appended to the script and broadcast to the room.\n",
        "Commands:".cyan()
    );
}
