#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line tools for inspecting and editing tactics board saves.

mod board;
mod host;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tactics_core::Faction;
use tactics_input::{FrameState, InputSource, KeyBindings, TileAction};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::board::{describe_tiles, read_board, write_board, Board, BoardSummary};

#[derive(Debug, Parser)]
#[command(name = "tactics-tile", about = "Inspect and edit tactics board saves")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print aggregate counts for a board save.
    Inspect {
        /// Board save file.
        board: PathBuf,
    },
    /// Load a key bindings file and print the resolved table.
    ValidateBindings {
        /// Bindings TOML file.
        bindings: PathBuf,
    },
    /// Restore a board and print per-tile occupancy and passability.
    Replay {
        /// Board save file.
        board: PathBuf,
        /// Faction used for passability checks.
        #[arg(long, value_enum, default_value_t = FactionArg::Red)]
        faction: FactionArg,
        /// Write the re-saved board to this path.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Apply one edit-mode frame to a tile and write the result.
    Edit {
        /// Board save file.
        board: PathBuf,
        /// Index of the tile to edit.
        #[arg(long)]
        tile: usize,
        /// Inputs that went down this frame, such as `MouseLeft` or `Space`.
        #[arg(long = "press")]
        pressed: Vec<String>,
        /// Inputs held this frame, such as `U`.
        #[arg(long = "hold")]
        held: Vec<String>,
        /// Faction of units placed by the edit.
        #[arg(long, value_enum)]
        place: Option<FactionArg>,
        /// Key bindings file; defaults are used when omitted.
        #[arg(long)]
        bindings: Option<PathBuf>,
        /// Destination for the edited board; overwrites the input when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FactionArg {
    Red,
    Blue,
}

impl From<FactionArg> for Faction {
    fn from(value: FactionArg) -> Self {
        match value {
            FactionArg::Red => Faction::Red,
            FactionArg::Blue => Faction::Blue,
        }
    }
}

/// Entry point for the tactics board command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Inspect { board } => {
            let save = read_board(&board)?;
            println!("{}", BoardSummary::of(&save));
        }
        Commands::ValidateBindings { bindings } => {
            let table = KeyBindings::from_path(&bindings)?;
            for action in TileAction::ALL {
                println!("{} = {}", action.config_name(), table.source(action));
            }
        }
        Commands::Replay {
            board,
            faction,
            output,
        } => {
            let save = read_board(&board)?;
            let restored = Board::restore(&save, None);
            for line in describe_tiles(&restored, faction.into()) {
                println!("{line}");
            }
            if let Some(output) = output {
                write_board(&output, &restored.save())?;
            }
        }
        Commands::Edit {
            board,
            tile,
            pressed,
            held,
            place,
            bindings,
            output,
        } => {
            let table = match bindings {
                Some(path) => KeyBindings::from_path(&path)?,
                None => KeyBindings::default(),
            };
            let frame = build_frame(&pressed, &held)?;
            let input = table.translate(&frame);

            let save = read_board(&board)?;
            let mut restored = Board::restore(&save, place.map(Faction::from));
            let changes = restored.edit(tile, input)?;
            info!(tile, changes, ?input, "edit applied");

            let destination = output.unwrap_or(board);
            write_board(&destination, &restored.save())?;
        }
    }
    Ok(())
}

fn build_frame(pressed: &[String], held: &[String]) -> Result<FrameState> {
    let mut frame = FrameState::new();
    for name in pressed {
        let source =
            InputSource::parse(name).with_context(|| format!("invalid --press value `{name}`"))?;
        frame = frame.press(source);
    }
    for name in held {
        let source =
            InputSource::parse(name).with_context(|| format!("invalid --hold value `{name}`"))?;
        frame = frame.hold(source);
    }
    Ok(frame)
}
