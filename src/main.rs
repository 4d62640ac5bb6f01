//! Sliding-Puzzle Demo CLI
//!
//! Plays the built-in demo levels from the command line: prints a level's
//! board, or replays a scripted move sequence and reports each outcome
//! plus the final win verdict. Set `RUST_LOG=debug` for dispatch
//! traces.

use clap::{Parser, Subcommand};

use gridlock::board::DispatchOutcome;
use gridlock::geometry::{Coord, Direction, Pointer};
use gridlock::history::History;
use gridlock::level::Level;
use gridlock::{catalog, render};

/// Plays the built-in sliding-puzzle demo levels.
#[derive(Parser)]
#[command(name = "gridlock")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in levels.
    Levels,
    /// Print a level's starting board.
    Show {
        /// Built-in level index.
        #[arg(long, default_value_t = 0)]
        level: usize,
    },
    /// Replay a move script against a level.
    ///
    /// Each move is `piece:x,y[:dir]`: the piece index, the shape-space
    /// action point, and an optional pointer direction (n/e/s/w) for
    /// slide nodes.
    Replay {
        /// Built-in level index.
        #[arg(long, default_value_t = 0)]
        level: usize,
        /// Move tokens, applied in order.
        moves: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Levels => run_levels(),
        Command::Show { level } => run_show(level),
        Command::Replay { level, moves } => run_replay(level, &moves),
    }
}

fn load_level(index: usize) -> Level {
    let Some(spec) = catalog::level_spec(index) else {
        eprintln!(
            "No built-in level {index}. Run 'gridlock levels' to list them."
        );
        std::process::exit(1);
    };
    match Level::build(&spec) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Level {index} failed to build: {e}");
            std::process::exit(1);
        }
    }
}

fn run_levels() {
    for (index, spec) in catalog::builtin_levels().iter().enumerate() {
        println!(
            "{index}: {} ({}x{}, {} pieces, par {})",
            spec.name,
            spec.arena.width,
            spec.arena.height,
            spec.pieces.len(),
            spec.par_moves
        );
    }
}

fn run_show(index: usize) {
    let level = load_level(index);
    println!("{} (par {})", level.name(), level.par_moves());
    print!("{}", render::format_board(&level));
}

fn run_replay(index: usize, moves: &[String]) {
    let mut level = load_level(index);
    let mut history = History::new();
    let mut committed = 0u32;

    for token in moves {
        let (piece, point, pointer) = match parse_move(token) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("Bad move `{token}`: {e}");
                std::process::exit(1);
            }
        };
        let outcome = level.dispatch(piece, point, pointer);
        match outcome {
            DispatchOutcome::Committed(record) => {
                history.push(record);
                committed += 1;
                println!("{token}: ok");
            }
            DispatchOutcome::Collision => println!("{token}: collision"),
            DispatchOutcome::Rejected => println!("{token}: direction not allowed"),
            DispatchOutcome::NoMatch => println!("{token}: no action there"),
        }
    }

    print!("{}", render::format_board(&level));
    println!(
        "{committed} moves committed (par {}), {}",
        level.par_moves(),
        if level.check_win() { "solved" } else { "not solved" }
    );
}

/// Parses `piece:x,y[:dir]` into a dispatch call.
fn parse_move(token: &str) -> Result<(usize, Coord, Pointer), String> {
    let mut parts = token.split(':');
    let piece = parts
        .next()
        .ok_or("missing piece index")?
        .parse::<usize>()
        .map_err(|e| format!("piece index: {e}"))?;

    let point_part = parts.next().ok_or("missing action point")?;
    let (x, y) = point_part
        .split_once(',')
        .ok_or("action point must be `x,y`")?;
    let point = Coord::new(
        x.parse().map_err(|e| format!("x: {e}"))?,
        y.parse().map_err(|e| format!("y: {e}"))?,
    );

    let pointer = match parts.next() {
        None => Pointer::center(),
        Some(dir) => match dir {
            "n" | "N" => Pointer::toward(Direction::North),
            "e" | "E" => Pointer::toward(Direction::East),
            "s" | "S" => Pointer::toward(Direction::South),
            "w" | "W" => Pointer::toward(Direction::West),
            other => return Err(format!("unknown direction `{other}`")),
        },
    };

    if parts.next().is_some() {
        return Err("too many `:` separators".into());
    }
    Ok((piece, point, pointer))
}
