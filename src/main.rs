//! Fifteen Puzzle Solver
//!
//! Scrambles (or reads) an H×W sliding-tile puzzle, solves it and prints the
//! blank moves, optionally replaying them one grid at a time.

use std::error::Error;
use std::io::{self, Write};

use clap::Parser;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

use fifteen::{Move, Puzzle};

/// Solves a sliding-tile puzzle and prints the blank moves.
#[derive(Parser)]
#[command(name = "fifteen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rows of the scrambled puzzle.
    #[arg(short = 'H', long, default_value_t = 4)]
    height: usize,

    /// Columns of the scrambled puzzle.
    #[arg(short = 'W', long, default_value_t = 4)]
    width: usize,

    /// Starting layout instead of a scramble, rows separated by '/'
    /// (e.g. "8 7 6 / 5 4 3 / 2 1 0").
    #[arg(short, long)]
    layout: Option<String>,

    /// Seed for a reproducible scramble.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the grid after every move.
    #[arg(short, long)]
    replay: bool,

    /// Log each solving phase.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "fifteen=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut puzzle = match &cli.layout {
        Some(layout) => layout.parse::<Puzzle>()?,
        None => {
            let mut puzzle = Puzzle::new(cli.height, cli.width)?;
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            puzzle.shuffle(&mut rng);
            puzzle
        }
    };

    if !puzzle.is_solvable() {
        return Err("layout cannot reach the solved arrangement".into());
    }

    let mut stdout = io::stdout();
    println!("Starting puzzle:");
    print_grid(&mut stdout, &puzzle)?;

    let mut original = puzzle.clone();
    let moves = puzzle.solve_puzzle()?;
    println!("\nSolved in {} moves:\n{}", moves.len(), moves);

    if cli.replay {
        for mv in moves.iter() {
            original.apply_move(mv);
            println!("\n{}", describe(mv));
            print_grid(&mut stdout, &original)?;
        }
    }

    Ok(())
}

fn describe(mv: Move) -> &'static str {
    match mv {
        Move::Left => "Left",
        Move::Right => "Right",
        Move::Up => "Up",
        Move::Down => "Down",
    }
}

/// Prints the grid, highlighting tiles already in their solved cell.
fn print_grid(out: &mut impl Write, puzzle: &Puzzle) -> io::Result<()> {
    let cell_width = (puzzle.height() * puzzle.width() - 1).to_string().len();

    for row in 0..puzzle.height() {
        for col in 0..puzzle.width() {
            let value = puzzle.get(row, col);
            let (color, text) = if value == 0 {
                (Color::DarkGrey, ".".to_string())
            } else if puzzle.is_home(row, col) {
                (Color::Green, value.to_string())
            } else {
                (Color::Reset, value.to_string())
            };
            queue!(
                out,
                SetForegroundColor(color),
                Print(format!("{:>width$} ", text, width = cell_width))
            )?;
        }
        queue!(out, ResetColor, Print("\n"))?;
    }

    out.flush()
}
