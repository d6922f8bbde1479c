use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crossfill::{
    error::{Error, Result},
    puzzle::{Puzzle, Slot, Vocabulary},
    render,
    solver::{stats::render_stats_table, Solver},
};

/// Fill a crossword structure with words from a vocabulary file.
#[derive(Debug, Parser)]
#[command(name = "crossfill", version, about)]
struct Args {
    /// Path to the structure template (`_` marks an open cell).
    structure: PathBuf,

    /// Path to the word list, one word per line.
    words: PathBuf,

    /// Optional path to write the rendered solution to.
    output: Option<PathBuf>,

    /// Emit the assignment as JSON instead of a rendered grid.
    #[arg(long)]
    json: bool,

    /// Print search statistics to stderr after solving.
    #[arg(long)]
    stats: bool,

    /// Shuffle value-ordering ties reproducibly with this seed.
    #[arg(long)]
    seed: Option<u64>,
}

/// One filled slot, as it appears in `--json` output.
#[derive(Debug, Serialize)]
struct SolvedSlot<'a> {
    #[serde(flatten)]
    slot: &'a Slot,
    word: &'a str,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            println!("No solution.");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<bool> {
    let puzzle = Puzzle::from_file(&args.structure)?;
    let vocabulary = Vocabulary::from_file(&args.words)?;

    let solver = match args.seed {
        Some(seed) => Solver::seeded(seed),
        None => Solver::default(),
    };
    let (assignment, stats) = solver.solve(&puzzle, &vocabulary);

    if args.stats {
        eprintln!("{}", render_stats_table(&stats));
    }

    let Some(assignment) = assignment else {
        return Ok(false);
    };

    if args.json {
        let solved: Vec<SolvedSlot> = assignment
            .iter()
            .map(|(id, word)| SolvedSlot {
                slot: puzzle.slot(id),
                word: word.as_ref(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&solved)?);
    } else {
        print!("{}", render::render_text(&puzzle, &assignment));
    }

    if let Some(path) = &args.output {
        fs::write(path, render::render_text(&puzzle, &assignment)).map_err(|source| {
            Error::Write {
                path: path.clone(),
                source,
            }
        })?;
    }

    Ok(true)
}
