//! CLI entry point for the peg solitaire solver.
//!
//! Usage:
//!   peg-solver solve [board.json] [options]
//!   peg-solver solve --stdin [options]
//!
//! With no file and no --stdin the standard 33-hole English cross is
//! solved. A board file is JSON of the form
//!   { "board": [[-1, 0, 1, ...], ...], "goal": [[...], ...] }
//! where -1 is out of bounds, 0 empty and 1 a peg; "goal" is optional
//! and defaults to a single peg at the board's center.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use peg_solver::{classify, render, solution_path, Algorithm, Board, Classification, GameState};

#[derive(Parser)]
#[command(name = "peg-solver")]
#[command(about = "Time-bounded tree search solver for peg solitaire")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a solution from a board configuration
    Solve {
        /// Path to a board JSON file (defaults to the English cross)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the board JSON from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Search algorithm: bfs, dfs, ids, random-dfs or heuristic-dfs
        #[arg(long, short, default_value = "dfs")]
        algorithm: Algorithm,

        /// Time limit in minutes
        #[arg(long, default_value = "1")]
        time_limit: f64,

        /// Seed for random-dfs (drawn from entropy when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Emit the result as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Skip printing the board states along the solution path
        #[arg(long)]
        no_boards: bool,

        /// Mark the jumping cells (*) and the removed peg (x)
        #[arg(long)]
        marks: bool,
    },
}

/// Board configuration as read from a file or stdin
#[derive(Debug, Deserialize)]
struct BoardConfig {
    board: Board,
    #[serde(default)]
    goal: Option<Board>,
}

/// Output format for a solved run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    message: String,
    optimal: bool,
    depth: usize,
    remaining_pegs: usize,
    expanded_nodes: usize,
    max_frontier_size: usize,
    time_elapsed_ms: u64,
    moves: Vec<MoveOutput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveOutput {
    from: usize,
    to: usize,
    removed_peg: usize,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            algorithm,
            time_limit,
            seed,
            json,
            no_boards,
            marks,
        } => {
            let budget = match Duration::try_from_secs_f64(time_limit * 60.0) {
                Ok(budget) => budget,
                Err(_) => {
                    eprintln!("Error: time limit must be a non-negative number of minutes");
                    std::process::exit(2);
                }
            };

            let config = load_config(file, stdin);
            let goal = config
                .goal
                .unwrap_or_else(|| config.board.center_goal());
            let root = GameState::root(config.board);

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let result = match peg_solver::run(algorithm, root, &goal, budget, &mut rng) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(2);
                }
            };

            let classification = classify(&result.final_node, &goal);
            if json {
                let output = format_result(&result, classification);
                println!("{}", serde_json::to_string_pretty(&output).unwrap());
            } else {
                print!("{}", render(&result, &goal, !no_boards, marks));
            }

            // Exit zero only for an exact solution
            if classification == Classification::Optimal {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
    }
}

fn load_config(file: Option<PathBuf>, stdin: bool) -> BoardConfig {
    let json_content = if stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .expect("Failed to read from stdin");
        Some(buffer)
    } else {
        file.map(|path| {
            fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
        })
    };

    match json_content {
        Some(content) => match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error parsing board JSON: {e}");
                std::process::exit(2);
            }
        },
        None => BoardConfig {
            board: Board::english_cross(),
            goal: Some(Board::english_cross_goal()),
        },
    }
}

fn format_result(
    result: &peg_solver::SearchResult,
    classification: Classification,
) -> SolveOutput {
    let moves = solution_path(&result.final_node)
        .iter()
        .skip(1)
        .filter_map(|node| {
            let mv = node.last_move()?;
            Some(MoveOutput {
                from: mv.from,
                to: mv.to,
                removed_peg: node.removed_peg_label().unwrap_or_default(),
            })
        })
        .collect();

    SolveOutput {
        message: classification.to_string(),
        optimal: classification == Classification::Optimal,
        depth: result.final_node.depth(),
        remaining_pegs: result.final_node.board().peg_count(),
        expanded_nodes: result.expanded_nodes,
        max_frontier_size: result.max_frontier_size,
        time_elapsed_ms: result.time_elapsed_ms,
        moves,
    }
}
