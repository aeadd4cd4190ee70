//! Parallel batch solving benchmark
//!
//! Solves a set of puzzles several times, once sequentially and once on the
//! rayon pool, and reports timings for each.

use anyhow::{Context, Result};
use exact_cover_dlx::{
    config::Settings,
    sudoku::{board::examples, load_boards_from_file, solve_batch, Board, SudokuProblem},
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct BenchmarkResult {
    label: &'static str,
    run_times: Vec<Duration>,
    average_time: Duration,
    min_time: Duration,
    max_time: Duration,
    solved: usize,
}

impl BenchmarkResult {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            run_times: Vec::new(),
            average_time: Duration::ZERO,
            min_time: Duration::MAX,
            max_time: Duration::ZERO,
            solved: 0,
        }
    }

    fn add_run(&mut self, duration: Duration, solved: usize) {
        self.run_times.push(duration);
        self.solved = solved;
        self.min_time = self.min_time.min(duration);
        self.max_time = self.max_time.max(duration);

        let total: Duration = self.run_times.iter().sum();
        self.average_time = total / self.run_times.len() as u32;
    }

    fn format_time(duration: Duration) -> String {
        format!("{:.3}ms", duration.as_secs_f64() * 1000.0)
    }

    fn display(&self) -> String {
        format!(
            "  {}:\n    Runs: [{}]\n    Avg: {} | Min: {} | Max: {} | Solved: {}",
            self.label,
            self.run_times
                .iter()
                .map(|d| Self::format_time(*d))
                .collect::<Vec<_>>()
                .join(", "),
            Self::format_time(self.average_time),
            Self::format_time(self.min_time),
            Self::format_time(self.max_time),
            self.solved
        )
    }
}

fn load_puzzles() -> Result<Vec<Board>> {
    match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => load_boards_from_file(&path)
            .with_context(|| format!("Failed to load puzzles from {}", path.display())),
        None => {
            let lines = [examples::CLASSIC, examples::HARD, examples::SPARSE];
            let mut boards = Vec::new();
            // Repeat the built-in set so the pool has enough work
            for _ in 0..8 {
                for line in lines {
                    boards.push(Board::parse(line)?);
                }
            }
            Ok(boards)
        }
    }
}

fn run_sequential(settings: &Settings, boards: &[Board]) -> Result<usize> {
    let mut solved = 0;
    for board in boards {
        let problem = SudokuProblem::with_board(settings.clone(), board.clone());
        if problem.solve_first()?.is_some() {
            solved += 1;
        }
    }
    Ok(solved)
}

fn run_parallel(settings: &Settings, boards: &[Board]) -> Result<usize> {
    let mut solved = 0;
    for entry in solve_batch(settings, boards) {
        if entry.solution?.is_some() {
            solved += 1;
        }
    }
    Ok(solved)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let boards = load_puzzles()?;
    let settings = Settings::default();
    let runs = 3;

    println!("Benchmarking {} puzzle(s), {} runs each\n", boards.len(), runs);

    let mut sequential = BenchmarkResult::new("Sequential");
    let mut parallel = BenchmarkResult::new("Parallel (rayon)");

    for _ in 0..runs {
        let start = Instant::now();
        let solved = run_sequential(&settings, &boards)?;
        sequential.add_run(start.elapsed(), solved);

        let start = Instant::now();
        let solved = run_parallel(&settings, &boards)?;
        parallel.add_run(start.elapsed(), solved);
    }

    println!("{}", sequential.display());
    println!("{}", parallel.display());

    if parallel.average_time > Duration::ZERO {
        println!(
            "\nSpeedup: {:.2}x on {} thread(s)",
            sequential.average_time.as_secs_f64() / parallel.average_time.as_secs_f64(),
            rayon::current_num_threads()
        );
    }

    Ok(())
}
