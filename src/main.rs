//! Command line front end for the dancing links exact cover solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use exact_cover_dlx::{
    config::{CliOverrides, SearchMode, Settings},
    dlx::DlxSolver,
    relation::{create_example_relations, load_relation_from_file},
    sudoku::{
        board::create_example_puzzles, load_board_from_file, load_boards_from_file, solve_batch,
        DeadlineExceeded, SolutionValidator, SudokuProblem,
    },
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "exact_cover_dlx")]
#[command(about = "Exact cover solver using dancing links")]
#[command(version = "0.1.0")]
struct Cli {
    /// Log search statistics at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the solving commands
#[derive(clap::Args)]
struct SolveArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// How many solutions to enumerate (overrides config)
    #[arg(long, value_enum)]
    mode: Option<SearchMode>,

    /// Maximum solutions to find in limit mode (overrides config)
    #[arg(short, long)]
    max_solutions: Option<usize>,

    /// Search deadline in seconds, 0 for none (overrides config)
    #[arg(long)]
    timeout: Option<u64>,

    /// Output directory; enables saving results (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an exact cover problem given as a 0/1 matrix file
    Cover {
        #[command(flatten)]
        args: SolveArgs,

        /// Matrix file (overrides config)
        #[arg(short = 'f', long)]
        matrix: Option<PathBuf>,

        /// Print every chosen row as its 0/1 vector
        #[arg(long)]
        show_rows: bool,
    },

    /// Solve a Sudoku puzzle by reduction to exact cover
    Sudoku {
        #[command(flatten)]
        args: SolveArgs,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Show the puzzle next to each solution
        #[arg(long)]
        show_puzzle: bool,
    },

    /// Solve every puzzle of a file in parallel, one per line
    Batch {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// File with one 81-character puzzle per line
        #[arg(short, long)]
        puzzles: PathBuf,
    },

    /// Check a filled board against its puzzle
    Validate {
        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Filled board file
        #[arg(short, long)]
        solution: PathBuf,
    },

    /// Create example configuration and input files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Cover { args, matrix, show_rows } => cover_command(args, matrix, show_rows),
        Commands::Sudoku { args, puzzle, show_puzzle } => {
            sudoku_command(args, puzzle, show_puzzle)
        }
        Commands::Batch { config, puzzles } => batch_command(config, puzzles),
        Commands::Validate { puzzle, solution } => validate_command(puzzle, solution),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        log::warn!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn settings_with_overrides(
    args: &SolveArgs,
    matrix_file: Option<PathBuf>,
    puzzle_file: Option<PathBuf>,
) -> Result<Settings> {
    let mut settings = load_settings(&args.config)?;
    settings.merge_with_cli(&CliOverrides {
        mode: args.mode,
        max_solutions: args.max_solutions,
        timeout_seconds: args.timeout,
        matrix_file,
        puzzle_file,
        output_dir: args.output.clone(),
    });
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn cover_command(args: SolveArgs, matrix_file: Option<PathBuf>, show_rows: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Starting exact cover search"));

    let settings = settings_with_overrides(&args, matrix_file, None)?;
    settings.validate_matrix_input()?;

    let relation = load_relation_from_file(&settings.input.matrix_file)?;
    let uncoverable = relation.uncoverable_items();
    if !uncoverable.is_empty() {
        println!(
            "{}",
            ColorOutput::warning(&format!("Items covered by no row: {:?}", uncoverable))
        );
    }

    let mut solver = DlxSolver::new(&relation)?;
    let result = solver.solve_with(settings.solver.search_options());

    if result.timed_out() {
        println!("{}", ColorOutput::warning("Search deadline reached, results are partial"));
    }
    if result.is_empty() {
        println!("{}", ColorOutput::warning("No exact cover found"));
        return Ok(());
    }

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Found {} cover(s) in {:.3}s",
            result.solution_count(),
            result.stats().elapsed.as_secs_f64()
        ))
    );
    println!("\n{}", SolutionFormatter::format_cover_summary(&result));

    if show_rows {
        println!("{}", SolutionFormatter::format_cover_result(solver.matrix(), &result));
    }
    log::debug!("{}", result.stats());

    if settings.output.save_results {
        SolutionFormatter::save_cover_results(
            solver.matrix(),
            &result,
            &settings.output.output_directory,
            settings.output.format,
        )
        .context("Failed to save covers")?;
        println!(
            "{}",
            ColorOutput::success(&format!(
                "Covers saved to {}",
                settings.output.output_directory.display()
            ))
        );
    }

    Ok(())
}

fn sudoku_command(args: SolveArgs, puzzle_file: Option<PathBuf>, show_puzzle: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Starting Sudoku solver"));

    let settings = settings_with_overrides(&args, None, puzzle_file)?;
    settings.validate_puzzle_input()?;

    let start_time = Instant::now();
    let problem = SudokuProblem::new(settings).context("Failed to load puzzle")?;
    log::debug!("{}", problem.encoding_statistics()?);

    let solutions = match problem.solve() {
        Ok(solutions) => solutions,
        Err(e) if e.is::<DeadlineExceeded>() => {
            println!("{}", ColorOutput::warning(&format!("{}, puzzle left unsolved", e)));
            return Ok(());
        }
        Err(e) => return Err(e.context("Failed to solve puzzle")),
    };
    let total_time = start_time.elapsed();
    let output = &problem.settings().output;

    if solutions.is_empty() {
        println!("{}", ColorOutput::warning("No solutions found"));
        return Ok(());
    }

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Found {} solution(s) in {:.3}s",
            solutions.len(),
            total_time.as_secs_f64()
        ))
    );

    if solutions.len() > 3 {
        println!("\n{}", SolutionFormatter::format_sudoku_summary(&solutions));
    } else {
        for solution in &solutions {
            println!("\n{}", SolutionFormatter::format_sudoku_solution(solution, show_puzzle));
        }
    }

    if output.save_results {
        SolutionFormatter::save_sudoku_solutions(&solutions, &output.output_directory, output.format)
            .context("Failed to save solutions")?;
        println!(
            "{}",
            ColorOutput::success(&format!(
                "Solutions saved to {}",
                output.output_directory.display()
            ))
        );
    }

    Ok(())
}

fn batch_command(config_path: PathBuf, puzzles_path: PathBuf) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let boards = load_boards_from_file(&puzzles_path)?;
    println!(
        "{}",
        ColorOutput::info(&format!("Solving {} puzzle(s) in parallel", boards.len()))
    );

    let start_time = Instant::now();
    let entries = solve_batch(&settings, &boards);
    let total_time = start_time.elapsed();

    let mut solved = 0;
    for entry in &entries {
        match &entry.solution {
            Ok(Some(solution)) => {
                solved += 1;
                println!("{:4}: {}", entry.index + 1, solution.board.to_line());
            }
            Ok(None) => println!(
                "{:4}: {}",
                entry.index + 1,
                ColorOutput::warning("no solution")
            ),
            Err(e) if e.is::<DeadlineExceeded>() => println!(
                "{:4}: {}",
                entry.index + 1,
                ColorOutput::warning("deadline reached before a solution")
            ),
            Err(e) => println!("{:4}: {}", entry.index + 1, ColorOutput::error(&e.to_string())),
        }
    }

    println!(
        "\n{}",
        ColorOutput::success(&format!(
            "Solved {}/{} in {:.3}s",
            solved,
            entries.len(),
            total_time.as_secs_f64()
        ))
    );

    Ok(())
}

fn validate_command(puzzle_path: PathBuf, solution_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("Validating solution..."));

    let puzzle = load_board_from_file(&puzzle_path)
        .with_context(|| format!("Failed to load puzzle from {}", puzzle_path.display()))?;
    let candidate = load_board_from_file(&solution_path)
        .with_context(|| format!("Failed to load solution from {}", solution_path.display()))?;

    let result = SolutionValidator::new().validate(&puzzle, &candidate);
    println!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("Solution is valid!"));
    } else {
        println!("{}", ColorOutput::error("Solution is invalid"));
        if let Some(error) = result.error_message {
            println!("Error: {}", error);
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let matrix_dir = directory.join("input/matrices");
    let puzzle_dir = directory.join("input/puzzles");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &matrix_dir, &puzzle_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_relations(&matrix_dir).context("Failed to create example matrices")?;
    println!("Created example matrices in: {}", matrix_dir.display());

    create_example_puzzles(&puzzle_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", puzzle_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut all_covers = Settings::default();
    all_covers.solver.mode = SearchMode::Exhaustive;
    all_covers.output.save_results = true;
    all_covers.to_file(&examples_dir.join("all_covers.yaml"))?;

    let mut first_only = Settings::default();
    first_only.solver.mode = SearchMode::First;
    first_only.solver.timeout_seconds = 10;
    first_only.to_file(&examples_dir.join("first_only.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- cover --config config/default.yaml --show-rows");
    println!("3. Run: cargo run -- sudoku --config config/default.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "exact_cover_dlx",
            "cover",
            "--config",
            "test.yaml",
            "--mode",
            "exhaustive",
            "--show-rows",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["exact_cover_dlx", "--verbose", "sudoku", "-m", "2"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("input/matrices/knuth.txt").exists());
        assert!(temp_dir.path().join("input/puzzles/classic.txt").exists());
    }

    #[test]
    fn test_cover_command_on_setup_files() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let args = SolveArgs {
            config: temp_dir.path().join("missing.yaml"),
            mode: Some(SearchMode::Exhaustive),
            max_solutions: None,
            timeout: None,
            output: Some(temp_dir.path().join("out")),
        };
        let result = cover_command(args, Some(temp_dir.path().join("input/matrices/knuth.txt")), true);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("out/covers.txt").exists());
    }
}
