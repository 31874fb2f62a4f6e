use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use env_logger::TimestampPrecision;
use log::{LevelFilter, info};

use cube_solver::cube333::moves::{Move333, random_scramble_with};
use cube_solver::cube333::pattern_db::{
    IMPOSSIBLE, MaxDepth, PatternDatabase, PatternDatabaseBuilder, UNREACHED,
};
use cube_solver::cube333::solver::{BfsSolver, IdaStarSolver, IddfsSolver};
use cube_solver::cube333::{CubieCube, StickerCube};
use cube_solver::error::Error;
use cube_solver::moves::MoveSequence;

const DEFAULT_SCRAMBLE_LEN: usize = 8;

/// Solve 3x3x3 cube scrambles with IDA* and a corner pattern database.
#[derive(Parser)]
#[command(name = "cube-solver")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Where the pattern database is stored. Built there on first use.
    #[arg(
        long,
        global = true,
        env = "CUBE_SOLVER_DB",
        default_value = "corner_depths.pdb",
        value_name = "PATH"
    )]
    db: PathBuf,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a random scramble and the state it leads to.
    Scramble {
        /// Number of random moves.
        #[arg(short, long, default_value_t = DEFAULT_SCRAMBLE_LEN)]
        moves: usize,
        /// Seed for a reproducible scramble.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Scramble a cube and solve it.
    Solve {
        /// The scramble to solve, e.g. "R U' F2". A random one is used when absent.
        #[arg(short, long, conflicts_with = "random")]
        scramble: Option<String>,
        /// Length of the random scramble.
        #[arg(short, long, default_value_t = DEFAULT_SCRAMBLE_LEN)]
        random: usize,
        /// Seed for a reproducible random scramble.
        #[arg(long)]
        seed: Option<u64>,
        /// Search algorithm.
        #[arg(long, value_enum, default_value_t = SolverKind::Ida)]
        solver: SolverKind,
        /// Depth the pattern database is built to if it has to be built.
        #[arg(long, default_value_t = MaxDepth::FULL.get())]
        max_depth: u8,
        /// Longest solution to search for. Defaults to 20 for IDA* and 7 otherwise.
        #[arg(short, long)]
        limit: Option<u8>,
    },
    /// Build the pattern database and write it to disk.
    BuildDb {
        /// Depth of the breadth first search.
        #[arg(long, default_value_t = MaxDepth::FULL.get())]
        max_depth: u8,
        /// Rebuild even if a usable database already exists.
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SolverKind {
    /// Iterative deepening A* guided by the pattern database.
    Ida,
    /// Iterative deepening depth first search.
    Iddfs,
    /// Breadth first search.
    Bfs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let result = match cli.command {
        Command::Scramble { moves, seed } => {
            run_scramble(moves, seed);
            Ok(())
        }
        Command::Solve {
            scramble,
            random,
            seed,
            solver,
            max_depth,
            limit,
        } => run_solve(&cli.db, scramble, random, seed, solver, max_depth, limit),
        Command::BuildDb { max_depth, force } => run_build_db(&cli.db, max_depth, force),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn rng(seed: Option<u64>) -> fastrand::Rng {
    seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
}

fn print_state(cube: &CubieCube) {
    println!("{}", StickerCube::from(cube.clone()));
}

fn run_scramble(moves: usize, seed: Option<u64>) {
    let (scramble, cube) = random_scramble_with(&mut rng(seed), moves);
    println!("Scramble: {scramble}");
    print_state(&cube);
}

fn run_solve(
    db_path: &Path,
    scramble: Option<String>,
    random: usize,
    seed: Option<u64>,
    kind: SolverKind,
    max_depth: u8,
    limit: Option<u8>,
) -> Result<(), Error> {
    let (scramble, cube) = match scramble {
        Some(text) => {
            let scramble: MoveSequence<Move333> = text.parse()?;
            let cube = CubieCube::SOLVED.make_moves(scramble.clone());
            (scramble, cube)
        }
        None => random_scramble_with(&mut rng(seed), random),
    };
    println!("Scramble: {scramble}");
    print_state(&cube);

    if cube.is_solved() {
        println!("The cube is already solved.");
        return Ok(());
    }

    let start = Instant::now();
    let solution = match kind {
        SolverKind::Ida => {
            let db = PatternDatabase::load_or_build(db_path, MaxDepth::new(max_depth)?)?;
            info!("pattern database ready in {:.3}s", start.elapsed().as_secs_f64());
            let solver = IdaStarSolver::new(&db)
                .with_max_threshold(limit.unwrap_or(IdaStarSolver::DEFAULT_MAX_THRESHOLD));
            solver.solve(&cube)?
        }
        SolverKind::Iddfs => IddfsSolver::new(limit.unwrap_or(7)).solve(&cube)?,
        SolverKind::Bfs => BfsSolver::new(limit.unwrap_or(7)).solve(&cube)?,
    };

    println!("Solution ({} moves): {solution}", solution.len());
    println!("Time taken: {:.3}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn run_build_db(db_path: &Path, max_depth: u8, force: bool) -> Result<(), Error> {
    let max_depth = MaxDepth::new(max_depth)?;
    let start = Instant::now();

    let db = if force {
        PatternDatabaseBuilder::new(max_depth).build_and_store(db_path)?
    } else {
        match PatternDatabase::load(db_path, max_depth)? {
            Some(db) => {
                println!("{} already holds a usable database.", db_path.display());
                db
            }
            None => PatternDatabaseBuilder::new(max_depth).build_and_store(db_path)?,
        }
    };

    println!(
        "Pattern database at {}: depth {}, {} keys, ready in {:.3}s",
        db_path.display(),
        db.max_depth().get(),
        db.len(),
        start.elapsed().as_secs_f64()
    );
    for (depth, count) in db.depth_histogram() {
        match depth {
            UNREACHED => println!("  unreached: {count}"),
            IMPOSSIBLE => println!("  impossible: {count}"),
            _ => println!("  {depth:>9}: {count}"),
        }
    }
    Ok(())
}
