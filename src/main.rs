use std::env;
use std::process::ExitCode;

use tracing::info;

use chess_king::{
    constants::{DEFAULT_MAX_DEPTH, DEFAULT_MOVETIME_MS},
    driver,
    engine::SearchSettings,
    error::EngineError,
};

struct Options {
    history_path: String,
    move_path: String,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} -H <path to input history file> -m <path to output move file>");
}

fn parse_arguments(mut args: env::Args) -> Result<Options, EngineError> {
    let mut history_path = None;
    let mut move_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-H" => history_path = args.next(),
            "-m" => move_path = args.next(),
            other => return Err(EngineError::UnrecognizedArgument(other.to_string())),
        }
    }

    Ok(Options {
        history_path: history_path.ok_or(EngineError::MissingArgument("-H"))?,
        move_path: move_path.ok_or(EngineError::MissingArgument("-m"))?,
    })
}

fn run(options: &Options) -> Result<(), EngineError> {
    let mut state = driver::reconstruct_from_file(&options.history_path)?;

    let settings = SearchSettings {
        max_depth: DEFAULT_MAX_DEPTH,
        movetime_ms: DEFAULT_MOVETIME_MS,
    };

    match driver::choose_move(&mut state, &settings) {
        Some(mv) => {
            driver::write_move_file(&options.move_path, mv)?;
            info!(chosen = %mv.text(), path = %options.move_path, "wrote move");
        }
        None => {
            // Checkmate or stalemate: nothing to write, and that is not an
            // error. Callers treat empty output as terminal.
            eprintln!("No legal moves available (checkmate or stalemate)");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "chess-king".to_string());

    let options = match parse_arguments(args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("{error}");
            print_usage(&program);
            return ExitCode::FAILURE;
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
