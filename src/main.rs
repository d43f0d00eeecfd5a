mod cli;
mod core;
mod report;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run::entry() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            eprintln!("{}", cli::args::USAGE);
            ExitCode::FAILURE
        }
    }
}
