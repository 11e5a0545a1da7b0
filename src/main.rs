//! marketplace-lint - plugin marketplace validator

use std::process::ExitCode;

fn main() -> ExitCode {
    match marketplace_lint::cli::run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
