use std::process::ExitCode;

fn main() -> ExitCode {
    match posmark::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
