use std::process::ExitCode;

fn main() -> ExitCode {
    match jobboardd::run_server() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("jobboardd: {error}");
            ExitCode::FAILURE
        }
    }
}
