use std::process::ExitCode;

use buildstamp::ui::output;

fn main() -> ExitCode {
    match buildstamp::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
