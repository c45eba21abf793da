mod cli;
mod infra;
mod report;

use prospector::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
