mod cli;
mod infra;
mod report;
mod routes;
mod server;

use capability_maturity::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
