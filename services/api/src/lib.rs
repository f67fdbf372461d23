mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use admission_screening::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
