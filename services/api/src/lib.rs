mod assets;
mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use wws_listings::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
