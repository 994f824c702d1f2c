mod app;
mod config;
mod store;
mod utils;

use std::env;
use color_eyre::Result;
use dotenv::dotenv;

#[actix_web::main]
async fn main() -> Result<()> {
  dotenv().ok();
  // Default to info logs so the request logger
  // middleware actually shows something.
  if env::var("RUST_LOG").is_err() {
    env::set_var("RUST_LOG", "info");
  }
  env_logger::init();

  app::run().await
}
