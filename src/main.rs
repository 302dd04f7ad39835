//! Debug entry point for the scheduler API.
//!
//! IMPORTANT: this binary is only meant for debugging the application
//! locally. Production deployments build the application with
//! `scheduler_api::create_app` and run it with `scheduler_api::serve` under
//! their own process manager.

use clap::Parser;

use scheduler_api::http::bind;
use scheduler_api::lifecycle::signals::shutdown_signal;
use scheduler_api::observability::init_logging;
use scheduler_api::{create_app, serve, Settings};

#[derive(Parser)]
#[command(name = "scheduler-api", version)]
#[command(about = "Run the scheduler API for local debugging (not for production use)", long_about = None)]
struct Cli {
    /// The port to listen on
    #[arg(short, long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings = Settings::load()?;
    init_logging(&settings)?;

    let app = create_app(Some(settings))?;
    let listener = bind(cli.port).await?;
    serve(app, listener, shutdown_signal()).await?;

    Ok(())
}
