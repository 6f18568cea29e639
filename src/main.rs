//! Binary entry point: resolve configuration, start logging, open the book
//! table and hand control to the terminal UI until the user quits.
use clap::Parser;
use tracing::info;

use library_tracker::logging::init_tracing;
use library_tracker::{open_store, run_app, App, Cli, Config, Library};

/// Fatal start-up problems (unreadable data file, missing home directory) end
/// the process with the error chain printed to the terminal.
fn main() -> anyhow::Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    init_tracing(&config.log_file)?;
    info!(data_file = %config.data_file.display(), "starting library tracker");

    let library = Library::open(open_store(&config.data_file))?;
    let mut app = App::new(library, Box::new(config.credentials))?;
    run_app(&mut app)
}
