//! Command-line and environment configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::auth::{StaticCredentials, DEFAULT_PASSWORD, DEFAULT_USERNAME};
use crate::db::default_data_dir;

/// File name of the book table inside the data directory.
const DATA_FILE_NAME: &str = "library_data.csv";
/// File name of the log written next to the book table.
const LOG_FILE_NAME: &str = "library-tracker.log";

#[derive(Parser, Debug)]
#[command(
    name = "library-tracker",
    version,
    about = "Track library books issued to students from the terminal"
)]
pub struct Cli {
    #[arg(
        long,
        env = "LIBRARY_DATA_FILE",
        help = "Book table file; .sqlite/.sqlite3/.db selects SQLite, anything else CSV (default: ~/.library-tracker/library_data.csv)"
    )]
    pub data_file: Option<PathBuf>,

    #[arg(
        long,
        env = "LIBRARY_LOG_FILE",
        help = "Log file (default: ~/.library-tracker/library-tracker.log)"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        env = "LIBRARY_USERNAME",
        default_value = DEFAULT_USERNAME,
        help = "Librarian login name"
    )]
    pub username: String,

    #[arg(
        long,
        env = "LIBRARY_PASSWORD",
        default_value = DEFAULT_PASSWORD,
        hide_default_value = true,
        hide_env_values = true,
        help = "Librarian password"
    )]
    pub password: String,
}

/// Fully resolved settings used to wire up the application.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub credentials: StaticCredentials,
}

impl Config {
    /// Fill in defaults for anything the command line left out. The home
    /// directory is only looked up when a default path is actually needed.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let data_file = match cli.data_file {
            Some(path) => path,
            None => default_data_dir()?.join(DATA_FILE_NAME),
        };
        let log_file = match cli.log_file {
            Some(path) => path,
            None => default_data_dir()?.join(LOG_FILE_NAME),
        };

        Ok(Self {
            data_file,
            log_file,
            credentials: StaticCredentials::new(cli.username, cli.password),
        })
    }
}
