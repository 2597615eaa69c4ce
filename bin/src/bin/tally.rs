use clap::Parser;
use std::io;
use tally_bin::{cli::Cli, commands};
use tally_log::LogConfig;

fn main() {
    let cli = Cli::parse();

    let log_guard = tally_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    })
    .map_err(|e| eprintln!("Warning: Failed to initialize logging: {}", e))
    .ok();

    let result = commands::run(&cli, &mut io::stdout().lock());

    if let Err(e) = result {
        eprintln!("Command failed: {}", e);
        // Flush pending log lines before exiting.
        drop(log_guard);
        std::process::exit(1);
    }
}
