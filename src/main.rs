//! mysqldump-exec
//!
//! Runs `mysqldump` for a database described by a config file and/or
//! command-line arguments. Option values and the output path are
//! single-quoted before they reach the shell.

use clap::Parser;
use log::{error, info};
use mysqldump_exec::config::Args;

#[tokio::main]
async fn main() {
    // Initialize logger
    env_logger::init();

    let args = Args::parse();

    let job = match args.resolve() {
        Ok(job) => job,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if args.dry_run {
        match job.command() {
            Ok(cmd) => println!("{}", cmd.redacted()),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        return;
    }

    match job.dump().await {
        Ok(path) => info!("Dump written to {}", path.display()),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
