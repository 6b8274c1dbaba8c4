//! mysqldump-exec
//!
//! Turns connection parameters and a set of named options into one
//! shell-escaped `mysqldump` command line, runs it and reports the outcome.
//!
//! # Example
//!
//! ```no_run
//! use mysqldump_exec::{ConnectionParams, DumpJob};
//!
//! # async fn run() -> Result<(), mysqldump_exec::DumpError> {
//! let params = ConnectionParams::new("127.0.0.1", "root", "pw", "shop");
//! let path = DumpJob::new(params)
//!     .single_transaction()
//!     .ignore_table("sessions")
//!     .output_file("shop.sql")
//!     .dump()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod exec;
pub mod job;
pub mod options;
pub mod quote;

pub use catalog::{resolve, FlagKind};
pub use command::{build, AssembledCommand, CommandBuilder, ConnectionParams};
pub use error::DumpError;
pub use exec::{execute, ExecutionResult};
pub use job::DumpJob;
pub use options::{OptionSet, OptionValue};
pub use quote::{quote, quote_bytes};

use log::info;

/// Builds the dump command and runs it.
///
/// An empty `output_path` means the tool writes to the inherited stdout.
/// Nothing is executed when the command cannot be built.
pub async fn mysqldump_exec(
    params: &ConnectionParams,
    options: &OptionSet,
    output_path: Option<&str>,
) -> Result<(), DumpError> {
    let cmd = build(params, options, output_path)?;
    info!("Running: {}", cmd.redacted());
    execute(&cmd).await?.into_result()
}
