use log::{debug, error, info};
use std::process::Stdio;
use tokio::process::Command;

use crate::command::AssembledCommand;
use crate::error::DumpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionResult {
    Success,
    /// Non-zero exit. `code` is `None` when the process was killed by a signal.
    Failure { code: Option<i32> },
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success)
    }

    pub fn into_result(self) -> Result<(), DumpError> {
        match self {
            ExecutionResult::Success => Ok(()),
            ExecutionResult::Failure { code } => Err(DumpError::ToolFailed { code }),
        }
    }
}

/// Quoting produced by the builder is POSIX single-quote syntax, so only a
/// POSIX shell may interpret the command line.
#[cfg(unix)]
fn shell_command(line: &str) -> Result<Command, DumpError> {
    let mut command = Command::new("/bin/sh");
    command.arg("-c").arg(line);
    Ok(command)
}

#[cfg(not(unix))]
fn shell_command(_line: &str) -> Result<Command, DumpError> {
    Err(DumpError::Spawn(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "commands can only be run through a POSIX shell",
    )))
}

/// Runs the command through `/bin/sh` and waits for it to exit.
///
/// Standard streams are inherited; only redirections inside the command line
/// take effect. If the returned future is dropped before completion the child
/// is killed. Fails with [`DumpError::Spawn`] on platforms without a POSIX
/// shell.
pub async fn execute(cmd: &AssembledCommand) -> Result<ExecutionResult, DumpError> {
    debug!("Spawning shell for: {}", cmd.redacted());

    let mut child = shell_command(cmd.as_str())?
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            error!("Failed to spawn shell: {e}");
            DumpError::Spawn(e)
        })?;

    let status = child.wait().await?;

    if status.success() {
        info!("Command finished successfully");
        Ok(ExecutionResult::Success)
    } else {
        match status.code() {
            Some(code) => error!("Command exited with status {code}"),
            None => error!("Command was terminated by a signal"),
        }
        Ok(ExecutionResult::Failure { code: status.code() })
    }
}
