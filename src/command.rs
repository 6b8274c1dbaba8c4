//! Assembly of the `mysqldump` command line.
//!
//! Host, user, password and database are placed into the base invocation
//! verbatim, without shell escaping. Existing callers rely on the exact command
//! text, so these values must be validated before they reach the builder.
//! Option values and the output path are always single-quoted.

use log::{debug, warn};
use std::fmt;
use std::ops::Range;

use crate::catalog::{self, FlagKind};
use crate::error::DumpError;
use crate::options::{OptionSet, OptionValue};
use crate::quote::quote;

pub const DEFAULT_TOOL: &str = "mysqldump";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_MAX_COMMAND_LEN: usize = 8192;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub user: String,
    pub password: String,
    pub port: u16,
    pub database: String,
}

impl ConnectionParams {
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            port: DEFAULT_PORT,
            database: database.into(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// A complete shell command line, ready to hand to `sh -c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledCommand {
    line: String,
    password: Range<usize>,
}

impl AssembledCommand {
    pub fn as_str(&self) -> &str {
        &self.line
    }

    pub fn len(&self) -> usize {
        self.line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// The command with the password masked, for logging.
    pub fn redacted(&self) -> String {
        format!(
            "{}***{}",
            &self.line[..self.password.start],
            &self.line[self.password.end..]
        )
    }

    pub fn into_string(self) -> String {
        self.line
    }
}

impl fmt::Display for AssembledCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// String buffer that refuses to grow past a fixed limit.
struct BoundedBuffer {
    buf: String,
    limit: usize,
}

impl BoundedBuffer {
    fn new(limit: usize) -> Self {
        Self {
            buf: String::with_capacity(limit.min(DEFAULT_MAX_COMMAND_LEN)),
            limit,
        }
    }

    fn push_str(&mut self, s: &str) -> Result<(), DumpError> {
        let len = self.buf.len() + s.len();
        if len > self.limit {
            return Err(DumpError::CommandTooLong { len, limit: self.limit });
        }
        self.buf.push_str(s);
        Ok(())
    }

    fn len(&self) -> usize {
        self.buf.len()
    }
}

/// Formats a value for a `--name=<value>` flag. Booleans never fill value
/// flags; non-finite floats have no decimal form.
fn format_scalar(value: &OptionValue) -> Option<String> {
    match value {
        OptionValue::String(s) => Some(quote(s)),
        OptionValue::Integer(i) => Some(i.to_string()),
        OptionValue::Float(f) if f.is_finite() => Some(format!("{f:.6}")),
        _ => None,
    }
}

/// Renders the flag fragments for one option, each with a leading space.
fn fragments(key: &str, value: &OptionValue) -> Vec<String> {
    let kind = match catalog::resolve(key) {
        Some(kind) => kind,
        None => {
            debug!("Dropping unrecognized option '{key}'");
            return Vec::new();
        }
    };

    match (kind, value) {
        (_, OptionValue::Bool(false)) => Vec::new(),
        (FlagKind::NoValue(name), OptionValue::Bool(true)) => vec![format!(" --{name}")],
        (FlagKind::Value(name), OptionValue::List(items)) => items
            .iter()
            .map(|item| format!(" --{name}={}", quote(item)))
            .collect(),
        (FlagKind::Value(name), value) => match format_scalar(value) {
            Some(formatted) => vec![format!(" --{name}={formatted}")],
            None => {
                warn!("Option '{key}' needs a string or number for --{name}, skipping");
                Vec::new()
            }
        },
        (FlagKind::NoValue(name), _) => {
            warn!("Option '{key}' is a presence flag (--{name}) but was given a value, skipping");
            Vec::new()
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandBuilder {
    params: ConnectionParams,
    tool: String,
    max_len: usize,
}

impl CommandBuilder {
    pub fn new(params: ConnectionParams) -> Self {
        Self {
            params,
            tool: DEFAULT_TOOL.to_string(),
            max_len: DEFAULT_MAX_COMMAND_LEN,
        }
    }

    /// Program placed at the start of the command line. Not escaped.
    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn build(
        &self,
        options: &OptionSet,
        output_path: Option<&str>,
    ) -> Result<AssembledCommand, DumpError> {
        let p = &self.params;
        let mut buf = BoundedBuffer::new(self.max_len);

        buf.push_str(&format!("{} -h{} -u{} -p", self.tool, p.host, p.user))?;
        let password_start = buf.len();
        buf.push_str(&p.password)?;
        let password = password_start..buf.len();
        buf.push_str(&format!(" -P{} {}", p.port, p.database))?;

        for (key, value) in options.iter() {
            for fragment in fragments(key, value) {
                buf.push_str(&fragment)?;
            }
        }

        if let Some(path) = output_path.filter(|path| !path.is_empty()) {
            buf.push_str(" > ")?;
            buf.push_str(&quote(path))?;
        }

        Ok(AssembledCommand {
            line: buf.buf,
            password,
        })
    }
}

/// Builds a command with the default tool name and length limit.
pub fn build(
    params: &ConnectionParams,
    options: &OptionSet,
    output_path: Option<&str>,
) -> Result<AssembledCommand, DumpError> {
    CommandBuilder::new(params.clone()).build(options, output_path)
}
