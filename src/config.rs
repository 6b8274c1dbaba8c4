use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::command::{ConnectionParams, DEFAULT_MAX_COMMAND_LEN, DEFAULT_PORT, DEFAULT_TOOL};
use crate::error::DumpError;
use crate::job::DumpJob;
use crate::options::OptionSet;

fn default_host() -> String {
    "localhost".into()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_password() -> String {
    String::new()
}

fn default_tool() -> String {
    DEFAULT_TOOL.into()
}

fn default_max_command_len() -> usize {
    DEFAULT_MAX_COMMAND_LEN
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,

    pub database: String,

    #[serde(default)]
    pub output_file: Option<String>,

    #[serde(default = "default_tool")]
    pub tool: String,

    #[serde(default = "default_max_command_len")]
    pub max_command_len: usize,

    #[serde(default)]
    pub options: OptionSet,
}

impl Config {
    pub fn connection(&self) -> ConnectionParams {
        ConnectionParams::new(&self.host, &self.username, &self.password, &self.database)
            .with_port(self.port)
    }

    pub fn into_job(self) -> DumpJob {
        let mut job = DumpJob::new(self.connection())
            .tool(self.tool)
            .max_command_len(self.max_command_len)
            .options(&self.options);
        if let Some(output) = self.output_file {
            job = job.output_file(output);
        }
        job
    }
}

/// Command-line interface. Values given here override the config file.
#[derive(Debug, Parser)]
#[command(
    name = "mysqldump-exec",
    version,
    about = "Run mysqldump with a safely quoted command line"
)]
pub struct Args {
    /// Config file (default: ~/.config/mysqldump-exec/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Database host
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Database port
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// User for login
    #[arg(short, long)]
    pub user: Option<String>,

    /// Password for login
    #[arg(short, long)]
    pub password: Option<String>,

    /// Database to dump
    #[arg(short, long)]
    pub database: Option<String>,

    /// Output file (default: backup_<timestamp>.sql)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Dump program to invoke
    #[arg(long)]
    pub tool: Option<String>,

    /// Enable a presence flag, e.g. --flag single-transaction
    #[arg(short, long = "flag", value_name = "NAME")]
    pub flags: Vec<String>,

    /// Set a value option, e.g. --set where="id > 5"
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Skip a table; unqualified names use --database
    #[arg(long = "ignore-table", value_name = "TABLE")]
    pub ignore_tables: Vec<String>,

    /// Print the command with the password masked instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/root".into());
    PathBuf::from(home)
        .join(".config")
        .join("mysqldump-exec")
        .join("config.toml")
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

pub fn load(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        format!(
            "Failed to read config file: {}\n\
             Create it with your MySQL connection settings, or pass\n\
             --host, --user and --database on the command line.\n\
             Example:\n\n\
             host = \"localhost\"\n\
             port = 3306\n\
             username = \"backup\"\n\
             password = \"\"\n\
             database = \"mydb\"\n\n\
             [options]\n\
             single-transaction = true\n\n\
             Error: {e}",
            path.display()
        )
    })?;
    let config = parse(&content).map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    Ok(config)
}

/// Splits a `KEY=VALUE` argument at the first `=`.
pub fn parse_assignment(arg: &str) -> Result<(&str, &str), DumpError> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(DumpError::InvalidInput(format!("expected KEY=VALUE, got '{arg}'"))),
    }
}

impl Args {
    fn covers_connection(&self) -> bool {
        self.host.is_some() && self.user.is_some() && self.database.is_some()
    }

    /// Loads the config file (when needed) and applies command-line overrides.
    pub fn resolve(&self) -> Result<DumpJob, Box<dyn std::error::Error>> {
        let path = self.config.clone().unwrap_or_else(config_path);

        let mut config = if self.config.is_none() && !path.exists() && self.covers_connection() {
            Config {
                host: default_host(),
                port: default_port(),
                username: String::new(),
                password: default_password(),
                database: String::new(),
                output_file: None,
                tool: default_tool(),
                max_command_len: default_max_command_len(),
                options: OptionSet::new(),
            }
        } else {
            load(&path)?
        };

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(user) = &self.user {
            config.username = user.clone();
        }
        if let Some(password) = &self.password {
            config.password = password.clone();
        }
        if let Some(database) = &self.database {
            config.database = database.clone();
        }
        if let Some(output) = &self.output {
            config.output_file = Some(output.clone());
        }
        if let Some(tool) = &self.tool {
            config.tool = tool.clone();
        }
        for flag in &self.flags {
            config.options.set(flag.as_str(), true);
        }
        for assignment in &self.set {
            let (key, value) = parse_assignment(assignment)?;
            config.options.set(key, value);
        }

        let mut job = config.into_job();
        for table in &self.ignore_tables {
            job = job.ignore_table(table);
        }
        Ok(job)
    }
}
