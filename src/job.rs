use chrono::Local;
use log::{error, info};
use std::path::PathBuf;

use crate::command::{
    AssembledCommand, CommandBuilder, ConnectionParams, DEFAULT_MAX_COMMAND_LEN, DEFAULT_TOOL,
};
use crate::error::DumpError;
use crate::exec::execute;
use crate::options::{OptionSet, OptionValue};

/// Name used when no output file is given, e.g. `backup_2026-10-19_17-59-03.sql`.
pub fn default_output_file() -> String {
    format!("backup_{}.sql", Local::now().format("%Y-%m-%d_%H-%M-%S"))
}

fn qualify_table(database: &str, table: &str) -> String {
    if table.contains('.') {
        table.to_string()
    } else {
        format!("{database}.{table}")
    }
}

/// A configured dump of one database.
#[derive(Debug, Clone)]
pub struct DumpJob {
    params: ConnectionParams,
    output_file: String,
    options: OptionSet,
    tool: String,
    max_command_len: usize,
}

impl DumpJob {
    pub fn new(params: ConnectionParams) -> Self {
        Self {
            params,
            output_file: default_output_file(),
            options: OptionSet::new(),
            tool: DEFAULT_TOOL.to_string(),
            max_command_len: DEFAULT_MAX_COMMAND_LEN,
        }
    }

    pub fn output_file(mut self, path: impl Into<String>) -> Self {
        self.output_file = path.into();
        self
    }

    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    pub fn max_command_len(mut self, len: usize) -> Self {
        self.max_command_len = len;
        self
    }

    pub fn set_flag(mut self, name: &str, enabled: bool) -> Self {
        self.options.set(name, enabled);
        self
    }

    pub fn set_option(mut self, name: &str, value: impl Into<OptionValue>) -> Self {
        self.options.set(name, value);
        self
    }

    /// Merges options, later values replacing earlier ones.
    pub fn options(mut self, options: &OptionSet) -> Self {
        for (key, value) in options.iter() {
            self.options.set(key, value.clone());
        }
        self
    }

    pub fn all_databases(self) -> Self {
        self.set_flag("all-databases", true)
    }

    pub fn add_drop_table(self) -> Self {
        self.set_flag("add-drop-table", true)
    }

    pub fn add_locks(self) -> Self {
        self.set_flag("add-locks", true)
    }

    /// Structure only.
    pub fn no_data(self) -> Self {
        self.set_flag("no-data", true)
    }

    pub fn with_tables(self) -> Self {
        self.set_flag("tables", true)
    }

    pub fn with_routines(self) -> Self {
        self.set_flag("routines", true)
    }

    pub fn with_triggers(self) -> Self {
        self.set_flag("triggers", true)
    }

    pub fn with_events(self) -> Self {
        self.set_flag("events", true)
    }

    pub fn single_transaction(self) -> Self {
        self.set_flag("single-transaction", true)
    }

    pub fn lock_tables(self) -> Self {
        self.set_flag("lock-tables", true)
    }

    pub fn compress(self) -> Self {
        self.set_flag("compress", true)
    }

    pub fn optimized(self) -> Self {
        self.set_flag("opt", true)
    }

    pub fn hex_blob(self) -> Self {
        self.set_flag("hex-blob", true)
    }

    pub fn flush_logs(self) -> Self {
        self.set_flag("flush-logs", true)
    }

    pub fn extended_insert(self) -> Self {
        self.set_flag("extended-insert", true)
    }

    pub fn complete_insert(self) -> Self {
        self.set_flag("complete-insert", true)
    }

    pub fn xml(self) -> Self {
        self.set_flag("xml", true)
    }

    pub fn charset(self, charset: &str) -> Self {
        self.set_option("default-character-set", charset)
    }

    pub fn where_clause(self, condition: &str) -> Self {
        self.set_option("where", condition)
    }

    pub fn compatible(self, mode: &str) -> Self {
        self.set_option("compatible", mode)
    }

    /// Skips a table. Unqualified names are qualified with the job's database
    /// when the command is built.
    pub fn ignore_table(mut self, table: &str) -> Self {
        let table = table.to_string();
        match self.options.get_mut("ignore-table") {
            Some(OptionValue::List(tables)) => tables.push(table),
            Some(OptionValue::String(first)) => {
                let first = std::mem::take(first);
                self.options.set("ignore-table", vec![first, table]);
            }
            _ => {
                self.options.set("ignore-table", vec![table]);
            }
        }
        self
    }

    pub fn output_path(&self) -> &str {
        &self.output_file
    }

    /// Assembles the command without running it.
    pub fn command(&self) -> Result<AssembledCommand, DumpError> {
        CommandBuilder::new(self.params.clone())
            .tool(self.tool.clone())
            .max_len(self.max_command_len)
            .build(&self.qualified_options(), Some(&self.output_file))
    }

    /// Options with every `ignore-table` entry qualified by the database.
    fn qualified_options(&self) -> OptionSet {
        let mut options = self.options.clone();
        let database = &self.params.database;
        match options.get_mut("ignore-table") {
            Some(OptionValue::List(tables)) => {
                for table in tables.iter_mut() {
                    *table = qualify_table(database, table);
                }
            }
            Some(OptionValue::String(table)) => *table = qualify_table(database, table),
            _ => {}
        }
        options
    }

    /// Runs the dump and returns the path written to.
    pub async fn dump(&self) -> Result<PathBuf, DumpError> {
        let cmd = self.command()?;
        info!("Dumping database '{}' to {}", self.params.database, self.output_file);
        if let Err(e) = execute(&cmd).await?.into_result() {
            error!("Failed to create MySQL dump: {e}");
            return Err(e);
        }
        Ok(PathBuf::from(&self.output_file))
    }
}
