//! End-to-end tests through a real shell.
//!
//! `printf '%s\n'` stands in for mysqldump so every shell word of the
//! assembled command lands on its own line in the output file.

#![cfg(unix)]

use mysqldump_exec::{
    build, execute, mysqldump_exec, CommandBuilder, ConnectionParams, DumpError, DumpJob,
    ExecutionResult, OptionSet,
};

const ECHO_WORDS: &str = "printf '%s\\n'";

fn params() -> ConnectionParams {
    ConnectionParams::new("127.0.0.1", "root", "pw", "db1")
}

async fn words_for(job: DumpJob, dir: &tempfile::TempDir) -> Vec<String> {
    let out = dir.path().join("out.sql");
    let path = job
        .tool(ECHO_WORDS)
        .output_file(out.to_str().unwrap())
        .dump()
        .await
        .unwrap();
    assert_eq!(path, out);

    std::fs::read_to_string(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_base_words_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let job = DumpJob::new(params()).set_flag("quick", true).single_transaction();

    let words = words_for(job, &dir).await;
    assert_eq!(
        words,
        ["-h127.0.0.1", "-uroot", "-ppw", "-P3306", "db1", "--quick", "--single-transaction"]
    );
}

#[tokio::test]
async fn test_quoted_values_survive_as_single_words() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("pwned");
    let injections = [
        "id > 5; rm -rf /".to_string(),
        "it's".to_string(),
        "''".to_string(),
        String::new(),
        format!("$(touch {})", marker.display()),
        format!("`touch {}`", marker.display()),
        "a\tb  c".to_string(),
    ];

    for value in &injections {
        let job = DumpJob::new(params()).where_clause(value);
        let words = words_for(job, &dir).await;
        assert_eq!(words.last().unwrap(), &format!("--where={value}"));
    }
    assert!(!marker.exists());
}

#[tokio::test]
async fn test_output_path_with_spaces_and_quotes() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("it's a dump.sql");
    let cmd = CommandBuilder::new(params())
        .tool(ECHO_WORDS)
        .build(&OptionSet::new(), out.to_str())
        .unwrap();

    assert_eq!(execute(&cmd).await.unwrap(), ExecutionResult::Success);
    assert!(std::fs::read_to_string(&out).unwrap().starts_with("-h127.0.0.1\n"));
}

#[tokio::test]
async fn test_tool_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = DumpJob::new(params())
        .tool("false")
        .output_file(dir.path().join("out.sql").to_str().unwrap())
        .dump()
        .await
        .unwrap_err();
    assert!(matches!(err, DumpError::ToolFailed { code: Some(1) }));
}

#[tokio::test]
async fn test_unwritable_output_is_failure() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("out.sql");
    let cmd = CommandBuilder::new(params())
        .tool("true")
        .build(&OptionSet::new(), out.to_str())
        .unwrap();

    let result = execute(&cmd).await.unwrap();
    assert!(!result.is_success());
}

#[tokio::test]
async fn test_too_long_command_runs_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let err = DumpJob::new(params())
        .tool(format!("touch {};", marker.display()))
        .where_clause(&"x".repeat(10_000))
        .output_file(dir.path().join("out.sql").to_str().unwrap())
        .dump()
        .await
        .unwrap_err();

    assert!(matches!(err, DumpError::CommandTooLong { .. }));
    assert!(!marker.exists());
}

#[tokio::test]
async fn test_mysqldump_exec_fails_closed_on_long_command() {
    let mut options = OptionSet::new();
    options.set("where", "x".repeat(10_000));
    let err = mysqldump_exec(&params(), &options, Some("/tmp/never.sql"))
        .await
        .unwrap_err();
    assert!(matches!(err, DumpError::CommandTooLong { .. }));
}

#[test]
fn test_scenario_command_text() {
    let mut options = OptionSet::new();
    options.set("quick", true).set("single-transaction", true).set("frobnicate", true);
    let cmd = build(&params(), &options, Some("/tmp/out.sql")).unwrap();
    assert_eq!(
        cmd.as_str(),
        "mysqldump -h127.0.0.1 -uroot -ppw -P3306 db1 --quick --single-transaction > '/tmp/out.sql'"
    );
}
