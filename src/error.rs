use std::fmt;

#[derive(Debug)]
pub enum DumpError {
    InvalidInput(String),
    CommandTooLong { len: usize, limit: usize },
    Spawn(std::io::Error),
    ToolFailed { code: Option<i32> },
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            DumpError::CommandTooLong { len, limit } => {
                write!(f, "Command too long: {len} bytes exceeds the {limit} byte limit")
            }
            DumpError::Spawn(e) => write!(f, "Failed to run shell: {e}"),
            DumpError::ToolFailed { code: Some(code) } => {
                write!(f, "Dump tool exited with status {code}")
            }
            DumpError::ToolFailed { code: None } => {
                write!(f, "Dump tool was terminated by a signal")
            }
        }
    }
}

impl std::error::Error for DumpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DumpError::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DumpError {
    fn from(e: std::io::Error) -> Self {
        DumpError::Spawn(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = DumpError::CommandTooLong { len: 9000, limit: 8192 };
        assert_eq!(err.to_string(), "Command too long: 9000 bytes exceeds the 8192 byte limit");

        assert_eq!(
            DumpError::ToolFailed { code: Some(2) }.to_string(),
            "Dump tool exited with status 2"
        );
        assert_eq!(
            DumpError::ToolFailed { code: None }.to_string(),
            "Dump tool was terminated by a signal"
        );
    }

    #[test]
    fn test_io_error_is_source() {
        use std::error::Error;

        let err: DumpError = std::io::Error::new(std::io::ErrorKind::NotFound, "no shell").into();
        assert!(matches!(err, DumpError::Spawn(_)));
        assert!(err.source().is_some());
        assert!(DumpError::InvalidInput("x".into()).source().is_none());
    }
}
