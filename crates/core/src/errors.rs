/// Result type alias for cyclewatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cyclewatch operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The command line could not be split into runnable commands
    #[error("malformed command '{input}': {message}")]
    MalformedCommand { input: String, message: String },

    /// Command execution errors
    #[error("{}", format_command_error(.command, .args, .message, .exit_code))]
    CommandExecution {
        command: String,
        args: Vec<String>,
        message: String,
        exit_code: Option<i32>,
    },

    /// An interval value was not a positive number of seconds
    #[error("invalid interval '{input}': {message}")]
    IntervalParse { input: String, message: String },

    /// Terminal I/O errors
    #[error("terminal {operation} failed: {source}")]
    Terminal {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

fn format_command_error(
    command: &str,
    args: &[String],
    message: &str,
    exit_code: &Option<i32>,
) -> String {
    let args_str = args.join(" ");
    let display = if args_str.is_empty() {
        command.to_string()
    } else {
        format!("{command} {args_str}")
    };
    match exit_code {
        Some(code) => format!("command '{display}' failed with exit code {code}: {message}"),
        None => format!("command '{display}' failed: {message}"),
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Terminal {
            operation: "io".to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a malformed command error
    #[must_use]
    pub fn malformed_command(input: impl Into<String>, message: impl Into<String>) -> Self {
        Error::MalformedCommand {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a command execution error
    #[must_use]
    pub fn command_execution(
        command: impl Into<String>,
        args: Vec<String>,
        message: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Error::CommandExecution {
            command: command.into(),
            args,
            message: message.into(),
            exit_code,
        }
    }

    /// Create an interval parse error
    #[must_use]
    pub fn interval_parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Error::IntervalParse {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a terminal error for the named operation
    #[must_use]
    pub fn terminal(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Terminal {
            operation: operation.into(),
            source,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}
