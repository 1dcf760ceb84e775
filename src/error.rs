use rustyline::error::ReadlineError;
use thiserror::Error;

/// Errors that end an interactive session.
///
/// Unknown commands and bad arguments are not errors: they are reported to the
/// user and the session goes on.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The line editor failed for a reason other than Ctrl-C or Ctrl-D.
    #[error("line editor failed: {0}")]
    Readline(#[from] ReadlineError),

    /// Writing to the output stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A command handler returned an error instead of reporting it itself.
    #[error("command `{name}` failed")]
    Command {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}
