//! A small, embeddable interactive shell.
//!
//! The crate reads a line, splits it into arguments with shell-like quoting rules,
//! expands `$name` references against the session's own variables and dispatches
//! the first argument to a registered command handler. It loops until the user
//! types `exit` or presses Ctrl-C.
//!
//! The main entry point is [`Shell`]. Commands are anything implementing
//! [`Command`], closures included, and are registered through [`CommandSpec`]s
//! either at construction ([`ShellConfig`]) or later with [`Shell::set_commands`].
//! The public modules [`lexer`], [`expand`] and [`completion`] expose the parsing
//! and completion steps on their own.

mod builtin;
pub mod command;
pub mod completion;
pub mod env;
mod error;
pub mod expand;
pub mod lexer;
mod registry;
mod shell;

pub use command::{Command, CommandSpec, DEFAULT_HELP, Flow};
pub use env::VariableTable;
pub use error::ShellError;
pub use registry::{CommandEntry, CommandRegistry};
pub use shell::{DEFAULT_PROMPT, Shell, ShellConfig};
