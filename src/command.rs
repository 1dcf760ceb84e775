use crate::shell::Shell;
use anyhow::Result;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

/// Help text used when a command is registered without one.
pub const DEFAULT_HELP: &str = "No help message.";

/// What the dispatch loop should do after a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// End the session.
    Exit,
}

/// Anything that can be bound to a command name in the shell.
///
/// Handlers receive the arguments that followed the command name, the session
/// they run in and the stream to print to. The session may be changed freely:
/// variables, the prompt and even the command registry itself.
///
/// # Contract
///
/// Handlers report their own recoverable problems (wrong number of arguments,
/// bad values) by printing a message to `out` and returning `Ok(Flow::Continue)`.
/// An `Err` is not absorbed by the loop: it ends [`Shell::run`] with
/// [`ShellError::Command`](crate::ShellError::Command).
pub trait Command {
    /// Run the command.
    fn invoke(&self, args: &[String], shell: &mut Shell, out: &mut dyn Write) -> Result<Flow>;
}

impl<F> Command for F
where
    F: Fn(&[String], &mut Shell, &mut dyn Write) -> Result<Flow>,
{
    fn invoke(&self, args: &[String], shell: &mut Shell, out: &mut dyn Write) -> Result<Flow> {
        self(args, shell, out)
    }
}

/// A handler together with its optional help text, as handed to
/// [`Shell::set_commands`] and [`CommandRegistry::merge`](crate::CommandRegistry::merge).
#[derive(Clone)]
pub struct CommandSpec {
    pub(crate) handler: Rc<dyn Command>,
    pub(crate) help: Option<String>,
}

impl CommandSpec {
    /// Wrap a [`Command`] implementation.
    pub fn new<C: Command + 'static>(command: C) -> Self {
        Self {
            handler: Rc::new(command),
            help: None,
        }
    }

    /// Wrap a closure.
    ///
    /// Same as [`CommandSpec::new`], but the signature lets the compiler infer the
    /// closure's argument types.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&[String], &mut Shell, &mut dyn Write) -> Result<Flow> + 'static,
    {
        Self::new(f)
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// The help text, or [`DEFAULT_HELP`] when none was given.
    pub fn help(&self) -> &str {
        self.help.as_deref().unwrap_or(DEFAULT_HELP)
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}
