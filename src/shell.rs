use crate::builtin::default_commands;
use crate::command::{CommandSpec, Flow};
use crate::completion::ShellHelper;
use crate::env::VariableTable;
use crate::error::ShellError;
use crate::expand::expand_variables;
use crate::lexer;
use crate::registry::CommandRegistry;
use rustyline::config::Config;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Editor};
use std::io::{self, Write};
use tracing::debug;

/// Prompt used when none is configured.
pub const DEFAULT_PROMPT: &str = "> ";

/// Construction parameters for a [`Shell`].
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Text shown before every line.
    pub prompt: String,
    /// Register `exit`, `clear`, `gset`, `gget`, `gsets` and `help`.
    pub builtins: bool,
    /// User commands, registered after the built-ins and overriding them on a name clash.
    pub commands: Vec<(String, CommandSpec)>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            builtins: true,
            commands: Vec::new(),
        }
    }
}

impl ShellConfig {
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn without_builtins(mut self) -> Self {
        self.builtins = false;
        self
    }

    pub fn with_command(mut self, name: impl Into<String>, spec: CommandSpec) -> Self {
        self.commands.push((name.into(), spec));
        self
    }
}

/// An interactive shell session.
///
/// The session owns everything a command can see or change: the variable table,
/// the command registry and the prompt. Handlers get `&mut Shell`, so there is no
/// global state and several shells can live side by side.
///
/// Example
/// ```
/// use shell_kit::{CommandSpec, Flow, Shell, ShellConfig};
/// use std::io::Write;
///
/// let config = ShellConfig::default().with_command(
///     "hello",
///     CommandSpec::from_fn(|args, _shell, out| {
///         writeln!(out, "hello {}", args.join(" "))?;
///         Ok(Flow::Continue)
///     }),
/// );
/// let mut sh = Shell::new(config);
/// let mut out = Vec::new();
/// sh.execute_line("gset who world", &mut out).unwrap();
/// sh.execute_line("hello $who", &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "who => world\nhello world\n");
/// ```
pub struct Shell {
    prompt: String,
    vars: VariableTable,
    registry: CommandRegistry,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        let mut registry = CommandRegistry::new();
        if config.builtins {
            registry.merge(default_commands());
        }
        registry.merge(config.commands);

        Self {
            prompt: config.prompt,
            vars: VariableTable::new(),
            registry,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Add or replace commands. Commands not mentioned stay registered.
    pub fn set_commands<I, N>(&mut self, commands: I)
    where
        I: IntoIterator<Item = (N, CommandSpec)>,
        N: Into<String>,
    {
        self.registry.merge(commands);
    }

    pub fn vars(&self) -> &VariableTable {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut VariableTable {
        &mut self.vars
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Split `line` into arguments and expand variables in each of them.
    pub fn parse_line(&self, line: &str) -> Vec<String> {
        lexer::split_into_tokens(line)
            .iter()
            .map(|token| expand_variables(token, &self.vars))
            .collect()
    }

    /// Parse and dispatch one line, printing to `out`.
    ///
    /// Blank lines do nothing. An unknown command prints `<name>: command not found`
    /// and is not an error.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow, ShellError> {
        let tokens = self.parse_line(line);
        let Some((name, args)) = tokens.split_first() else {
            return Ok(Flow::Continue);
        };
        debug!(?tokens, "parsed line");

        // Cloned out of the registry so the handler may change the registry itself.
        let Some(handler) = self.registry.get(name).map(|entry| entry.handler()) else {
            debug!(command = %name, "unknown command");
            writeln!(out, "{name}: command not found")?;
            return Ok(Flow::Continue);
        };

        debug!(command = %name, "dispatching");
        handler
            .invoke(args, self, out)
            .map_err(|source| ShellError::Command {
                name: name.clone(),
                source,
            })
    }

    /// Read, parse and dispatch lines until `exit`, Ctrl-C or Ctrl-D.
    ///
    /// Tab completes command names, then file names in the current directory.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .build();
        let mut rl: Editor<ShellHelper, DefaultHistory> = Editor::with_config(config)?;
        rl.set_helper(Some(ShellHelper::new(self.registry.names())));

        let mut stdout = io::stdout();
        loop {
            if let Some(helper) = rl.helper_mut() {
                helper.set_commands(self.registry.names());
            }

            match rl.readline(&self.prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    let flow = self.execute_line(&line, &mut stdout)?;
                    stdout.flush()?;
                    if flow == Flow::Exit {
                        debug!("exit requested");
                        return Ok(());
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    writeln!(stdout)?;
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

impl Default for Shell {
    /// A shell with the default prompt and the built-in commands.
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}
