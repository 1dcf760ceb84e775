use crate::command::{Command, CommandSpec, Flow};
use crate::env::VariableTable;
use crate::shell::Shell;
use anyhow::Result;
use std::io::{self, Write};
use std::process::{Command as Process, ExitStatus};
use tracing::{debug, warn};

/// Built-in commands registered by every shell unless disabled at construction.
///
/// Each builtin is a unit struct so it can be registered like any user command;
/// `name` and `help` give the registry key and the text shown by `help`.
pub(crate) trait BuiltinCommand: Command + Default + 'static {
    /// Canonical name of the command, e.g. "gset" or "help".
    fn name() -> &'static str;

    fn help() -> &'static str;
}

fn entry<T: BuiltinCommand>() -> (&'static str, CommandSpec) {
    (T::name(), CommandSpec::new(T::default()).with_help(T::help()))
}

/// The default command set, in the order `help` lists it.
pub(crate) fn default_commands() -> Vec<(&'static str, CommandSpec)> {
    vec![
        entry::<Exit>(),
        entry::<Clear>(),
        entry::<Gset>(),
        entry::<Gget>(),
        entry::<Gsets>(),
        entry::<Help>(),
    ]
}

/// End the session. Arguments are ignored.
#[derive(Debug, Default)]
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn help() -> &'static str {
        "Use exit or Ctrl-C to exit."
    }
}

impl Command for Exit {
    fn invoke(&self, _args: &[String], _shell: &mut Shell, _out: &mut dyn Write) -> Result<Flow> {
        Ok(Flow::Exit)
    }
}

/// Clear the terminal with the platform's own clear command.
#[derive(Debug, Default)]
pub struct Clear;

impl BuiltinCommand for Clear {
    fn name() -> &'static str {
        "clear"
    }

    fn help() -> &'static str {
        "Clears this Console."
    }
}

fn clear_screen() -> io::Result<ExitStatus> {
    if cfg!(windows) {
        Process::new("cmd").args(["/C", "cls"]).status()
    } else {
        Process::new("clear").status()
    }
}

impl Command for Clear {
    fn invoke(&self, _args: &[String], _shell: &mut Shell, out: &mut dyn Write) -> Result<Flow> {
        out.flush()?;
        if let Err(err) = clear_screen() {
            warn!(error = %err, "failed to run the terminal clear command");
            writeln!(out, "clear: {err}")?;
        }
        Ok(Flow::Continue)
    }
}

/// `gset <key> <value>`: set a session variable.
#[derive(Debug, Default)]
pub struct Gset;

impl BuiltinCommand for Gset {
    fn name() -> &'static str {
        "gset"
    }

    fn help() -> &'static str {
        "Sets a global environment variable."
    }
}

impl Command for Gset {
    fn invoke(&self, args: &[String], shell: &mut Shell, out: &mut dyn Write) -> Result<Flow> {
        let [key, value] = args else {
            writeln!(out, "Usage: gset <key> <value>")?;
            return Ok(Flow::Continue);
        };
        shell.vars_mut().set_var(key, value);
        debug!(%key, %value, "variable set");
        writeln!(out, "{key} => {value}")?;
        Ok(Flow::Continue)
    }
}

/// `gget <key>`: print a session variable.
#[derive(Debug, Default)]
pub struct Gget;

impl BuiltinCommand for Gget {
    fn name() -> &'static str {
        "gget"
    }

    fn help() -> &'static str {
        "Gets the value of a global environment variable."
    }
}

impl Command for Gget {
    fn invoke(&self, args: &[String], shell: &mut Shell, out: &mut dyn Write) -> Result<Flow> {
        let [key] = args else {
            writeln!(out, "Usage: gget <key>")?;
            return Ok(Flow::Continue);
        };
        match shell.vars().get_var(key) {
            Some(value) => writeln!(out, "{key} => {value}")?,
            None => writeln!(out, "{key} is not set.")?,
        }
        Ok(Flow::Continue)
    }
}

/// `gsets`: print every session variable as a two-column table.
#[derive(Debug, Default)]
pub struct Gsets;

impl BuiltinCommand for Gsets {
    fn name() -> &'static str {
        "gsets"
    }

    fn help() -> &'static str {
        "Displays all global environment variables in a clean format."
    }
}

const NAME_HEADER: &str = "Name";
const VALUE_HEADER: &str = "Value";

/// Columns are as wide as their widest cell and separated by three spaces.
fn render_variables(vars: &VariableTable) -> String {
    let name_width = vars
        .iter()
        .map(|(name, _)| name.chars().count())
        .fold(NAME_HEADER.len(), usize::max);
    let value_width = vars
        .iter()
        .map(|(_, value)| value.chars().count())
        .fold(VALUE_HEADER.len(), usize::max);

    let mut rows = vec![
        format!("{NAME_HEADER:<name_width$}   {VALUE_HEADER}"),
        format!("{}   {}", "-".repeat(name_width), "-".repeat(value_width)),
    ];
    rows.extend(
        vars.iter()
            .map(|(name, value)| format!("{name:<name_width$}   {value}")),
    );

    format!("\n{}\n\n", rows.join("\n"))
}

impl Command for Gsets {
    fn invoke(&self, _args: &[String], shell: &mut Shell, out: &mut dyn Write) -> Result<Flow> {
        if shell.vars().is_empty() {
            writeln!(out, "No environment variables set.")?;
        } else {
            write!(out, "{}", render_variables(shell.vars()))?;
        }
        Ok(Flow::Continue)
    }
}

/// `help [name]`: list every command, or show the help of one.
#[derive(Debug, Default)]
pub struct Help;

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn help() -> &'static str {
        "Displays help information for a command."
    }
}

const COMMANDS_HEADER: &str = "Commands:";

impl Command for Help {
    fn invoke(&self, args: &[String], shell: &mut Shell, out: &mut dyn Write) -> Result<Flow> {
        match args.first() {
            None => {
                let width = COMMANDS_HEADER.len();
                writeln!(out)?;
                writeln!(out, "{COMMANDS_HEADER:<width$}   ")?;
                writeln!(out, "{}   ", "=".repeat(width))?;
                for (name, entry) in shell.registry().iter() {
                    writeln!(out, "  {name:<width$}   {}", entry.help())?;
                }
            }
            Some(name) => match shell.registry().get(name) {
                Some(entry) => writeln!(out, "{name} => {}", entry.help())?,
                None => writeln!(out, "'{name}' is not a recognized command.")?,
            },
        }
        writeln!(out)?;
        Ok(Flow::Continue)
    }
}
