use crate::command::{Command, CommandSpec};
use std::fmt;
use std::rc::Rc;

/// A registered command: its handler and the text `help` shows for it.
#[derive(Clone)]
pub struct CommandEntry {
    handler: Rc<dyn Command>,
    help: String,
}

impl CommandEntry {
    /// A shared handle to the handler, detached from the registry borrow.
    pub fn handler(&self) -> Rc<dyn Command> {
        Rc::clone(&self.handler)
    }

    pub fn help(&self) -> &str {
        &self.help
    }
}

impl From<CommandSpec> for CommandEntry {
    fn from(spec: CommandSpec) -> Self {
        let help = spec.help().to_string();
        Self {
            handler: spec.handler,
            help,
        }
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

/// Command names mapped to their entries, in registration order.
///
/// Names are unique. Registering a name again replaces its handler and help text
/// but keeps the position it was first registered at.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    entries: Vec<(String, CommandEntry)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single command, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, spec: CommandSpec) {
        let name = name.into();
        let entry = CommandEntry::from(spec);
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = entry,
            None => self.entries.push((name, entry)),
        }
    }

    /// Register every command in `commands`.
    ///
    /// Commands that are not mentioned are left alone.
    pub fn merge<I, N>(&mut self, commands: I)
    where
        I: IntoIterator<Item = (N, CommandSpec)>,
        N: Into<String>,
    {
        for (name, spec) in commands {
            self.insert(name, spec);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entry)| entry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandEntry)> {
        self.entries.iter().map(|(n, entry)| (n.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
