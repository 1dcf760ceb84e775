//! Tab completion: command names first, then entries of the working directory.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

const DIR_MARKER: char = '/';

/// All completions for `text`.
///
/// Command names starting with `text` win. When there are none, the entries of
/// `dir` starting with `text` are offered, directories with a trailing `/`.
/// A trailing `/` in `text` restricts the file candidates to directories.
pub fn candidates<'a>(
    text: &str,
    commands: impl IntoIterator<Item = &'a str>,
    dir: &Path,
) -> Vec<String> {
    let options: Vec<String> = commands
        .into_iter()
        .filter(|name| name.starts_with(text))
        .map(str::to_owned)
        .collect();

    if options.is_empty() {
        file_candidates(text, dir)
    } else {
        options
    }
}

/// The completion at `index`, or `None` once the candidates are exhausted.
pub fn candidate<'a>(
    text: &str,
    index: usize,
    commands: impl IntoIterator<Item = &'a str>,
    dir: &Path,
) -> Option<String> {
    candidates(text, commands, dir).into_iter().nth(index)
}

fn file_candidates(text: &str, dir: &Path) -> Vec<String> {
    let (prefix, dirs_only) = match text.strip_suffix(DIR_MARKER) {
        Some(prefix) => (prefix, true),
        None => (text, false),
    };

    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut options: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            if !name.starts_with(prefix) {
                return None;
            }
            // Follows symlinks, so a link to a directory completes as one.
            let is_dir = entry.path().is_dir();
            match (is_dir, dirs_only) {
                (true, _) => Some(format!("{name}{DIR_MARKER}")),
                (false, true) => None,
                (false, false) => Some(name),
            }
        })
        .collect();
    options.sort();
    options
}

/// Line-editor glue: completes the word under the cursor.
///
/// The helper keeps its own copy of the command names because the editor owns
/// it; [`Shell::run`](crate::Shell::run) refreshes that copy before every read.
#[derive(Debug, Default)]
pub struct ShellHelper {
    commands: Vec<String>,
}

impl ShellHelper {
    pub fn new<'a>(commands: impl IntoIterator<Item = &'a str>) -> Self {
        let mut helper = Self::default();
        helper.set_commands(commands);
        helper
    }

    pub fn set_commands<'a>(&mut self, commands: impl IntoIterator<Item = &'a str>) {
        self.commands = commands.into_iter().map(str::to_owned).collect();
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        let text = &line[start..pos];

        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let found = candidates(text, self.commands.iter().map(String::as_str), &cwd);
        trace!(%text, count = found.len(), "completion candidates");

        let pairs = found
            .into_iter()
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}
