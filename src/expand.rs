//! `$name` substitution against the session's variables.

use crate::env::VariableTable;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Either an escaped `\$name` (group 1) or a reference `$name` (group 2).
static VARIABLE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\\$(\w*)|\$(\w+)").expect("variable reference pattern is valid")
});

/// Expands every `$name` in `token` with its value from `vars`.
///
/// Unset variables expand to the empty string. `\$name` is not expanded: the
/// backslash is dropped and `$name` stays as literal text. Substituted values are
/// never expanded again.
pub fn expand_variables(token: &str, vars: &VariableTable) -> String {
    VARIABLE_REF
        .replace_all(token, |caps: &Captures| match caps.get(2) {
            Some(name) => vars.get_var(name.as_str()).unwrap_or_default().to_string(),
            None => format!("${}", &caps[1]),
        })
        .into_owned()
}
