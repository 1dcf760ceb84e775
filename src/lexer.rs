//! Lexical analysis for the shell's command line.
//!
//! The lexer is a small finite state machine that splits a raw line into argument
//! tokens. Whitespace separates words, a word that starts with a single or double
//! quote extends to the matching closing quote, and a backslash inside a quoted span
//! escapes the next character (including the quote itself).
//!
//! Malformed input never fails: a quote that is never closed is read again as an
//! ordinary word, starting at the quote character.

/// Scanner states.
///
/// `Quoted` and `Escape` carry the quote character that opened the current span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Normal,
    ReadingWord,
    Quoted(char),
    Escape(char),
}

struct LexingFSM {
    input: Vec<char>,
    pos: usize,
    state: LexingState,
    /// Position of the opening quote of the span being read, used to rescan it as a word.
    span_start: usize,
    buffer: String,
}

impl LexingFSM {
    /// Creates a new lexer over `line`.
    fn new(line: &str) -> Self {
        LexingFSM {
            input: line.chars().collect(),
            pos: 0,
            state: LexingState::Normal,
            span_start: 0,
            buffer: String::new(),
        }
    }

    /// Runs the state machine to the end of the input and returns the finished tokens.
    fn make_tokens(&mut self) -> Vec<String> {
        let mut out = Vec::new();

        loop {
            let ch = self.read_char();
            match (self.state, ch) {
                (LexingState::Normal, None) => break,
                (LexingState::Normal, Some(c)) if c.is_whitespace() => {}
                (LexingState::Normal, Some(c @ ('"' | '\''))) => {
                    self.span_start = self.pos - 1;
                    self.state = LexingState::Quoted(c);
                }
                (LexingState::Normal, Some(c)) => {
                    self.buffer.push(c);
                    self.state = LexingState::ReadingWord;
                }

                (LexingState::ReadingWord, Some(c)) if !c.is_whitespace() => self.buffer.push(c),
                (LexingState::ReadingWord, _) => self.finish_token(&mut out),

                (LexingState::Quoted(quote), Some(c)) if c == quote => self.finish_token(&mut out),
                (LexingState::Quoted(quote), Some('\\')) => {
                    self.buffer.push('\\');
                    self.state = LexingState::Escape(quote);
                }
                (LexingState::Quoted(_), Some(c)) => self.buffer.push(c),

                (LexingState::Escape(quote), Some(c)) => {
                    self.buffer.push(c);
                    self.state = LexingState::Quoted(quote);
                }

                // Unterminated quote: read the span again as a plain word, quote included.
                (LexingState::Quoted(_) | LexingState::Escape(_), None) => {
                    self.pos = self.span_start;
                    self.buffer.clear();
                    self.state = LexingState::ReadingWord;
                }
            }
        }

        out
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn finish_token(&mut self, out: &mut Vec<String>) {
        let raw = std::mem::take(&mut self.buffer);
        out.push(finalize_token(&raw));
        self.state = LexingState::Normal;
    }
}

/// Turns the raw text of a token into its final form.
///
/// Escapes are resolved, surrounding whitespace is trimmed and a single pair of
/// matching outer quotes is removed.
fn finalize_token(raw: &str) -> String {
    let unescaped = resolve_escapes(raw);
    strip_outer_quotes(unescaped.trim()).to_string()
}

/// Replaces every `\X` with `X`.
///
/// `\$` is left untouched: the variable expander consumes that backslash itself
/// and uses it to skip the reference.
fn resolve_escapes(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('$') => result.push_str("\\$"),
            Some(escaped) => result.push(escaped),
            None => result.push('\\'),
        }
    }
    result
}

fn strip_outer_quotes(token: &str) -> &str {
    for quote in ['"', '\''] {
        if token.starts_with(quote) && token.ends_with(quote) {
            return if token.len() == 1 {
                ""
            } else {
                &token[1..token.len() - 1]
            };
        }
    }
    token
}

/// The main entry point function to perform lexical analysis.
///
/// Creates and runs the finite state machine to tokenize the input line.
///
/// # Arguments
/// * `line` - The string to be tokenized.
///
/// # Returns
/// The tokens in input order, before variable expansion. A line holding only
/// whitespace produces an empty vector.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    let mut lexer = LexingFSM::new(line);
    lexer.make_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        split_into_tokens(line)
    }

    #[test]
    fn test_double_quoted_argument_is_one_token() {
        assert_eq!(tokens(r#"gset a "hello world""#), ["gset", "a", "hello world"]);
    }

    #[test]
    fn test_plain_words_split_on_whitespace_runs() {
        assert_eq!(tokens("  one\ttwo   three  "), ["one", "two", "three"]);
        assert_eq!(tokens("single"), ["single"]);
    }

    #[test]
    fn test_blank_line_has_no_tokens() {
        assert!(tokens("").is_empty());
        assert!(tokens(" \t  ").is_empty());
    }

    #[test]
    fn test_single_quotes_group_words() {
        assert_eq!(tokens("echo 'a b' c"), ["echo", "a b", "c"]);
    }

    #[test]
    fn test_escaped_quote_inside_quotes() {
        assert_eq!(tokens(r#"say "he said \"hi\"""#), ["say", r#"he said "hi""#]);
        assert_eq!(tokens(r"say 'it\'s'"), ["say", "it's"]);
    }

    #[test]
    fn test_backslash_escapes_in_bare_word() {
        assert_eq!(tokens(r"a\bc"), ["abc"]);
        assert_eq!(tokens(r"path\\name"), [r"path\name"]);
        assert_eq!(tokens(r"trailing\"), [r"trailing\"]);
    }

    #[test]
    fn test_escaped_dollar_is_kept_for_expansion() {
        assert_eq!(tokens(r"echo \$HOME"), ["echo", r"\$HOME"]);
    }

    #[test]
    fn test_quoted_span_ends_the_token() {
        assert_eq!(tokens(r#""ab"cd"#), ["ab", "cd"]);
    }

    #[test]
    fn test_quote_inside_word_is_literal() {
        assert_eq!(tokens(r#"a"b c""#), [r#"a"b"#, r#"c""#]);
    }

    #[test]
    fn test_empty_quotes_give_empty_token() {
        assert_eq!(tokens(r#"x "" y"#), ["x", "", "y"]);
    }

    #[test]
    fn test_quoted_content_is_trimmed_and_unwrapped() {
        assert_eq!(tokens(r#""  padded  ""#), ["padded"]);
        assert_eq!(tokens(r#""'inner'""#), ["inner"]);
    }

    #[test]
    fn test_unterminated_quote_is_read_as_word() {
        assert_eq!(tokens(r#"echo "abc def"#), ["echo", "\"abc", "def"]);
        assert_eq!(tokens("'"), [""]);
    }
}
