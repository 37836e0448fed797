//! A module implementing tokenization of a single command line.
//!
//! There are no quotes, escapes or substitutions: a space always separates two
//! tokens, and runs of spaces collapse because empty pieces are dropped.

/// Split a command line into its non-empty, space-separated tokens.
///
/// The first token is the command name, the rest are its arguments. An empty
/// (or all-space) line yields an empty vector.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(' ')
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Whether the first space-delimited word of `line` is `exit`.
///
/// Checked on the raw line before tokenizing, so any trailing arguments are
/// ignored.
pub fn is_exit_command(line: &str) -> bool {
    line.split(' ').next() == Some("exit")
}
