use rustyline::error::ReadlineError;
use std::io;

/// Failures reported by a builtin.
///
/// The `Display` text is exactly what the user sees: the registry writes it
/// to the session output as a single line and the loop carries on.
#[derive(Debug, thiserror::Error)]
pub enum BuiltinError {
    /// Any failure to enter a directory, permission errors included.
    #[error("cd: {0}: No such file or directory")]
    NoSuchDirectory(String),

    #[error("Failed to find user's home directory")]
    HomeDirUnavailable,

    #[error("pwd: error retrieving current directory: {0}")]
    CurrentDirUnavailable(#[source] io::Error),
}

/// Fatal failures while reading the next command line.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("EOF")]
    Eof,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Readline(#[from] ReadlineError),
}
