use crate::builtin::Registry;
use crate::env::Environment;
use anyhow::Result;
use std::io::Write;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// What the interpreter loop should do after a command line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Print the next prompt.
    Continue,
    /// Stop the session and leave the process with this status.
    Exit(ExitCode),
}

/// Everything a builtin may touch while it runs.
pub struct Context<'a> {
    /// Destination for regular output and for diagnostics alike.
    pub stdout: &'a mut dyn Write,
    /// Session state: working directory and variable overrides.
    pub env: &'a mut Environment,
    /// The registry the builtin was looked up in, for commands such as `type`.
    pub builtins: &'a Registry,
}

/// Object-safe trait for commands implemented inside the interpreter.
///
/// Implementations are registered once in a [`Registry`], which is consulted
/// both for dispatch and for answering whether a name is a builtin.
pub trait BuiltinCommand {
    /// Canonical name of the command, e.g. "echo" or "cd".
    fn name(&self) -> &'static str;

    /// Executes the command. `args` excludes the command name itself.
    ///
    /// An `Err` is reported to the user as one line on `ctx.stdout` and does
    /// not end the session.
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow>;
}
