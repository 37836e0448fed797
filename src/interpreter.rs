use crate::builtin::{self, Registry};
use crate::command::{Context, ExitCode, Flow};
use crate::env::Environment;
use crate::external;
use crate::io_adapters::LineSource;
use crate::lexer;
use anyhow::{Context as _, Result};
use std::io::Write;

/// Prompt shown before every command line unless configured otherwise.
pub const DEFAULT_PROMPT: &str = "$ ";

/// A minimal shell-like interpreter that can execute built-in and external commands.
///
/// The interpreter owns the session [`Environment`] and a [`Registry`] of
/// builtins. Anything the registry doesn't know is looked up on `PATH`.
///
/// Example
/// ```
/// use minish::{Flow, Interpreter};
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// let flow = sh.dispatch("echo hello   world", &mut out).unwrap();
/// assert_eq!(flow, Flow::Continue);
/// assert_eq!(out, b"hello world\n");
/// ```
pub struct Interpreter {
    env: Environment,
    builtins: Registry,
    prompt: String,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of builtins.
    pub fn new(builtins: Registry) -> Self {
        Self::with_env(Environment::new(), builtins)
    }

    /// Create an interpreter running in an explicit session environment.
    pub fn with_env(env: Environment, builtins: Registry) -> Self {
        Self {
            env,
            builtins,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn builtins(&self) -> &Registry {
        &self.builtins
    }

    /// Handle one raw command line, writing everything it produces to `stdout`.
    ///
    /// Errors are only returned when `stdout` itself fails; command failures
    /// are reported as output and yield [`Flow::Continue`].
    pub fn dispatch(&mut self, line: &str, stdout: &mut dyn Write) -> Result<Flow> {
        let line = line.trim();
        if lexer::is_exit_command(line) {
            log::debug!("exit requested");
            return Ok(Flow::Exit(0));
        }

        let tokens = lexer::tokenize(line);
        let Some((name, args)) = tokens.split_first() else {
            return Ok(Flow::Continue);
        };

        if let Some(cmd) = self.builtins.get(name) {
            log::debug!("builtin {name} {args:?}");
            let mut ctx = Context {
                stdout,
                env: &mut self.env,
                builtins: &self.builtins,
            };
            return builtin::run(cmd, args, &mut ctx);
        }

        if !external::invoke(&tokens, stdout, &self.env)? {
            log::debug!("no builtin or program named {name:?}");
            writeln!(stdout, "{line}: command not found")?;
        }
        Ok(Flow::Continue)
    }

    /// Read-eval-print loop: prompt, read, dispatch until `exit`.
    ///
    /// Returns the requested exit code. Failing to read input ends the loop
    /// with an error, end of input included.
    pub fn repl(&mut self, input: &mut dyn LineSource, stdout: &mut dyn Write) -> Result<ExitCode> {
        loop {
            let line = input.read_line(&self.prompt)?;
            let flow = self.dispatch(&line, stdout)?;
            stdout.flush().context("failed to flush output")?;
            if let Flow::Exit(code) = flow {
                return Ok(code);
            }
        }
    }
}

impl Default for Interpreter {
    /// An interpreter with the default builtins, in the process working directory.
    fn default() -> Self {
        Self::new(Registry::default())
    }
}
