//! A tiny interactive shell: builtins plus programs found on `PATH`.
//!
//! Each input line is split on spaces into tokens. The first token is looked
//! up in a [`Registry`] of builtins (`echo`, `type`, `exit`, `pwd`, `cd`);
//! anything else is searched for in the `PATH` directories and run as an
//! external program whose standard output is captured and forwarded. There is
//! no quoting, no pipelines and no redirection.
//!
//! The main entry point is [`Interpreter`]. The working directory lives in the
//! session [`Environment`] rather than in the process, so several interpreters
//! can run side by side.

mod builtin;
pub mod command;
pub mod env;
pub mod error;
pub mod external;
mod interpreter;
pub mod io_adapters;
pub mod lexer;

pub use builtin::{Cd, Echo, Exit, Pwd, Registry, Type};
pub use command::{BuiltinCommand, Context, ExitCode, Flow};
pub use env::Environment;
pub use interpreter::{DEFAULT_PROMPT, Interpreter};
