use std::collections::HashMap;
use std::env as stdenv;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Separator between entries of the `PATH` variable.
const PATH_SEPARATOR: char = ':';

/// Session context of the interpreter.
///
/// The environment contains:
/// - `vars`: per-session overrides of environment variables. `Some` sets a
///   value, `None` hides the variable. Anything not overridden is read from
///   the live process environment on every access, never cached.
/// - `current_dir`: the working directory used by builtins and for spawning
///   external programs. `cd` changes this field, not the process directory.
#[derive(Debug, Clone)]
pub struct Environment {
    pub vars: HashMap<String, Option<String>>,
    pub current_dir: PathBuf,
}

impl Environment {
    /// Start a session in the process working directory.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::with_dir(current_dir)
    }

    /// Start a session in `current_dir` with no variable overrides.
    pub fn with_dir(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            current_dir: current_dir.into(),
        }
    }

    /// Get the value of an environment variable.
    ///
    /// Looks up the session overrides first, falling back to `std::env::var`.
    pub fn get_var(&self, key: &str) -> Option<String> {
        match self.vars.get(key) {
            Some(value) => value.clone(),
            None => stdenv::var(key).ok(),
        }
    }

    /// Set or override an environment variable for this session.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), Some(val.into()));
    }

    /// Hide a variable for this session, even if the process has it.
    pub fn unset_var(&mut self, key: impl Into<String>) {
        self.vars.insert(key.into(), None);
    }

    /// Directories listed in `PATH`, in lookup order.
    ///
    /// Empty entries are skipped and relative ones are anchored at the session
    /// working directory. A missing variable gives an empty list.
    pub fn search_path_dirs(&self) -> Vec<PathBuf> {
        let Some(paths) = self.get_var("PATH") else {
            return Vec::new();
        };
        paths
            .split(PATH_SEPARATOR)
            .filter(|dir| !dir.is_empty())
            .map(|dir| self.resolve(dir))
            .collect()
    }

    /// Home directory of the user, used for `cd ~`.
    ///
    /// `HOME` wins when set; otherwise the platform user-profile lookup is used.
    /// A session that hides `HOME` has no home directory at all.
    pub fn home_dir(&self) -> Option<PathBuf> {
        if let Some(None) = self.vars.get("HOME") {
            return None;
        }
        if let Some(home) = self.get_var("HOME").filter(|home| !home.is_empty()) {
            return Some(PathBuf::from(home));
        }
        let expanded = shellexpand::tilde("~");
        (expanded != "~").then(|| PathBuf::from(expanded.into_owned()))
    }

    /// Interpret `path` relative to the session working directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.current_dir.join(path)
    }

    /// Configure a child process to run inside this session.
    pub fn apply_to(&self, cmd: &mut Command) {
        cmd.current_dir(&self.current_dir);
        for (key, value) in &self.vars {
            match value {
                Some(value) => cmd.env(key, value),
                None => cmd.env_remove(key),
            };
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
