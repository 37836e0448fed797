use crate::env::Environment;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Command that is not a builtin, resolved to a file on the search path.
pub struct ExternalCommand {
    name: String,
    program: PathBuf,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(name: impl Into<String>, program: PathBuf, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            program,
            args,
        }
    }

    /// Look `tokens[0]` up on the session `PATH`.
    ///
    /// Returns `None` when no directory holds a file of that name.
    pub fn resolve(env: &Environment, tokens: &[String]) -> Option<Self> {
        let (name, args) = tokens.split_first()?;
        let program = search_paths(&env.search_path_dirs(), name)?;
        Some(Self::new(name.as_str(), program, args.to_vec()))
    }

    /// Path the command resolved to.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run the program to completion and forward what it printed.
    ///
    /// Standard output is captured in full and written to `stdout` once the
    /// child exits; standard error goes straight to the terminal. A spawn
    /// failure or a non-success exit status is reported as a single diagnostic
    /// line instead, and the captured output is dropped.
    pub fn execute(self, stdout: &mut dyn Write, env: &Environment) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).stderr(Stdio::inherit());
        env.apply_to(&mut cmd);

        log::debug!("spawning {} {:?}", self.program.display(), self.args);
        let failure = match cmd.output() {
            Ok(output) if output.status.success() => {
                stdout
                    .write_all(&output.stdout)
                    .context("failed to forward program output")?;
                return Ok(());
            }
            Ok(output) => describe_status(output.status),
            Err(e) => e.to_string(),
        };

        log::debug!("{} failed: {}", self.name, failure);
        writeln!(stdout, "Error running external program {}:{}", self.name, failure)?;
        Ok(())
    }
}

/// Resolve and run `tokens` as an external program.
///
/// Returns `false` if nothing on the search path matched `tokens[0]`, in
/// which case nothing is written. A match that then fails to run still counts
/// as found.
pub fn invoke(tokens: &[String], stdout: &mut dyn Write, env: &Environment) -> Result<bool> {
    match ExternalCommand::resolve(env, tokens) {
        Some(cmd) => {
            cmd.execute(stdout, env)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Find `name` in `dirs`, first match wins.
///
/// Only existence of `dir/name` is checked, not whether it is executable.
pub fn search_paths(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    let found = dirs.iter().map(|dir| dir.join(name)).find(|path| path.exists());
    log::trace!("lookup {name:?} in {} dirs -> {found:?}", dirs.len());
    found
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {code}"),
        None => terminated_by_signal(status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;
    match status.signal() {
        Some(signal) => format!("signal: {signal}"),
        None => status.to_string(),
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(status: ExitStatus) -> String {
    status.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lock_spawn, write_file, write_script};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn session_with_path(dirs: &[&Path]) -> Environment {
        let mut env = Environment::with_dir("/");
        let joined = dirs
            .iter()
            .map(|d| d.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(":");
        env.set_var("PATH", joined);
        env
    }

    fn tokens(line: &str) -> Vec<String> {
        crate::lexer::tokenize(line)
    }

    #[test]
    fn first_directory_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_file(&first.path().join("tool"), "a");
        write_file(&second.path().join("tool"), "b");

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(search_paths(&dirs, "tool"), Some(first.path().join("tool")));
    }

    #[test]
    fn later_directory_used_when_earlier_misses() {
        let usr_bin = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        write_file(&bin.path().join("ls"), "");

        let dirs = vec![usr_bin.path().to_path_buf(), bin.path().to_path_buf()];
        assert_eq!(search_paths(&dirs, "ls"), Some(bin.path().join("ls")));
    }

    #[test]
    fn missing_name_is_none() {
        let dir = TempDir::new().unwrap();
        let dirs = vec![dir.path().to_path_buf()];
        assert_eq!(search_paths(&dirs, "nonexistent_cmd_xyz"), None);
        assert_eq!(search_paths(&dirs, ""), None);
        assert_eq!(search_paths(&[], "ls"), None);
    }

    #[test]
    fn non_executable_file_is_still_found() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("notes"), "plain text");
        let dirs = vec![dir.path().to_path_buf()];
        assert_eq!(search_paths(&dirs, "notes"), Some(dir.path().join("notes")));
    }

    #[test]
    fn unset_or_empty_path_is_not_found() {
        let mut env = Environment::with_dir("/");
        env.unset_var("PATH");
        let mut out = Vec::new();
        assert!(!invoke(&tokens("ls"), &mut out, &env).unwrap());

        env.set_var("PATH", "");
        assert!(!invoke(&tokens("ls"), &mut out, &env).unwrap());
        assert!(out.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn output_is_forwarded_verbatim() {
        let _lock = lock_spawn();
        let dir = TempDir::new().unwrap();
        write_script(dir.path(), "greet", "printf 'hello %s\\n' \"$1\"\nprintf 'second line\\n'");
        let env = session_with_path(&[dir.path()]);

        let mut out = Vec::new();
        assert!(invoke(&tokens("greet world"), &mut out, &env).unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "hello world\nsecond line\n");
    }

    #[test]
    #[cfg(unix)]
    fn runs_in_session_directory() {
        let _lock = lock_spawn();
        let bin = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        write_script(bin.path(), "where", "pwd");
        let mut env = session_with_path(&[bin.path()]);
        env.current_dir = work.path().canonicalize().unwrap();

        let mut out = Vec::new();
        assert!(invoke(&tokens("where"), &mut out, &env).unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}\n", env.current_dir.display())
        );
    }

    #[test]
    #[cfg(unix)]
    fn non_executable_match_reports_error_and_counts_as_found() {
        let _lock = lock_spawn();
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("notes"), "plain text");
        let env = session_with_path(&[dir.path()]);

        let mut out = Vec::new();
        assert!(invoke(&tokens("notes"), &mut out, &env).unwrap());
        let s = String::from_utf8(out).unwrap();
        assert!(
            s.starts_with("Error running external program notes:"),
            "unexpected output: {s:?}"
        );
        assert!(s.ends_with('\n'));
    }

    #[test]
    #[cfg(unix)]
    fn failing_exit_status_is_reported() {
        let _lock = lock_spawn();
        let dir = TempDir::new().unwrap();
        write_script(dir.path(), "fails", "echo partial\nexit 3");
        let env = session_with_path(&[dir.path()]);

        let mut out = Vec::new();
        assert!(invoke(&tokens("fails"), &mut out, &env).unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error running external program fails:exit status 3\n"
        );
    }

    #[test]
    fn resolve_keeps_arguments() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("tool"), "");
        let env = session_with_path(&[dir.path()]);

        let cmd = ExternalCommand::resolve(&env, &tokens("tool -a  b")).unwrap();
        assert_eq!(cmd.program(), dir.path().join("tool"));
        assert_eq!(cmd.args, vec!["-a", "b"]);
    }
}
