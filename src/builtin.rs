use crate::command::{BuiltinCommand, Context, Flow};
use crate::error::BuiltinError;
use crate::external::search_paths;
use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// The single table of builtins, in dispatch priority order.
///
/// Both dispatch and `type` go through this registry, so a newly registered
/// builtin is immediately reported as one.
pub struct Registry {
    commands: Vec<Box<dyn BuiltinCommand>>,
}

impl Registry {
    /// An empty registry, see [`Default`] for the standard set.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a builtin. A later registration under an existing name replaces it.
    pub fn register(&mut self, cmd: Box<dyn BuiltinCommand>) {
        match self.commands.iter_mut().find(|c| c.name() == cmd.name()) {
            Some(slot) => *slot = cmd,
            None => self.commands.push(cmd),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn BuiltinCommand> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .map(|c| &**c)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name())
    }
}

impl Default for Registry {
    /// echo, type, exit, pwd and cd.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Echo));
        registry.register(Box::new(Type));
        registry.register(Box::new(Exit));
        registry.register(Box::new(Pwd));
        registry.register(Box::new(Cd));
        registry
    }
}

/// Run a builtin, turning its failure into a line of output.
pub(crate) fn run(cmd: &dyn BuiltinCommand, args: &[String], ctx: &mut Context<'_>) -> Result<Flow> {
    match cmd.execute(args, ctx) {
        Ok(flow) => Ok(flow),
        Err(e) => {
            log::debug!("builtin {} failed: {e:?}", cmd.name());
            writeln!(ctx.stdout, "{e}")?;
            Ok(Flow::Continue)
        }
    }
}

/// Write the arguments to standard output, separated by single spaces.
pub struct Echo;

impl BuiltinCommand for Echo {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow> {
        writeln!(ctx.stdout, "{}", args.join(" "))?;
        Ok(Flow::Continue)
    }
}

/// Tell whether a name is a builtin, a program on `PATH`, or unknown.
pub struct Type;

impl BuiltinCommand for Type {
    fn name(&self) -> &'static str {
        "type"
    }

    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow> {
        let Some(name) = args.first() else {
            return Ok(Flow::Continue);
        };

        if ctx.builtins.contains(name) {
            writeln!(ctx.stdout, "{name} is a shell builtin")?;
        } else if let Some(path) = search_paths(&ctx.env.search_path_dirs(), name) {
            writeln!(ctx.stdout, "{name} is {}", path.display())?;
        } else {
            writeln!(ctx.stdout, "{name}: not found")?;
        }
        Ok(Flow::Continue)
    }
}

/// Leave the shell with status 0. Arguments are ignored.
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn execute(&self, _args: &[String], _ctx: &mut Context<'_>) -> Result<Flow> {
        Ok(Flow::Exit(0))
    }
}

/// Print the current working directory.
pub struct Pwd;

impl BuiltinCommand for Pwd {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn execute(&self, _args: &[String], ctx: &mut Context<'_>) -> Result<Flow> {
        // The directory may have been removed from under the session.
        fs::metadata(&ctx.env.current_dir).map_err(BuiltinError::CurrentDirUnavailable)?;
        writeln!(ctx.stdout, "{}", ctx.env.current_dir.display())?;
        Ok(Flow::Continue)
    }
}

/// Change the session working directory. `~` stands for the home directory.
pub struct Cd;

impl BuiltinCommand for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow> {
        let Some(target) = args.first() else {
            return Ok(Flow::Continue);
        };

        let path = if target == "~" {
            ctx.env.home_dir().ok_or(BuiltinError::HomeDirUnavailable)?
        } else {
            PathBuf::from(target)
        };

        // Statting `dir/.` needs search permission on `dir`, as chdir does.
        let new_dir = fs::canonicalize(ctx.env.resolve(&path))
            .ok()
            .filter(|dir| dir.is_dir() && fs::metadata(dir.join(".")).is_ok())
            .ok_or_else(|| BuiltinError::NoSuchDirectory(path.display().to_string()))?;

        log::debug!("cd {} -> {}", path.display(), new_dir.display());
        ctx.env.current_dir = new_dir;
        Ok(Flow::Continue)
    }
}
