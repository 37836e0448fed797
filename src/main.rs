use argh::FromArgs;
use minish::error::InputError;
use minish::io_adapters::{EditorLines, LineSource, PlainLines};
use minish::{DEFAULT_PROMPT, Interpreter};
use std::io::{IsTerminal, Write};
use std::process;

#[derive(FromArgs)]
/// A minimal interactive shell with a handful of builtins.
struct Args {
    #[argh(option, default = "DEFAULT_PROMPT.to_string()")]
    /// prompt printed before each command line.
    prompt: String,

    #[argh(switch)]
    /// read plain lines from standard input even on a terminal.
    plain: bool,
}

fn line_source(plain: bool) -> Box<dyn LineSource> {
    if !plain && std::io::stdin().is_terminal() {
        match EditorLines::new() {
            Ok(editor) => return Box::new(editor),
            Err(e) => log::warn!("line editor unavailable, using plain input: {e}"),
        }
    }
    Box::new(PlainLines::stdio())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = argh::from_env();

    let mut sh = Interpreter::default();
    sh.set_prompt(args.prompt);
    let mut input = line_source(args.plain);
    let mut stdout = std::io::stdout();

    let code = match sh.repl(input.as_mut(), &mut stdout) {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<InputError>() {
                Some(err) => println!("Error reading command:  {err}"),
                None => println!("Error: {e:#}"),
            }
            let _ = stdout.flush();
            1
        }
    };
    log::debug!("exiting with status {code}");
    process::exit(code);
}
