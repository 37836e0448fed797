use crate::error::InputError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};

/// Where command lines come from.
///
/// Implementors show `prompt`, block until one line is available and return
/// it without its line terminator. Running out of input is an error.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError>;
}

/// Line-buffered reader, for piped input or when line editing is disabled.
///
/// The prompt is written to `output` and flushed before every read.
pub struct PlainLines<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PlainLines<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PlainLines<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Read from the process standard input, prompt on standard output.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> LineSource for PlainLines<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        // A last line cut off by end of input is not a command.
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        if !line.ends_with('\n') {
            return Err(InputError::Eof);
        }
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        Ok(line)
    }
}

/// Interactive line editor with in-memory history, for terminals.
pub struct EditorLines {
    editor: DefaultEditor,
}

impl EditorLines {
    pub fn new() -> Result<Self, InputError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorLines {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(line)
            }
            // Ctrl-C drops the line being typed and shows a fresh prompt.
            Err(ReadlineError::Interrupted) => Ok(String::new()),
            Err(ReadlineError::Eof) => Err(InputError::Eof),
            Err(err) => Err(err.into()),
        }
    }
}
