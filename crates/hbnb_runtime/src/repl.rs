//! The interactive read-eval-print loop.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use hbnb_foundation::{Error, ErrorContext, ErrorKind, Result};
use tracing::{debug, info};

use crate::console::{Console, Response};
use crate::editor::{LineEditor, ReadResult, RustylineEditor};

/// Primary prompt.
pub const PROMPT: &str = "(hbnb) ";

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The command interpreter.
    console: Console,

    /// Whether to show the welcome banner.
    show_banner: bool,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(console: Console) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, console))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E, console: Console) -> Self {
        Self {
            editor,
            console,
            show_banner: true,
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns the console.
    #[must_use]
    pub const fn console(&self) -> &Console {
        &self.console
    }

    /// Runs the REPL loop until `quit`, `EOF`, or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while self.read_eval_print()? {}

        debug!("session ended");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let input = match self.editor.read_line(PROMPT)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);

        let response = self.console.respond(&input);
        print_response(&response);
        Ok(!response.exit)
    }

    /// Runs every line of a script file as a command.
    ///
    /// Returns `Ok(false)` if the script ended the session with `quit` or
    /// `EOF`. Command errors are printed and do not stop the script.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn run_file(&mut self, path: &Path) -> Result<bool> {
        let source = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::IoError(format!(
                "failed to read {}: {e}",
                path.display()
            )))
            .with_context(ErrorContext::new().with_source(path.display().to_string()))
        })?;
        info!(path = %path.display(), "running script");

        for line in source.lines() {
            let response = self.console.respond(line);
            print_response(&response);
            if response.exit {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("Welcome to the hbnb console v{}", env!("CARGO_PKG_VERSION"));
        println!("Type \"help\" to list commands. Use quit or Ctrl+D to exit.\n");

        // Flush to ensure banner appears
        let _ = io::stdout().flush();
    }
}

fn print_response(response: &Response) {
    for line in &response.lines {
        println!("{line}");
    }
}
