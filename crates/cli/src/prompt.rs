//! Line-oriented prompting over any reader/writer pair.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_inventory::PersistenceError;

/// Failure of a single menu action.
///
/// Everything except `EndOfInput` and `Io` is reported to the user and the
/// menu carries on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid input format")]
    InvalidInput,

    #[error("Invalid choice")]
    InvalidChoice,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("end of input")]
    EndOfInput,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Reader/writer pair with prompt helpers.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> CommandResult<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Print `label` and read one trimmed line.
    pub fn ask(&mut self, label: &str) -> CommandResult<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CommandError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Read a value, mapping parse failures to `InvalidInput`.
    pub fn ask_parsed<T: FromStr>(&mut self, label: &str) -> CommandResult<T> {
        let raw = self.ask(label)?;
        raw.parse().map_err(|_| CommandError::InvalidInput)
    }
}
