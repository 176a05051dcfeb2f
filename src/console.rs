use std::io::{stdin, stdout, ErrorKind, Write};

use crate::error::Result;

/// The narrow I/O contract the shell depends on.
///
/// Any console, pipe, or test harness that can show a string and block for
/// one line of input is interchangeable here.
pub trait Console {
    fn display(&mut self, text: &str) -> Result<()>;

    /// Blocks until one line of input is available and returns it with the
    /// line terminator stripped.
    fn read_line(&mut self) -> Result<String>;
}

/// Console backed by the process's stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn display(&mut self, text: &str) -> Result<()> {
        let mut stdout = stdout();
        stdout.write_all(text.as_bytes())?;
        // Prompt text has no trailing newline, so flush explicitly.
        stdout.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let bytes_read = stdin().read_line(&mut line)?;
        if bytes_read == 0 {
            return Err(std::io::Error::new(ErrorKind::UnexpectedEof, "end of input").into());
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        Ok(line)
    }
}
