//! Line-oriented terminal input and output.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Input/output pair used by every command.
///
/// Commands never touch stdin/stdout directly, so tests can drive them with
/// in-memory buffers.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console over the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Write a non-fatal notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn notice(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "! {text}")
    }

    /// Prompt for one line of input, without the trailing newline.
    ///
    /// End of input yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn ask(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }

    /// Ask a yes/no question; anything but `y`/`yes` means no.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{question} [y/N]"))?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    /// Consume the console, returning the output sink.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_strips_newline() {
        let mut c = console("Acme Corp\r\nnext\n");
        assert_eq!(c.ask("Customer").unwrap(), "Acme Corp");
        assert_eq!(c.ask("Product").unwrap(), "next");
        assert_eq!(c.ask("Quantity").unwrap(), "");
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out, "Customer: Product: Quantity: ");
    }

    #[test]
    fn test_confirm() {
        let mut c = console("y\nYES\nn\n\n");
        assert!(c.confirm("Delete?").unwrap());
        assert!(c.confirm("Delete?").unwrap());
        assert!(!c.confirm("Delete?").unwrap());
        assert!(!c.confirm("Delete?").unwrap());
        assert!(!c.confirm("Delete?").unwrap());
    }

    #[test]
    fn test_notice_prefix() {
        let mut c = console("");
        c.notice("could not save").unwrap();
        assert_eq!(String::from_utf8(c.into_output()).unwrap(), "! could not save\n");
    }
}
