use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::runtime::Error;

/// Line-based question and answer over any reader/writer pair.
/// The binary uses stdin/stdout; tests feed it in-memory buffers
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Print the question and read one line. None on end of input
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("Failed to read answer")?;
        if n == 0 {
            //Keep the terminal tidy when stdin is closed
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Use the preset answer if there is one, otherwise ask. Blank answers are an error
    pub fn ask_required(&mut self, preset: Option<&str>, question: &str, what: &str) -> Result<String> {
        let answer = match preset {
            Some(p) => Some(p.trim().to_string()),
            None => self.ask(question)?,
        };
        match answer {
            Some(a) if !a.is_empty() => Ok(a),
            _ => Err(Error::empty_input(what).into()),
        }
    }

    /// Only y or Y counts as yes
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(question)?;
        Ok(matches!(answer.as_deref(), Some(a) if a.eq_ignore_ascii_case("y")))
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
