use crate::utils::error::{BikeshareError, Result};
use crate::utils::validation::parse_yes_no;
use std::io::{BufRead, Write};

/// Line-oriented prompt/answer channel over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Prints `prompt` and returns the next input line without its line
    /// ending. Fails with [`BikeshareError::InputClosed`] at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BikeshareError::InputClosed);
        }
        tracing::debug!("Answer to prompt: {:?}", line.trim_end());
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Re-asks `prompt` until `parse` accepts the answer, printing `retry`
    /// after each rejected one.
    pub fn ask_until<T, E>(
        &mut self,
        prompt: &str,
        retry: &str,
        parse: impl Fn(&str) -> std::result::Result<T, E>,
    ) -> Result<T> {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(_) => self.say(retry)?,
            }
        }
    }

    pub fn confirm(&mut self, prompt: &str, retry: &str) -> Result<bool> {
        self.ask_until(prompt, retry, |answer| parse_yes_no(answer).ok_or(()))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
