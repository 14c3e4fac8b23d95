use std::io::{self, BufRead, Stdout, Write};

/// Line-oriented prompt over any reader/writer pair.
///
/// The shell, the interactive form and the delete confirmation all share one
/// instance so they read from the same input stream.
pub struct Terminal<R, W> {
  input: R,
  output: W,
}

pub fn stdio() -> Terminal<io::StdinLock<'static>, Stdout> {
  Terminal::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> Terminal<R, W> {
  pub fn new(input: R, output: W) -> Self {
    Self { input, output }
  }

  #[cfg(test)]
  pub fn into_output(self) -> W {
    self.output
  }

  pub fn print(&mut self, text: &str) -> io::Result<()> {
    self.output.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
      self.output.write_all(b"\n")?;
    }
    self.output.flush()
  }

  /// Next line without its terminator, or `None` at end of input.
  pub fn read_line(&mut self) -> io::Result<Option<String>> {
    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
  }

  pub fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
    write!(self.output, "{prompt}")?;
    self.output.flush()?;
    self.read_line()
  }

  /// Asks for a field, showing the current value. A blank answer keeps it.
  pub fn ask(&mut self, label: &str, current: &str) -> io::Result<Option<String>> {
    let prompt = if current.is_empty() { format!("{label}: ") } else { format!("{label} [{current}]: ") };
    Ok(self.prompt(&prompt)?.map(|answer| if answer.trim().is_empty() { current.to_string() } else { answer }))
  }

  /// Yes/no question defaulting to no. End of input counts as no.
  pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
    let answer = self.prompt(&format!("{question} [s/N]: "))?;
    Ok(matches!(
      answer.as_deref().map(|a| a.trim().to_lowercase()).as_deref(),
      Some("s" | "si" | "sí" | "y" | "yes")
    ))
  }
}
