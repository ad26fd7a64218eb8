use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line reader with prompting, generic so tests can script the session
pub struct Input<R> {
    lines: Lines<R>,
}

impl Input<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Input<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Print `label` and read one trimmed line. `None` at end of input.
    pub async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        print!("{label}");
        io::stdout().flush()?;
        let line = self.lines.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    /// Only `y` or `yes` confirms; anything else, including end of input, declines
    pub async fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.prompt(&format!("{question} (y/N) ")).await?;
        Ok(matches!(
            answer.map(|a| a.to_lowercase()).as_deref(),
            Some("y" | "yes")
        ))
    }
}
