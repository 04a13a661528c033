//! Line-based interactive query loop

use gamerec_core::{Recommender, Result};
use std::io::{BufRead, Write};

pub const FIRST_PROMPT: &str = "Enter the name of a game that you like (or enter 'q' to quit): ";
pub const NEXT_PROMPT: &str = "Enter the name of another game that you like (or enter 'q' to quit): ";
pub const NOT_FOUND_MESSAGE: &str = "No game could be found in our records, by that name.";
pub const QUIT_COMMAND: &str = "q";

/// Answer a single query, writing titles one per line
pub fn answer<W: Write>(recommender: &Recommender, title: &str, out: &mut W) -> Result<()> {
    match recommender.recommend(title) {
        Ok(results) => {
            for result in results {
                writeln!(out, "{}", result.name)?;
            }
        }
        Err(e) if e.is_recoverable() => writeln!(out, "{}", NOT_FOUND_MESSAGE)?,
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Prompt, read a title, print recommendations; stop on `q` or end of input
///
/// Lines that are not valid UTF-8 are decoded lossily; the replacement
/// characters are dropped by title cleaning like any other non-ASCII text.
pub fn run<R: BufRead, W: Write>(recommender: &Recommender, mut input: R, out: &mut W) -> Result<()> {
    let mut buf = Vec::new();
    let mut prompt = FIRST_PROMPT;
    loop {
        write!(out, "{}", prompt)?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        let title = line.trim_end_matches('\n').trim_end_matches('\r');
        if title == QUIT_COMMAND {
            return Ok(());
        }

        answer(recommender, title, out)?;
        prompt = NEXT_PROMPT;
    }
}
