use std::{
    io::{BufRead, Write},
    num::NonZeroUsize,
};

use tracing::debug;

use crate::error::{CountError, PromptError};

pub const PROMPT: &str = "Enter the number of keys to generate: ";

/// Validate one line of user input as a key count.
pub fn parse_count(input: &str) -> Result<NonZeroUsize, CountError> {
    let input = input.trim();
    let n: i64 = input
        .parse()
        .map_err(|_| CountError::Invalid(input.to_string()))?;
    usize::try_from(n)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(CountError::NotPositive(n))
}

/// Prompt on `output` until `input` yields a valid count. Bad entries are
/// reported and asked again; only a read failure or end of input stops the loop.
pub fn prompt_for_count<R, W>(mut input: R, mut output: W) -> Result<NonZeroUsize, PromptError>
where
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Err(PromptError::Closed);
        }
        match parse_line(&buf) {
            Ok(count) => return Ok(count),
            Err(err) => {
                debug!(error = ?err, "rejected key count");
                writeln!(output, "{err}")?;
            }
        }
    }
}

// Bytes that are not UTF-8 are bad input like any other, not a broken stream.
fn parse_line(raw: &[u8]) -> Result<NonZeroUsize, CountError> {
    match std::str::from_utf8(raw) {
        Ok(line) => parse_count(line),
        Err(_) => Err(CountError::Invalid(
            String::from_utf8_lossy(raw).trim().to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read};

    use super::*;

    #[test]
    fn parses_positive_counts() {
        assert_eq!(parse_count("3").unwrap().get(), 3);
        assert_eq!(parse_count("  12 \r\n").unwrap().get(), 12);
        assert_eq!(parse_count("+4").unwrap().get(), 4);
    }

    #[test]
    fn rejects_garbage_and_non_positive() {
        assert_eq!(parse_count("abc"), Err(CountError::Invalid("abc".into())));
        assert_eq!(parse_count(""), Err(CountError::Invalid(String::new())));
        assert_eq!(parse_count("1.5"), Err(CountError::Invalid("1.5".into())));
        assert_eq!(parse_count("0"), Err(CountError::NotPositive(0)));
        assert_eq!(parse_count("-3"), Err(CountError::NotPositive(-3)));
    }

    #[test]
    fn loop_survives_bad_entries() {
        let input = Cursor::new("abc\n-3\n0\n\n7\n");
        let mut out = Vec::new();
        let count = prompt_for_count(input, &mut out).unwrap();
        assert_eq!(count.get(), 7);

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches(PROMPT).count(), 5);
        assert_eq!(
            out.matches("Invalid input. Please enter a valid number.").count(),
            2
        );
        assert_eq!(out.matches("Number of keys must be positive.").count(), 2);
    }

    #[test]
    fn last_line_without_newline_is_accepted() {
        let count = prompt_for_count(Cursor::new("2"), Vec::new()).unwrap();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn non_utf8_line_is_rejected_not_fatal() {
        let mut out = Vec::new();
        let count = prompt_for_count(Cursor::new(&b"\xff\xfe\n3\n"[..]), &mut out).unwrap();
        assert_eq!(count.get(), 3);

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches(PROMPT).count(), 2);
        assert!(out.contains("Invalid input. Please enter a valid number."));
    }

    #[test]
    fn unreadable_input_is_fatal() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("stdin went away"))
            }
        }

        impl BufRead for Broken {
            fn fill_buf(&mut self) -> io::Result<&[u8]> {
                Err(io::Error::other("stdin went away"))
            }

            fn consume(&mut self, _amt: usize) {}
        }

        let err = prompt_for_count(Broken, Vec::new()).unwrap_err();
        assert!(matches!(&err, PromptError::Io(e) if e.kind() == io::ErrorKind::Other));
        assert_eq!(err.to_string(), "failed to read input: stdin went away");
    }

    #[test]
    fn end_of_input_is_fatal() {
        let err = prompt_for_count(Cursor::new("x\n"), Vec::new()).unwrap_err();
        assert!(matches!(err, PromptError::Closed));
    }
}
