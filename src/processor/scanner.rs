//! Pulls the input one byte at a time.

use std::io::{BufRead, Bytes, Read};

use super::error::PreprocessError;

pub struct Scanner<R> {
    bytes: Bytes<R>,
    consumed: usize,
    finished: bool,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(input: R) -> Self {
        Self {
            bytes: input.bytes(),
            consumed: 0,
            finished: false,
        }
    }

    /// Next input byte, or `None` at end of input. Keeps returning `None`
    /// once the end has been seen.
    pub fn next_byte(&mut self) -> Result<Option<u8>, PreprocessError> {
        if self.finished {
            return Ok(None);
        }
        match self.bytes.next().transpose()? {
            Some(byte) => {
                self.consumed += 1;
                Ok(Some(byte))
            }
            None => {
                self.finished = true;
                Ok(None)
            }
        }
    }

    /// Number of bytes pulled so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::Scanner;

    #[test]
    fn test_end_is_sticky() {
        let mut scanner = Scanner::new(&b"ab"[..]);
        assert_eq!(scanner.next_byte().unwrap(), Some(b'a'));
        assert_eq!(scanner.next_byte().unwrap(), Some(b'b'));
        assert_eq!(scanner.next_byte().unwrap(), None);
        assert_eq!(scanner.next_byte().unwrap(), None);
        assert_eq!(scanner.consumed(), 2);
    }

    #[test]
    fn test_empty_input() {
        let mut scanner = Scanner::new(&b""[..]);
        assert_eq!(scanner.next_byte().unwrap(), None);
        assert_eq!(scanner.consumed(), 0);
    }
}
