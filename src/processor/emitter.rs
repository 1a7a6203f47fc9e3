//! Output side of the processor: writes bytes and counts them.

use std::io::Write;

use super::error::PreprocessError;
use crate::model::Position;

pub struct Emitter<W> {
    out: W,
    pos: Position,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W) -> Self {
        Self { out, pos: 0 }
    }

    /// Emitter whose counter starts at `pos` instead of zero.
    #[cfg(test)]
    pub(crate) fn starting_at(out: W, pos: Position) -> Self {
        Self { out, pos }
    }

    /// Current output position.
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Writes one byte. Fails without writing if the counter would wrap.
    pub fn emit(&mut self, byte: u8) -> Result<(), PreprocessError> {
        let next = self
            .pos
            .checked_add(1)
            .ok_or(PreprocessError::OutputOverflow)?;
        self.out.write_all(&[byte])?;
        self.pos = next;
        Ok(())
    }

    /// Writes `value` in decimal, most significant digit first, no padding.
    pub fn write_decimal(&mut self, value: Position) -> Result<(), PreprocessError> {
        let rest = value / 10;
        if rest != 0 {
            self.write_decimal(rest)?;
        }
        self.emit(b'0' + (value % 10) as u8)
    }

    pub fn flush(&mut self) -> Result<(), PreprocessError> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::Emitter;
    use crate::processor::error::PreprocessError;

    fn decimal(value: usize) -> String {
        let mut emitter = Emitter::new(Vec::new());
        emitter.write_decimal(value).unwrap();
        assert_eq!(emitter.position(), value.to_string().len());
        String::from_utf8(emitter.into_inner()).unwrap()
    }

    #[test]
    fn test_decimal_matches_formatting() {
        for value in [0, 7, 10, 205, 1000, 65535, usize::MAX] {
            assert_eq!(decimal(value), value.to_string());
        }
    }

    #[test]
    fn test_emit_counts_bytes() {
        let mut emitter = Emitter::new(Vec::new());
        for &b in b"abc" {
            emitter.emit(b).unwrap();
        }
        assert_eq!(emitter.position(), 3);
        assert_eq!(emitter.into_inner(), b"abc");
    }

    #[test]
    fn test_overflow_is_checked_on_every_byte() {
        let mut emitter = Emitter::starting_at(Vec::new(), usize::MAX - 1);
        emitter.emit(b'a').unwrap();
        assert_eq!(emitter.position(), usize::MAX);

        let err = emitter.emit(b'b').unwrap_err();
        assert!(matches!(err, PreprocessError::OutputOverflow));
        assert_eq!(emitter.position(), usize::MAX);
        assert_eq!(emitter.into_inner(), b"a");
    }
}
