//! The single pass over the input.
//!
//! Ordinary bytes are copied through the [`Emitter`]; the escape byte hands
//! control to the [`command`] interpreter, which returns the byte to
//! continue with.
pub mod command;
pub mod emitter;
pub mod error;
pub mod scanner;

pub use emitter::Emitter;
pub use error::PreprocessError;
pub use scanner::Scanner;

use std::io::{BufRead, Write};

use crate::model::{Outcome, VarTable};

/// Byte that introduces a command.
pub const ESCAPE: u8 = b'@';

/// Copies `input` to `output`, running embedded commands.
///
/// Output is flushed even when the run fails, so everything emitted before
/// the fault is kept.
pub fn run_stream<R: BufRead, W: Write>(input: R, output: W) -> Result<Outcome, PreprocessError> {
    let mut scanner = Scanner::new(input);
    let mut emitter = Emitter::new(output);
    let mut vars = VarTable::new();

    let driven = drive(&mut scanner, &mut emitter, &mut vars);
    let flushed = emitter.flush();
    driven?;
    flushed?;

    Ok(Outcome {
        bytes_read: scanner.consumed(),
        bytes_written: emitter.position(),
        vars,
    })
}

/// Driver loop: runs until end of input or the first fatal error.
pub fn drive<R: BufRead, W: Write>(
    scanner: &mut Scanner<R>,
    emitter: &mut Emitter<W>,
    vars: &mut VarTable,
) -> Result<(), PreprocessError> {
    let mut current = scanner.next_byte()?;
    while let Some(byte) = current {
        if byte == ESCAPE {
            current = command::interpret(scanner, emitter, vars)?;
        } else {
            emitter.emit(byte)?;
            current = scanner.next_byte()?;
        }
    }
    Ok(())
}

/// In-memory convenience around [`run_stream`].
pub fn preprocess(input: &[u8]) -> Result<Vec<u8>, PreprocessError> {
    let mut out = Vec::with_capacity(input.len());
    run_stream(input, &mut out)?;
    Ok(out)
}
