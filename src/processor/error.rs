//! Fatal conditions of a preprocessing run.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    /// The position counter would wrap.
    #[error("output too long")]
    OutputOverflow,

    /// `@` was the last byte of the input.
    #[error("'@' at end of file")]
    UnterminatedCommand,

    #[error("unknown command '{}' after '@'", .0.escape_ascii())]
    UnknownCommand(u8),

    #[error("var '{0}' used before declaration")]
    UndefinedVariable(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
