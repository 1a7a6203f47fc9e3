//! Interpreter for the commands introduced by the escape byte.
//
//  Command language:
//
//      @@              literal '@'
//      @!name sep      record current output position under `name`
//      @?name sep      emit recorded position of `name` in decimal
//
//      name ::= [A-Za-z0-9_]*
//      sep  ::= byte<=' '* '@'?

use std::io::{BufRead, Write};

use log::{debug, trace};

use super::ESCAPE;
use super::emitter::Emitter;
use super::error::PreprocessError;
use super::scanner::Scanner;
use crate::model::VarTable;

/// A command after its bytes have been read, before it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `@@`
    Escape,
    /// `@!name`
    Record(String),
    /// `@?name`
    Resolve(String),
}

/// Byte that follows a command, handed back to the driver loop.
pub type Next = Option<u8>;

/// Runs the command whose `@` the driver has just read and returns the
/// byte the driver continues with.
pub fn interpret<R: BufRead, W: Write>(
    scanner: &mut Scanner<R>,
    emitter: &mut Emitter<W>,
    vars: &mut VarTable,
) -> Result<Next, PreprocessError> {
    let (cmd, next) = read_command(scanner)?;
    execute(cmd, emitter, vars)?;
    Ok(next)
}

/// Reads the bytes of one command, starting right after the escape byte.
pub fn read_command<R: BufRead>(
    scanner: &mut Scanner<R>,
) -> Result<(Command, Next), PreprocessError> {
    match scanner.next_byte()? {
        None => Err(PreprocessError::UnterminatedCommand),
        Some(ESCAPE) => Ok((Command::Escape, scanner.next_byte()?)),
        Some(b'!') => {
            let (name, next) = read_name(scanner)?;
            Ok((Command::Record(name), next))
        }
        Some(b'?') => {
            let (name, next) = read_name(scanner)?;
            Ok((Command::Resolve(name), next))
        }
        Some(other) => Err(PreprocessError::UnknownCommand(other)),
    }
}

pub fn execute<W: Write>(
    cmd: Command,
    emitter: &mut Emitter<W>,
    vars: &mut VarTable,
) -> Result<(), PreprocessError> {
    match cmd {
        Command::Escape => {
            trace!("escaped '@' at {}", emitter.position());
            emitter.emit(ESCAPE)
        }
        Command::Record(name) => {
            let pos = emitter.position();
            debug!("record {name:?} = {pos}");
            if let Some(old) = vars.define(name, pos) {
                trace!("replaced previous value {old}");
            }
            Ok(())
        }
        Command::Resolve(name) => {
            let value = vars
                .lookup(&name)
                .ok_or_else(|| PreprocessError::UndefinedVariable(name.clone()))?;
            debug!("resolve {name:?} -> {value}");
            emitter.write_decimal(value)
        }
    }
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Reads a name and the separator after it. Returns the name and the
/// first byte past the separator.
fn read_name<R: BufRead>(scanner: &mut Scanner<R>) -> Result<(String, Next), PreprocessError> {
    let mut name = String::new();
    let mut next = scanner.next_byte()?;
    while let Some(byte) = next.filter(|&b| is_name_byte(b)) {
        name.push(char::from(byte));
        next = scanner.next_byte()?;
    }

    while next.is_some_and(|b| b <= b' ') {
        next = scanner.next_byte()?;
    }
    if next == Some(ESCAPE) {
        next = scanner.next_byte()?;
    }

    Ok((name, next))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(src: &[u8]) -> Result<(Command, Next), PreprocessError> {
        let mut scanner = Scanner::new(src);
        read_command(&mut scanner)
    }

    #[test]
    fn test_read_commands() {
        let test_cases: Vec<(&[u8], Command, Next)> = vec![
            (&b"@x"[..], Command::Escape, Some(b'x')),
            (&b"@"[..], Command::Escape, None),
            (&b"!start rest"[..], Command::Record("start".into()), Some(b'r')),
            (&b"?end_2\n\t."[..], Command::Resolve("end_2".into()), Some(b'.')),
            (&b"!a@?b"[..], Command::Record("a".into()), Some(b'?')),
            (&b"!a  @!b"[..], Command::Record("a".into()), Some(b'!')),
            (&b"?a"[..], Command::Resolve("a".into()), None),
            (&b"!a   "[..], Command::Record("a".into()), None),
            (&b"!-x"[..], Command::Record(String::new()), Some(b'-')),
        ];

        for (src, cmd, next) in test_cases {
            assert_eq!(read(src).unwrap(), (cmd, next), "input {:?}", src.escape_ascii());
        }
    }

    #[test]
    fn test_only_one_escape_is_absorbed() {
        let mut scanner = Scanner::new(&b"!a @@b"[..]);
        let (cmd, next) = read_command(&mut scanner).unwrap();
        assert_eq!(cmd, Command::Record("a".into()));
        assert_eq!(next, Some(b'@'));
        assert_eq!(scanner.next_byte().unwrap(), Some(b'b'));
    }

    #[test]
    fn test_bad_commands() {
        assert!(matches!(read(b""), Err(PreprocessError::UnterminatedCommand)));
        assert!(matches!(
            read(b"#x"),
            Err(PreprocessError::UnknownCommand(b'#'))
        ));
    }

    #[test]
    fn test_execute_record_and_resolve() {
        let mut emitter = Emitter::starting_at(Vec::new(), 42);
        let mut vars = VarTable::new();

        execute(Command::Record("here".into()), &mut emitter, &mut vars).unwrap();
        assert_eq!(vars.lookup("here"), Some(42));
        assert_eq!(emitter.position(), 42);

        execute(Command::Resolve("here".into()), &mut emitter, &mut vars).unwrap();
        assert_eq!(emitter.position(), 44);
        assert_eq!(emitter.into_inner(), b"42");
    }

    #[test]
    fn test_execute_undefined() {
        let mut emitter = Emitter::new(Vec::new());
        let mut vars = VarTable::new();
        let err = execute(Command::Resolve("nope".into()), &mut emitter, &mut vars).unwrap_err();
        assert!(matches!(err, PreprocessError::UndefinedVariable(ref n) if n == "nope"));
        assert!(emitter.into_inner().is_empty());
    }
}
