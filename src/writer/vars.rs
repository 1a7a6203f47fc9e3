//! Dump the final variable table as JSON.

use crate::model::VarTable;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn emit(vars: &VarTable, path: &Path) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write(vars, &mut out)?;
    out.flush()
}

/// `{ "name": position, ... }`, sorted by name, with a trailing newline.
pub fn write<W: Write>(vars: &VarTable, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, vars)?;
    writeln!(out)
}
