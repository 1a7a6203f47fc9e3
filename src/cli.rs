use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input file (stdin if omitted or `-`)
    pub input: Option<PathBuf>,
    /// Output file (stdout if omitted or `-`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Write the recorded variables as JSON after a successful run
    #[arg(long = "dump-vars", value_name = "PATH")]
    pub dump_vars: Option<PathBuf>,
    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Input path, `None` meaning stdin.
    pub fn input_path(&self) -> Option<&Path> {
        stream_path(self.input.as_deref())
    }

    /// Output path, `None` meaning stdout.
    pub fn output_path(&self) -> Option<&Path> {
        stream_path(self.output.as_deref())
    }

    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn stream_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != "-")
}
