use std::fs::{self, File};
use std::io::{self, BufWriter, IsTerminal, StdoutLock, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

pub enum OutputTarget {
    File(BufWriter<File>),
    Stdout(BufWriter<StdoutLock<'static>>),
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::File(w) => w.write(buf),
            OutputTarget::Stdout(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::File(w) => w.flush(),
            OutputTarget::Stdout(w) => w.flush(),
        }
    }
}

pub fn create_output(path: Option<&Path>) -> Result<OutputTarget> {
    match path {
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("Failed to create output file: {}", p.display()))?;
            Ok(OutputTarget::File(BufWriter::new(file)))
        }
        None => Ok(OutputTarget::Stdout(BufWriter::new(io::stdout().lock()))),
    }
}

/// Reads a custom oxidation-state catalog into memory.
pub fn read_catalog(path: Option<&Path>) -> Result<Option<String>> {
    path.map(|p| {
        fs::read_to_string(p)
            .with_context(|| format!("Failed to read catalog file: {}", p.display()))
    })
    .transpose()
}
