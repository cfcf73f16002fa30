//! Human-readable run log.
//!
//! One log per run, opened at start and flushed when the sweep finishes.
//! Every line is stamped with local time:
//!
//! ```text
//! 2026-10-17_14:03:11 -- New min error found 1.2e-5 for Ct_=_3.0/At_=_1.0/Css_=_0.5/a2_=_0.4
//! ```

use std::fs::{File, create_dir_all};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Timestamp format for log lines and the log filename.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";

pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub struct RunLog<W: Write> {
    out: W,
    path: Option<PathBuf>,
}

impl RunLog<BufWriter<File>> {
    /// Create `log<timestamp>.txt` inside `dir` and write the start line.
    pub fn create_in(dir: &Path) -> io::Result<Self> {
        create_dir_all(dir)?;
        let path = dir.join(format!("log{}.txt", timestamp()));
        let file = File::create(&path)?;
        let mut log = Self {
            out: BufWriter::new(file),
            path: Some(path),
        };
        log.line("Log start")?;
        Ok(log)
    }
}

impl<W: Write> RunLog<W> {
    /// Log into an arbitrary writer (tests, `--no-log` via `io::sink()`).
    pub fn from_writer(out: W) -> io::Result<Self> {
        let mut log = Self { out, path: None };
        log.line("Log start")?;
        Ok(log)
    }

    /// File backing this log, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn line(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.out, "{} -- {}", timestamp(), message.as_ref())
    }

    /// Flush and hand back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
