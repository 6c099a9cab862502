//! Tracing subscriber setup with an optional, reopenable log file.

use crate::config::{LogConfig, LogOutput};
use anyhow::{anyhow, Context};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Append-only log file that can be reopened in place (after logrotate)
#[derive(Debug, Clone)]
pub struct LogFile {
    path: PathBuf,
    file: Arc<Mutex<File>>,
}

impl LogFile {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_append(&path)?;
        Ok(Self {
            path,
            file: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Swap the handle for a fresh one at the same path
    pub fn reopen(&self) -> io::Result<()> {
        let file = open_append(&self.path)?;
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()?;
        *guard = file;
        Ok(())
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Writer handed out per event; locks the shared handle on each write
pub struct LogFileWriter {
    file: Arc<Mutex<File>>,
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?
            .flush()
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter {
            file: Arc::clone(&self.file),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns the log file when output goes to one,
/// so the caller can reopen it on SIGHUP.
pub fn init(config: &LogConfig) -> anyhow::Result<Option<LogFile>> {
    match config.output {
        LogOutput::Stdout => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .try_init()
                .map_err(|e| anyhow!(e))?;
            Ok(None)
        }
        LogOutput::File => {
            let path = config
                .file_path
                .as_deref()
                .context("log.file_path is not set")?;
            let log_file = LogFile::open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(log_file.clone())
                .try_init()
                .map_err(|e| anyhow!(e))?;
            Ok(Some(log_file))
        }
    }
}
