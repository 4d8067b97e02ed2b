//! Shared logging setup for Rowscope binaries.
//!
//! Logs go to a size-rotated file under `$ROWSCOPE_HOME/logs` and to
//! stderr. stdout is left alone so `--json` output stays parseable.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "rowscope=info,rowscope_core=info";
const MAX_LOG_FILES: usize = 3;
const MAX_LOG_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Logging options for one binary.
pub struct LogConfig<'a> {
    /// Base name of the log file
    pub app_name: &'a str,
    /// Mirror the file filter on stderr instead of only warnings
    pub verbose: bool,
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter for both outputs.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let log_dir = ensure_logs_dir().context("Failed to ensure log directory")?;
    let file_writer = SharedRotatingWriter::new(&log_dir, config.app_name)
        .context("Failed to initialize log file writer")?;

    let file_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let console_filter = if config.verbose {
        file_filter.clone()
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_filter(console_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Rowscope home directory.
///
/// Priority:
/// 1) ROWSCOPE_HOME
/// 2) ~/.rowscope
/// 3) ./.rowscope
pub fn rowscope_home() -> PathBuf {
    if let Ok(override_path) = std::env::var("ROWSCOPE_HOME") {
        return PathBuf::from(override_path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rowscope")
}

/// Logs directory: ~/.rowscope/logs
pub fn logs_dir() -> PathBuf {
    rowscope_home().join("logs")
}

pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir();
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

/// Append-only log file that rolls over to `<name>.log.1..n` once it grows
/// past `max_size`.
struct RotatingFile {
    dir: PathBuf,
    base_name: String,
    max_files: usize,
    max_size: u64,
    file: Option<File>,
    size: u64,
}

impl RotatingFile {
    fn open(dir: &Path, base_name: &str, max_files: usize, max_size: u64) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let mut rotating = Self {
            dir: dir.to_path_buf(),
            base_name: sanitize_name(base_name),
            max_files: max_files.max(1),
            max_size,
            file: None,
            size: 0,
        };
        rotating.reopen()?;
        if rotating.size > rotating.max_size {
            rotating.roll()?;
        }
        Ok(rotating)
    }

    fn path(&self, generation: usize) -> PathBuf {
        if generation == 0 {
            self.dir.join(format!("{}.log", self.base_name))
        } else {
            self.dir.join(format!("{}.log.{}", self.base_name, generation))
        }
    }

    fn reopen(&mut self) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(0))?;
        self.size = file.metadata()?.len();
        self.file = Some(file);
        Ok(())
    }

    fn roll(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            let _ = file.flush();
        }

        let oldest = self.max_files - 1;
        if oldest > 0 {
            let last = self.path(oldest);
            if last.exists() {
                fs::remove_file(&last)?;
            }
            for generation in (0..oldest).rev() {
                let src = self.path(generation);
                if src.exists() {
                    fs::rename(&src, self.path(generation + 1))?;
                }
            }
        }

        self.reopen()
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.size + buf.len() as u64 > self.max_size {
            self.roll()?;
        }
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file unavailable"))?;
        let written = file.write(buf)?;
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

#[derive(Clone)]
struct SharedRotatingWriter {
    inner: Arc<Mutex<RotatingFile>>,
}

impl SharedRotatingWriter {
    fn new(dir: &Path, base_name: &str) -> Result<Self> {
        let file = RotatingFile::open(dir, base_name, MAX_LOG_FILES, MAX_LOG_FILE_SIZE)
            .with_context(|| format!("Failed to open log file for {}", base_name))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(file)),
        })
    }

    fn with_file<T>(&self, op: impl FnOnce(&mut RotatingFile) -> io::Result<T>) -> io::Result<T> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer lock poisoned"))?;
        op(&mut guard)
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedRotatingWriter {
    type Writer = SharedRotatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Write for SharedRotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}
