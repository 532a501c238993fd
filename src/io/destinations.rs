//! Where a rendered report goes.
//!
//! Commands render a report to a string and hand it to an
//! [`OutputDestination`]: stdout by default, a file with `--output`, or an
//! in-memory buffer in tests.
//!
//! # Example
//!
//! ```rust
//! use bowtie::io::destinations::{MemoryDestination, OutputDestination};
//!
//! let dest = MemoryDestination::new();
//! dest.write_str("MRR (Left): $87.89\n").unwrap();
//! assert!(dest.get_content().contains("$87.89"));
//! ```

use crate::core::errors::Error;
use std::cell::RefCell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Trait for targets that receive a rendered report.
pub trait OutputDestination {
    /// Write string content to the destination.
    fn write_str(&self, content: &str) -> Result<(), Error>;

    /// Get a description of the destination for log messages.
    fn description(&self) -> String;
}

/// File system output destination.
///
/// Parent directories are created on first write.
#[derive(Debug, Clone)]
pub struct FileDestination {
    path: PathBuf,
}

impl FileDestination {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputDestination for FileDestination {
    fn write_str(&self, content: &str) -> Result<(), Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            super::ensure_dir(parent)?;
        }
        std::fs::write(&self.path, content).map_err(|e| Error::file_system_io(&self.path, e))
    }

    fn description(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// In-memory output destination for testing.
#[derive(Debug, Default)]
pub struct MemoryDestination {
    buffer: RefCell<String>,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_content(&self) -> String {
        self.buffer.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.borrow().is_empty()
    }
}

impl OutputDestination for MemoryDestination {
    fn write_str(&self, content: &str) -> Result<(), Error> {
        self.buffer.borrow_mut().push_str(content);
        Ok(())
    }

    fn description(&self) -> String {
        "memory".to_string()
    }
}

/// Standard output destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutDestination;

impl StdoutDestination {
    pub fn new() -> Self {
        Self
    }
}

impl OutputDestination for StdoutDestination {
    fn write_str(&self, content: &str) -> Result<(), Error> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(content.as_bytes())?;
        handle.flush()?;
        Ok(())
    }

    fn description(&self) -> String {
        "stdout".to_string()
    }
}

/// Destination for an optional `--output` path.
pub fn destination_for(output: Option<&Path>) -> Box<dyn OutputDestination> {
    match output {
        Some(path) => Box::new(FileDestination::new(path.to_path_buf())),
        None => Box::new(StdoutDestination::new()),
    }
}
