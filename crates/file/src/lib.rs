//! File source abstraction for reading from the local filesystem or HDFS
//!
//! This crate classifies file locations by backend and opens them as plain
//! blocking byte streams that a record parser can consume.
//!
//! # Source Types
//!
//! - **Local**: Files on the local filesystem (anything that is not an HDFS URI)
//! - **Hdfs**: Files on HDFS, addressed as `hdfs://namenode:port/path`, read through WebHDFS
//!
//! # Example
//!
//! ```ignore
//! use csv_import_file::{FileSource, SourceOpener, StorageOpener, HdfsConfig, DEFAULT_BUFFER_SIZE};
//!
//! let opener = StorageOpener::new(HdfsConfig::default(), DEFAULT_BUFFER_SIZE)?;
//! let source = FileSource::parse(" hdfs://namenode:8020/data/part-0.csv ");
//! let reader = opener.open(&source)?;
//! // Hand the reader to a csv::Reader...
//! ```

mod hdfs;
mod local;

use anyhow::Result;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;

pub use hdfs::{HdfsConfig, HdfsFileReader, DEFAULT_WEBHDFS_PORT};
pub use local::LocalFileReader;

/// Default buffer size for reading operations (1MB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// URI scheme prefix that routes a location to HDFS
pub const HDFS_SCHEME_PREFIX: &str = "hdfs://";

/// Backend a file location resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Local,
    Hdfs,
}

/// Unified source type representing a single file location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Local filesystem path
    Local(PathBuf),
    /// HDFS URI, kept verbatim (e.g. `hdfs://namenode:8020/data/file.csv`)
    Hdfs(String),
}

impl FileSource {
    /// Classify a location string by backend.
    ///
    /// The location is trimmed first. Anything starting with `hdfs://` is HDFS,
    /// everything else (including the empty string) is a local path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        match classify(location) {
            Backend::Hdfs => FileSource::Hdfs(location.to_string()),
            Backend::Local => FileSource::Local(PathBuf::from(location)),
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            FileSource::Local(_) => Backend::Local,
            FileSource::Hdfs(_) => Backend::Hdfs,
        }
    }

    /// Get a display name for logging
    pub fn display_name(&self) -> String {
        match self {
            FileSource::Local(path) => path.display().to_string(),
            FileSource::Hdfs(uri) => uri.clone(),
        }
    }
}

impl fmt::Display for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Prefix-only backend classification. No trimming, no I/O.
pub fn classify(location: &str) -> Backend {
    if location.starts_with(HDFS_SCHEME_PREFIX) {
        Backend::Hdfs
    } else {
        Backend::Local
    }
}

/// Opens a [`FileSource`] as a blocking byte stream.
///
/// Dropping the returned reader releases whatever the backend acquired for it
/// (file handle, HTTP connection).
pub trait SourceOpener {
    fn open(&self, source: &FileSource) -> Result<Box<dyn Read + Send>>;
}

/// Default opener dispatching to the local filesystem or WebHDFS.
///
/// Creating the HTTP client is relatively expensive, so one client is built
/// up front and reused for every HDFS file.
pub struct StorageOpener {
    hdfs: HdfsFileReader,
    buffer_size: usize,
}

impl StorageOpener {
    pub fn new(hdfs_config: HdfsConfig, buffer_size: usize) -> Result<Self> {
        Ok(Self {
            hdfs: HdfsFileReader::new(hdfs_config)?,
            buffer_size,
        })
    }
}

impl SourceOpener for StorageOpener {
    fn open(&self, source: &FileSource) -> Result<Box<dyn Read + Send>> {
        match source {
            FileSource::Local(path) => LocalFileReader::open(path, self.buffer_size),
            FileSource::Hdfs(uri) => self.hdfs.open(uri, self.buffer_size),
        }
    }
}

impl<T: SourceOpener + ?Sized> SourceOpener for Box<T> {
    fn open(&self, source: &FileSource) -> Result<Box<dyn Read + Send>> {
        (**self).open(source)
    }
}
