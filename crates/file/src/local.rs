//! Local filesystem file reader implementation

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a local file with configurable buffering
pub struct LocalFileReader;

impl LocalFileReader {
    /// Open a local file and return a buffered reader
    ///
    /// The file handle lives inside the returned reader and is closed when it is dropped.
    pub fn open(path: &Path, buffer_size: usize) -> Result<Box<dyn Read + Send>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;

        let metadata = file
            .metadata()
            .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;
        if metadata.is_dir() {
            anyhow::bail!("Expected a file but found a directory: {}", path.display());
        }

        tracing::debug!("Opened local file {} ({} bytes)", path.display(), metadata.len());

        Ok(Box::new(BufReader::with_capacity(buffer_size, file)))
    }
}
