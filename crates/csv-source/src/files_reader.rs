//! A single record stream over an ordered list of CSV files
//!
//! Files are opened lazily, one at a time, in list order. Files without any
//! record are skipped silently; any open or decode failure ends the stream.

use crate::config::ReaderConfig;
use crate::error::{FilesReaderError, Result};
use crate::file_reader::CsvFileReader;
use crate::record::Record;
use csv_import_file::{FileSource, SourceOpener, StorageOpener};
use std::iter::FusedIterator;
use tracing::{debug, info, warn};

/// Counters describing how far a [`FilesReader`] has progressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    pub files_opened: usize,
    pub empty_files: usize,
    pub records: u64,
}

/// Reads records from a list of files as if they were one file
pub struct FilesReader<O = StorageOpener> {
    files: Vec<String>,
    config: ReaderConfig,
    opener: O,
    next_file_index: usize,
    active: Option<CsvFileReader>,
    failed_at: Option<String>,
    stats: ReadStats,
}

impl FilesReader<StorageOpener> {
    /// Create a reader over local paths and `hdfs://` URIs. No file is opened yet.
    pub fn new(files: Vec<String>, config: ReaderConfig) -> Result<Self> {
        let opener = StorageOpener::new(config.hdfs.clone(), config.buffer_size)
            .map_err(|e| FilesReaderError::Backend(e.into()))?;
        Ok(Self::with_opener(files, config, opener))
    }
}

impl<O: SourceOpener> FilesReader<O> {
    pub fn with_opener(files: Vec<String>, config: ReaderConfig, opener: O) -> Self {
        Self {
            files,
            config,
            opener,
            next_file_index: 0,
            active: None,
            failed_at: None,
            stats: ReadStats::default(),
        }
    }

    /// Return the next record across all files.
    ///
    /// `Ok(None)` marks the end of the last file and is returned again on every
    /// later call. After an error every later call fails with
    /// [`FilesReaderError::Aborted`]; remaining files are never opened.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        if let Some(location) = &self.failed_at {
            return Err(FilesReaderError::Aborted {
                location: location.clone(),
            });
        }

        let result = self.pull();
        if let Err(e) = &result {
            self.failed_at = Some(e.location().unwrap_or_default().to_string());
            self.active = None;
        }
        result
    }

    /// Location of the file that ended the stream with an error
    pub fn failed_location(&self) -> Option<&str> {
        self.failed_at.as_deref()
    }

    fn pull(&mut self) -> Result<Option<Record>> {
        let has_record = match self.active.as_mut() {
            Some(reader) => reader.has_next()?,
            None => false,
        };

        if !has_record && !self.advance()? {
            return Ok(None);
        }

        let Some(reader) = self.active.as_mut() else {
            unreachable!("advanced to a non-empty file but no reader is active");
        };
        match reader.next_record()? {
            Some(record) => {
                self.stats.records += 1;
                Ok(Some(record))
            }
            None => unreachable!(
                "reader for {} reported a record but returned none",
                reader.source()
            ),
        }
    }

    /// Move to the next file that has at least one record.
    ///
    /// Returns false once the list is exhausted. The previous reader is dropped
    /// before the next file is opened.
    fn advance(&mut self) -> Result<bool> {
        self.active = None;

        while self.next_file_index < self.files.len() {
            let location = self.files[self.next_file_index].trim();
            self.next_file_index += 1;

            if location.is_empty() {
                warn!(
                    "File location #{} is blank, treating it as a local path",
                    self.next_file_index - 1
                );
            }

            let source = FileSource::parse(location);
            info!("Reading next file {source}");

            let mut reader = CsvFileReader::open(source, &self.opener, &self.config)?;
            self.stats.files_opened += 1;

            if reader.has_next()? {
                self.active = Some(reader);
                return Ok(true);
            }

            debug!("Skipping empty file {}", reader.source());
            self.stats.empty_files += 1;
        }

        Ok(false)
    }

    /// File the next record will come from, if one is open
    pub fn current_source(&self) -> Option<&FileSource> {
        self.active.as_ref().map(CsvFileReader::source)
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Number of locations not yet attempted
    pub fn remaining_files(&self) -> usize {
        self.files.len() - self.next_file_index
    }

    pub fn stats(&self) -> ReadStats {
        self.stats
    }
}

impl<O: SourceOpener> Iterator for FilesReader<O> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed_at.is_some() {
            return None;
        }
        self.next_record().transpose()
    }
}

impl<O: SourceOpener> FusedIterator for FilesReader<O> {}
