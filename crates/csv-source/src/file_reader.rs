//! Reads records from one CSV file on one backend

use crate::config::ReaderConfig;
use crate::error::{FilesReaderError, Result};
use crate::record::Record;
use anyhow::Context;
use csv::StringRecord;
use csv_import_file::{FileSource, SourceOpener};
use std::io::Read;
use std::sync::Arc;
use tracing::debug;

/// Forward-only record reader bound to a single file.
///
/// Keeps a one-record lookahead so that `has_next` can answer without
/// changing which record `next_record` returns. The underlying stream is
/// released when the reader is dropped.
pub struct CsvFileReader {
    source: FileSource,
    name: Arc<str>,
    reader: csv::Reader<Box<dyn Read + Send>>,
    headers: Option<Arc<StringRecord>>,
    lookahead: Option<Record>,
    exhausted: bool,
}

impl CsvFileReader {
    /// Open `source` through `opener` and read its header row if configured to
    pub fn open<O>(source: FileSource, opener: &O, config: &ReaderConfig) -> Result<Self>
    where
        O: SourceOpener + ?Sized,
    {
        let name: Arc<str> = Arc::from(source.display_name());
        let stream = opener
            .open(&source)
            .map_err(|e| FilesReaderError::open(&name, e))?;

        Self::from_reader(source, name, stream, config)
    }

    fn from_reader(
        source: FileSource,
        name: Arc<str>,
        stream: Box<dyn Read + Send>,
        config: &ReaderConfig,
    ) -> Result<Self> {
        let mut reader = config.csv_builder().from_reader(stream);

        let headers = if config.has_headers {
            let headers = reader
                .headers()
                .context("Failed to read CSV headers")
                .map_err(|e| FilesReaderError::open(&name, e))?
                .clone();
            if headers.is_empty() {
                None
            } else {
                Some(Arc::new(headers))
            }
        } else {
            config
                .column_names
                .as_ref()
                .map(|names| Arc::new(StringRecord::from(names.clone())))
        };

        debug!("CSV headers/columns for {name}: {headers:?}");

        Ok(Self {
            source,
            name,
            reader,
            headers,
            lookahead: None,
            exhausted: false,
        })
    }

    /// Whether another record is available. Calling this repeatedly does not
    /// consume anything.
    pub fn has_next(&mut self) -> Result<bool> {
        if self.lookahead.is_none() && !self.exhausted {
            self.lookahead = self.read_record()?;
            self.exhausted = self.lookahead.is_none();
        }
        Ok(self.lookahead.is_some())
    }

    /// Return the next record, or `None` once the file is exhausted
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        self.has_next()?;
        Ok(self.lookahead.take())
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    pub fn headers(&self) -> Option<&StringRecord> {
        self.headers.as_deref()
    }

    fn read_record(&mut self) -> Result<Option<Record>> {
        let mut fields = StringRecord::new();
        match self.reader.read_record(&mut fields) {
            Ok(true) => Ok(Some(Record::new(
                fields,
                self.headers.clone(),
                self.name.clone(),
            ))),
            Ok(false) => Ok(None),
            Err(e) => Err(FilesReaderError::Record {
                location: self.name.to_string(),
                source: e,
            }),
        }
    }
}

impl Iterator for CsvFileReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
