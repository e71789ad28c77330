//! CSV record streaming over many files
//!
//! This crate reads an ordered list of CSV files (local paths or `hdfs://`
//! URIs) as one continuous stream of records. Files are opened lazily and
//! empty files are skipped.
//!
//! ```ignore
//! use csv_import_source::{FilesReader, ReaderConfig};
//!
//! let files = vec!["a.csv".to_string(), "hdfs://namenode:8020/data/b.csv".to_string()];
//! let mut reader = FilesReader::new(files, ReaderConfig::default())?;
//! while let Some(record) = reader.next_record()? {
//!     println!("{}:{} {:?}", record.source(), record.line(), record.fields());
//! }
//! ```

mod config;
mod error;
mod file_reader;
mod files_reader;
mod record;

pub use config::{ascii_char_to_byte, ReaderConfig};
pub use error::{FilesReaderError, Result};
pub use file_reader::CsvFileReader;
pub use files_reader::{FilesReader, ReadStats};
pub use record::Record;

// Re-export file source types for convenience
pub use csv_import_file::{
    Backend, FileSource, HdfsConfig, SourceOpener, StorageOpener, DEFAULT_BUFFER_SIZE,
};
