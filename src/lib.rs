//! csv-import Library
//!
//! Reads an ordered list of CSV files, local or on HDFS, as a single record
//! stream and writes it out for a downstream import.
//!
//! # CLI Usage
//!
//! ```bash
//! # Stream three files as JSON lines
//! csv-import read --files a.csv,hdfs://namenode:8020/data/b.csv,c.csv
//!
//! # Headerless, semicolon-separated files with explicit column names
//! csv-import read --files a.csv --no-header --delimiter ';' --column-names id,name
//! ```

use anyhow::Context;
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};

// Re-export the reader crates for convenience
pub use csv_import_file as file;
pub use csv_import_source as source;

use csv_import_source::{ascii_char_to_byte, FilesReader, ReaderConfig, SourceOpener};

/// CSV parsing and backend options
#[derive(Args, Clone, Debug, Default)]
pub struct ReaderOpts {
    /// TOML file with reader settings; flags given on the command line take precedence
    #[arg(long, value_name = "PATH", env = "CSV_IMPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Treat the first row of every file as data instead of a header
    #[arg(long)]
    pub no_header: bool,

    /// CSV delimiter character
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Column names to use when files have no header row (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub column_names: Option<Vec<String>>,

    /// Allow rows with a varying number of fields
    #[arg(long)]
    pub flexible: bool,

    /// Base WebHDFS URL used for every hdfs:// location
    #[arg(long, env = "WEBHDFS_URL")]
    pub webhdfs_url: Option<String>,

    /// WebHDFS port on the namenode when no WebHDFS URL is given
    #[arg(long)]
    pub webhdfs_port: Option<u16>,

    /// HDFS user name sent with WebHDFS requests
    #[arg(long, env = "HADOOP_USER_NAME")]
    pub hdfs_user: Option<String>,
}

impl ReaderOpts {
    /// Build the reader configuration: defaults, then the config file, then flags
    pub fn to_config(&self) -> anyhow::Result<ReaderConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ReaderConfig::default(),
        };

        if self.no_header {
            config.has_headers = false;
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = ascii_char_to_byte(delimiter)
                .map_err(anyhow::Error::msg)
                .context("Invalid --delimiter")?;
        }
        if let Some(column_names) = &self.column_names {
            config.column_names = Some(column_names.clone());
        }
        if self.flexible {
            config.flexible = true;
        }
        if let Some(url) = &self.webhdfs_url {
            config.hdfs.webhdfs_url = Some(url.clone());
        }
        if let Some(port) = self.webhdfs_port {
            config.hdfs.webhdfs_port = port;
        }
        if let Some(user) = &self.hdfs_user {
            config.hdfs.user = Some(user.clone());
        }

        if config.has_headers && config.column_names.is_some() {
            tracing::warn!("column names are ignored because files are read with headers");
        }

        Ok(config)
    }
}

/// Load reader settings from a TOML file
pub fn load_config(path: &Path) -> anyhow::Result<ReaderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// How records are written to the output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON value per line (object when the file has a header, array otherwise)
    #[default]
    Jsonl,
    /// Plain CSV rows, without headers
    Csv,
}

/// Drain `reader` into `out`, stopping after `limit` records if given.
///
/// Returns the number of records written.
pub fn write_records<O, W>(
    reader: &mut FilesReader<O>,
    out: W,
    format: OutputFormat,
    limit: Option<u64>,
) -> anyhow::Result<u64>
where
    O: SourceOpener,
    W: Write,
{
    let mut written = 0u64;

    match format {
        OutputFormat::Jsonl => {
            let mut out = std::io::BufWriter::new(out);
            while limit.map_or(true, |limit| written < limit) {
                let Some(record) = reader.next_record()? else {
                    break;
                };
                serde_json::to_writer(&mut out, &record.to_json())
                    .context("Failed to write JSON record")?;
                out.write_all(b"\n")?;
                written += 1;
            }
            out.flush()?;
        }
        OutputFormat::Csv => {
            let mut out = csv::WriterBuilder::new().flexible(true).from_writer(out);
            while limit.map_or(true, |limit| written < limit) {
                let Some(record) = reader.next_record()? else {
                    break;
                };
                out.write_record(record.fields())
                    .context("Failed to write CSV record")?;
                written += 1;
            }
            out.flush()?;
        }
    }

    Ok(written)
}
