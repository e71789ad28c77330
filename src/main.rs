//! Command-line interface for csv-import
//!
//! # Usage Examples
//!
//! ```bash
//! # Read local and HDFS files as one stream of JSON lines
//! csv-import read --files /data/a.csv,hdfs://namenode:8020/data/b.csv
//!
//! # Preview the first 10 records as CSV
//! csv-import read --files a.csv,b.csv --format csv --limit 10
//!
//! # WebHDFS behind a gateway, with settings from a config file
//! WEBHDFS_URL=https://gateway:8443/gateway/default \
//!   csv-import read --config reader.toml --files hdfs:///warehouse/t/part-0.csv
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use clap::{Parser, Subcommand};
use csv_import::source::FilesReader;
use csv_import::{write_records, OutputFormat, ReaderOpts};

#[derive(Parser)]
#[command(name = "csv-import")]
#[command(about = "Read CSV files from the local filesystem and HDFS as one record stream")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream the records of all files, in order, to stdout
    Read {
        /// Files to read, in order (comma-separated local paths or hdfs:// URIs)
        #[arg(long, value_delimiter = ',', required = true)]
        files: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Jsonl)]
        format: OutputFormat,

        /// Stop after this many records
        #[arg(long)]
        limit: Option<u64>,

        #[command(flatten)]
        reader: ReaderOpts,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Read {
            files,
            format,
            limit,
            reader,
        } => {
            let config = reader.to_config()?;
            tracing::info!("Files to process: {:?}", files);

            let mut reader = FilesReader::new(files, config)?;
            let written = write_records(&mut reader, std::io::stdout().lock(), format, limit)?;

            let stats = reader.stats();
            tracing::info!(
                "Read {written} records from {} files ({} empty, {} not opened)",
                stats.files_opened,
                stats.empty_files,
                reader.remaining_files(),
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_are_split_on_commas() {
        let cli = Cli::try_parse_from([
            "csv-import",
            "read",
            "--files",
            "a.csv, hdfs://nn/b.csv ,c.csv",
        ])
        .unwrap();
        let Commands::Read { files, format, .. } = cli.command;
        assert_eq!(files, vec!["a.csv", " hdfs://nn/b.csv ", "c.csv"]);
        assert_eq!(format, OutputFormat::Jsonl);
    }

    #[test]
    fn test_files_required() {
        assert!(Cli::try_parse_from(["csv-import", "read"]).is_err());
    }

    #[test]
    fn test_reader_flags() {
        let cli = Cli::try_parse_from([
            "csv-import",
            "read",
            "--files",
            "a.csv",
            "--no-header",
            "--delimiter",
            ";",
            "--column-names",
            "id,name",
            "--format",
            "csv",
            "--limit",
            "5",
        ])
        .unwrap();
        let Commands::Read {
            format,
            limit,
            reader,
            ..
        } = cli.command;
        assert_eq!(format, OutputFormat::Csv);
        assert_eq!(limit, Some(5));

        let config = reader.to_config().unwrap();
        assert!(!config.has_headers);
        assert_eq!(config.delimiter, b';');
        assert_eq!(
            config.column_names,
            Some(vec!["id".to_string(), "name".to_string()])
        );
    }
}
