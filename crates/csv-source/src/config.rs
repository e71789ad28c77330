//! Reader configuration shared by every file in a stream

use csv_import_file::{HdfsConfig, DEFAULT_BUFFER_SIZE};
use serde::{Deserialize, Deserializer};

/// Configuration for reading CSV files
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Whether every file starts with its own header row (default: true).
    /// A file holding only a header row has no records.
    pub has_headers: bool,

    /// CSV delimiter character (default: ',')
    #[serde(deserialize_with = "ascii_byte")]
    pub delimiter: u8,

    /// Quote character (default: '"')
    #[serde(deserialize_with = "ascii_byte")]
    pub quote: u8,

    /// Lines starting with this character are ignored
    #[serde(deserialize_with = "optional_ascii_byte")]
    pub comment: Option<u8>,

    /// Allow records with a varying number of fields
    pub flexible: bool,

    /// Trim whitespace around headers and fields
    pub trim: bool,

    /// Optional column names when has_headers is false
    pub column_names: Option<Vec<String>>,

    /// Size of the read buffer wrapped around each opened file
    pub buffer_size: usize,

    /// WebHDFS settings for `hdfs://` locations
    pub hdfs: HdfsConfig,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: b',',
            quote: b'"',
            comment: None,
            flexible: false,
            trim: false,
            column_names: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
            hdfs: HdfsConfig::default(),
        }
    }
}

impl ReaderConfig {
    pub(crate) fn csv_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .comment(self.comment)
            .flexible(self.flexible)
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            });
        builder
    }
}

/// Convert a single ASCII character into the byte the csv crate expects
pub fn ascii_char_to_byte(c: char) -> Result<u8, String> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(format!("expected a single ASCII character, got {c:?}"))
    }
}

fn single_char(s: &str) -> Result<u8, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => ascii_char_to_byte(c),
        _ => Err(format!("expected a single ASCII character, got {s:?}")),
    }
}

fn ascii_byte<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let s = String::deserialize(deserializer)?;
    single_char(&s).map_err(serde::de::Error::custom)
}

fn optional_ascii_byte<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let s = Option::<String>::deserialize(deserializer)?;
    s.map(|s| single_char(&s).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ReaderConfig::default();
        assert!(config.has_headers);
        assert_eq!(config.delimiter, b',');
        assert_eq!(config.quote, b'"');
        assert_eq!(config.comment, None);
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
        assert_eq!(config.hdfs, HdfsConfig::default());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ReaderConfig = serde_json::from_str(
            r##"{"has_headers": false, "delimiter": ";", "comment": "#", "hdfs": {"user": "etl"}}"##,
        )
        .unwrap();
        assert!(!config.has_headers);
        assert_eq!(config.delimiter, b';');
        assert_eq!(config.comment, Some(b'#'));
        assert_eq!(config.quote, b'"');
        assert_eq!(config.hdfs.user.as_deref(), Some("etl"));
        assert_eq!(config.hdfs.webhdfs_port, 9870);
    }

    #[test]
    fn test_deserialize_rejects_multi_char_delimiter() {
        let result = serde_json::from_str::<ReaderConfig>(r#"{"delimiter": "||"}"#);
        assert!(result.is_err());
        let result = serde_json::from_str::<ReaderConfig>(r#"{"delimiter": "é"}"#);
        assert!(result.is_err());
    }
}
