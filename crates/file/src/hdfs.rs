//! HDFS file reader implementation backed by the WebHDFS REST API
//!
//! `hdfs://namenode:8020/path/to/file.csv` is read with
//! `GET http://namenode:9870/webhdfs/v1/path/to/file.csv?op=OPEN`. The namenode
//! answers with a redirect to a datanode, which the HTTP client follows.

use anyhow::{Context, Result};
use reqwest::Url;
use serde::Deserialize;
use std::io::{BufReader, Read};

/// Default HTTP port of the WebHDFS endpoint on a namenode
pub const DEFAULT_WEBHDFS_PORT: u16 = 9870;

/// How `hdfs://` URIs are mapped onto WebHDFS requests
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HdfsConfig {
    /// Base WebHDFS URL (e.g. `http://namenode:9870` or a gateway URL).
    /// When unset, the namenode host from each `hdfs://` URI is used with `webhdfs_port`.
    pub webhdfs_url: Option<String>,

    /// WebHDFS port used when deriving the endpoint from the URI host
    pub webhdfs_port: u16,

    /// Value sent as `user.name` (simple authentication)
    pub user: Option<String>,
}

impl Default for HdfsConfig {
    fn default() -> Self {
        Self {
            webhdfs_url: None,
            webhdfs_port: DEFAULT_WEBHDFS_PORT,
            user: None,
        }
    }
}

/// Reads files from HDFS over WebHDFS
pub struct HdfsFileReader {
    client: reqwest::blocking::Client,
    config: HdfsConfig,
}

impl HdfsFileReader {
    pub fn new(config: HdfsConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .context("Failed to build WebHDFS HTTP client")?;
        Ok(Self { client, config })
    }

    /// Build the WebHDFS `OPEN` URL for an `hdfs://` URI
    pub fn open_url(&self, uri: &str) -> Result<Url> {
        let parsed = Url::parse(uri).with_context(|| format!("Invalid HDFS URI: {uri}"))?;

        let path = parsed.path();
        if path.is_empty() || path == "/" {
            anyhow::bail!("HDFS URI has no file path: {uri}");
        }

        let mut url = match &self.config.webhdfs_url {
            Some(base) => {
                Url::parse(base).with_context(|| format!("Invalid WebHDFS URL: {base}"))?
            }
            None => {
                let host = parsed
                    .host_str()
                    .filter(|host| !host.is_empty())
                    .with_context(|| {
                        format!("HDFS URI has no namenode host and no WebHDFS URL is set: {uri}")
                    })?;
                let base = format!("http://{host}:{}", self.config.webhdfs_port);
                Url::parse(&base).with_context(|| format!("Invalid WebHDFS URL: {base}"))?
            }
        };

        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{prefix}/webhdfs/v1{path}"));
        {
            let mut query = url.query_pairs_mut();
            query.clear().append_pair("op", "OPEN");
            if let Some(user) = &self.config.user {
                query.append_pair("user.name", user);
            }
        }

        Ok(url)
    }

    /// Open an HDFS file and return a buffered reader over the response body
    ///
    /// The body is streamed; the HTTP connection is released when the reader is dropped.
    pub fn open(&self, uri: &str, buffer_size: usize) -> Result<Box<dyn Read + Send>> {
        let url = self.open_url(uri)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("Failed to open HDFS file: {uri}"))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("WebHDFS OPEN failed with status {status} for: {uri}");
        }

        tracing::debug!("Opened HDFS file {} via {}", uri, response.url());

        Ok(Box::new(BufReader::with_capacity(buffer_size, response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(config: HdfsConfig) -> HdfsFileReader {
        HdfsFileReader::new(config).unwrap()
    }

    #[test]
    fn test_open_url_from_namenode_host() {
        let url = reader(HdfsConfig::default())
            .open_url("hdfs://namenode:8020/data/part-0.csv")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://namenode:9870/webhdfs/v1/data/part-0.csv?op=OPEN"
        );
    }

    #[test]
    fn test_open_url_with_user_and_port() {
        let config = HdfsConfig {
            webhdfs_port: 50070,
            user: Some("etl".to_string()),
            ..Default::default()
        };
        let url = reader(config).open_url("hdfs://nn/a.csv").unwrap();
        assert_eq!(
            url.as_str(),
            "http://nn:50070/webhdfs/v1/a.csv?op=OPEN&user.name=etl"
        );
    }

    #[test]
    fn test_open_url_with_configured_base() {
        let config = HdfsConfig {
            webhdfs_url: Some("https://gateway:8443/gateway/default/".to_string()),
            ..Default::default()
        };
        let url = reader(config).open_url("hdfs:///warehouse/t/a.csv").unwrap();
        assert_eq!(
            url.as_str(),
            "https://gateway:8443/gateway/default/webhdfs/v1/warehouse/t/a.csv?op=OPEN"
        );
    }

    #[test]
    fn test_open_url_without_host_or_base() {
        let result = reader(HdfsConfig::default()).open_url("hdfs:///data/a.csv");
        assert!(result.is_err());
    }

    #[test]
    fn test_open_url_without_path() {
        let result = reader(HdfsConfig::default()).open_url("hdfs://namenode:8020");
        assert!(result.is_err());
        let result = reader(HdfsConfig::default()).open_url("hdfs://namenode:8020/");
        assert!(result.is_err());
    }
}
