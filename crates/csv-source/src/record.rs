//! A single CSV row together with the header of the file it came from

use csv::StringRecord;
use serde_json::{Map, Value};
use std::sync::Arc;

/// One decoded CSV row
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: StringRecord,
    headers: Option<Arc<StringRecord>>,
    source: Arc<str>,
    line: u64,
}

impl Record {
    pub(crate) fn new(
        fields: StringRecord,
        headers: Option<Arc<StringRecord>>,
        source: Arc<str>,
    ) -> Self {
        let line = fields.position().map(|pos| pos.line()).unwrap_or(0);
        Self {
            fields,
            headers,
            source,
            line,
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index)
    }

    /// Look a field up by column name. Returns None when the file has no header.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        let index = self.headers.as_ref()?.iter().position(|h| h == name)?;
        self.fields.get(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> csv::StringRecordIter<'_> {
        self.fields.iter()
    }

    pub fn fields(&self) -> &StringRecord {
        &self.fields
    }

    pub fn headers(&self) -> Option<&StringRecord> {
        self.headers.as_deref()
    }

    /// Display name of the file this record was read from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 1-based line the record starts on
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Convert to JSON: an object keyed by column name when a header is known,
    /// otherwise an array of strings.
    ///
    /// Fields past the end of the header are keyed `column_{i}`.
    pub fn to_json(&self) -> Value {
        match &self.headers {
            Some(headers) => {
                let mut map = Map::with_capacity(self.fields.len());
                for (i, value) in self.fields.iter().enumerate() {
                    let base = headers
                        .get(i)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("column_{i}"));
                    let mut key = base.clone();
                    let mut suffix = 1;
                    while map.contains_key(&key) {
                        key = format!("{base}_{suffix}");
                        suffix += 1;
                    }
                    map.insert(key, Value::String(value.to_string()));
                }
                Value::Object(map)
            }
            None => Value::Array(
                self.fields
                    .iter()
                    .map(|value| Value::String(value.to_string()))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(fields: &[&str], headers: Option<&[&str]>) -> Record {
        Record::new(
            StringRecord::from(fields.to_vec()),
            headers.map(|h| Arc::new(StringRecord::from(h.to_vec()))),
            Arc::from("test.csv"),
        )
    }

    #[test]
    fn test_get_by_name() {
        let r = record(&["1", "Alice"], Some(&["id", "name"]));
        assert_eq!(r.get_by_name("name"), Some("Alice"));
        assert_eq!(r.get_by_name("age"), None);
        assert_eq!(r.get(0), Some("1"));
        assert_eq!(r.source(), "test.csv");
    }

    #[test]
    fn test_get_by_name_without_headers() {
        let r = record(&["1", "Alice"], None);
        assert_eq!(r.get_by_name("id"), None);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_to_json_with_headers_keeps_column_order() {
        let r = record(&["2", "Bob", "extra"], Some(&["id", "name"]));
        assert_eq!(
            r.to_json().to_string(),
            r#"{"id":"2","name":"Bob","column_2":"extra"}"#
        );
    }

    #[test]
    fn test_to_json_duplicate_headers_keep_every_field() {
        let r = record(&["1", "2", "3"], Some(&["a", "a", "a_1"]));
        assert_eq!(
            r.to_json().to_string(),
            r#"{"a":"1","a_1":"2","a_1_1":"3"}"#
        );
    }

    #[test]
    fn test_to_json_header_named_like_generated_column() {
        let r = record(&["1", "x", "y"], Some(&["id", "column_2"]));
        assert_eq!(
            r.to_json().to_string(),
            r#"{"id":"1","column_2":"x","column_2_1":"y"}"#
        );
    }

    #[test]
    fn test_to_json_without_headers() {
        let r = record(&["2", "Bob"], None);
        assert_eq!(r.to_json(), json!(["2", "Bob"]));
    }
}
