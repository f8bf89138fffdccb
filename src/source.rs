//! Typed access to loosely-structured source records
//!
//! Source exports use Chinese column names and may omit any column. Every
//! read goes through [`SourceRecord::text`], which tries each accepted key for
//! a [`SourceField`] in order and falls back to an empty string.

use crate::error::{json_kind, RecordError};
use serde_json::{Map, Value};

/// Columns the converter knows how to read.
///
/// | field         | keys                       |
/// |---------------|----------------------------|
/// | `Title`       | `标题`, `title`            |
/// | `Body`        | `正文`, `content`          |
/// | `Source`      | `来源`, `source`           |
/// | `Link`        | `页面网址`, `link`, `url`  |
/// | `PublishedAt` | `发布时间`, `published_at` |
/// | `Keyword`     | `关键词`, `keyword`        |
/// | `Summary`     | `简介`, `summary`          |
/// | `Image`       | `图片`, `image_url`        |
///
/// Every field defaults to `""` when absent, null, or not a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceField {
    Title,
    Body,
    Source,
    Link,
    PublishedAt,
    Keyword,
    Summary,
    Image,
}

impl SourceField {
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            SourceField::Title => &["标题", "title"],
            SourceField::Body => &["正文", "content"],
            SourceField::Source => &["来源", "source"],
            SourceField::Link => &["页面网址", "link", "url"],
            SourceField::PublishedAt => &["发布时间", "published_at"],
            SourceField::Keyword => &["关键词", "keyword"],
            SourceField::Summary => &["简介", "summary"],
            SourceField::Image => &["图片", "image_url"],
        }
    }
}

/// One record of a source export
#[derive(Debug, Clone, Default)]
pub struct SourceRecord {
    fields: Map<String, Value>,
}

impl SourceRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        SourceRecord { fields }
    }

    /// Read a field as text. Numbers and booleans are rendered as their JSON text.
    pub fn text(&self, field: SourceField) -> String {
        field
            .keys()
            .iter()
            .find_map(|key| match self.fields.get(*key) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                Some(Value::Bool(b)) => Some(b.to_string()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Like [`text`](Self::text) but `None` when the value is blank
    pub fn non_blank(&self, field: SourceField) -> Option<String> {
        let value = self.text(field);
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

impl TryFrom<Value> for SourceRecord {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(SourceRecord::new(fields)),
            other => Err(RecordError::NotAnObject(json_kind(&other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> SourceRecord {
        SourceRecord::try_from(value).unwrap()
    }

    #[test]
    fn test_chinese_and_english_keys() {
        let zh = record(json!({"标题": "新闻", "页面网址": "https://a.cn/1"}));
        assert_eq!(zh.text(SourceField::Title), "新闻");
        assert_eq!(zh.text(SourceField::Link), "https://a.cn/1");

        let en = record(json!({"title": "News", "url": "https://b.cn"}));
        assert_eq!(en.text(SourceField::Title), "News");
        assert_eq!(en.text(SourceField::Link), "https://b.cn");
    }

    #[test]
    fn test_missing_and_null_default_to_empty() {
        let r = record(json!({"标题": null, "正文": ["a"]}));
        assert_eq!(r.text(SourceField::Title), "");
        assert_eq!(r.text(SourceField::Body), "");
        assert_eq!(r.text(SourceField::Source), "");
        assert_eq!(r.non_blank(SourceField::Source), None);
    }

    #[test]
    fn test_scalar_values_rendered() {
        let r = record(json!({"关键词": 2025, "来源": true}));
        assert_eq!(r.text(SourceField::Keyword), "2025");
        assert_eq!(r.text(SourceField::Source), "true");
    }

    #[test]
    fn test_non_object_rejected() {
        let err = SourceRecord::try_from(json!("just text")).unwrap_err();
        assert_eq!(err, RecordError::NotAnObject("string"));
        assert!(!err.is_skip());
    }
}
