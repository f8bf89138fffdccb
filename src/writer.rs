//! Output writers: normalized JSON documents and SQL insert scripts

use crate::config::OutputLayout;
use crate::error::ConvertError;
use crate::loader::read_json;
use crate::types::NormalizedRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Run metadata carried by [`OutputLayout::Envelope`] documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputMeta {
    pub conversion_time: String,
    pub source_file: String,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    news_items: &'a [NormalizedRecord],
    total_count: usize,
    conversion_time: &'a str,
    source_file: &'a str,
}

/// An enveloped output document as read back from disk
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub news_items: Vec<NormalizedRecord>,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub conversion_time: String,
    #[serde(default)]
    pub source_file: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConvertedDocument {
    Records(Vec<NormalizedRecord>),
    Envelope(Envelope),
}

/// Serialize records as a pretty-printed JSON document.
pub fn write_json<W: Write>(
    writer: W,
    records: &[NormalizedRecord],
    layout: OutputLayout,
    meta: &OutputMeta,
) -> Result<(), ConvertError> {
    match layout {
        OutputLayout::Array => serde_json::to_writer_pretty(writer, records)?,
        OutputLayout::Envelope => serde_json::to_writer_pretty(
            writer,
            &EnvelopeRef {
                news_items: records,
                total_count: records.len(),
                conversion_time: &meta.conversion_time,
                source_file: &meta.source_file,
            },
        )?,
    }
    Ok(())
}

/// Read records previously written by [`write_json`], in either layout.
pub fn read_converted<P: AsRef<Path>>(path: P) -> Result<Vec<NormalizedRecord>, ConvertError> {
    let path = path.as_ref();
    let value = read_json(path)?;
    let document = serde_json::from_value(value).map_err(|source| ConvertError::Converted {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match document {
        ConvertedDocument::Records(records) => records,
        ConvertedDocument::Envelope(envelope) => envelope.news_items,
    })
}

/// Write a file through a temporary sibling that is renamed into place once
/// complete. Parent directories are created as needed.
pub fn write_atomically<P, F>(path: P, write: F) -> Result<(), ConvertError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> Result<(), ConvertError>,
{
    let path = path.as_ref();
    let io_err = |source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let tmp = temp_path(path);
    let mut writer = BufWriter::new(File::create(&tmp).map_err(io_err)?);
    let written = write(&mut writer).and_then(|()| writer.flush().map_err(ConvertError::Write));
    drop(writer);

    if let Err(err) = written {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    fs::rename(&tmp, path).map_err(io_err)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Columns of the `news` table in insert order
pub const NEWS_COLUMNS: &[&str] = &[
    "title",
    "content",
    "summary",
    "description",
    "source",
    "category",
    "published_at",
    "created_by",
    "is_active",
    "source_type",
    "rss_source_id",
    "link",
    "guid",
    "author",
    "image_url",
    "tags",
    "language",
    "view_count",
    "like_count",
    "comment_count",
    "share_count",
    "hotness_score",
    "status",
    "is_processed",
    "created_at",
    "updated_at",
];

/// A SQL literal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SqlValue<'a> {
    Null,
    Bool(bool),
    Int(u64),
    Float(f64),
    Text(&'a str),
    Now,
}

impl fmt::Display for SqlValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Bool(b) => write!(f, "{}", b),
            SqlValue::Int(n) => write!(f, "{}", n),
            SqlValue::Float(x) if !x.is_finite() => f.write_str("NULL"),
            SqlValue::Float(x) if x.fract() == 0.0 => write!(f, "{:.1}", x),
            SqlValue::Float(x) => write!(f, "{}", x),
            SqlValue::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            SqlValue::Now => f.write_str("NOW()"),
        }
    }
}

fn opt_int(value: Option<u64>) -> SqlValue<'static> {
    value.map_or(SqlValue::Null, SqlValue::Int)
}

/// Literals of a record, aligned with [`NEWS_COLUMNS`]
pub fn sql_values(record: &NormalizedRecord) -> Vec<SqlValue<'_>> {
    vec![
        SqlValue::Text(&record.title),
        SqlValue::Text(&record.content),
        SqlValue::Text(&record.summary),
        SqlValue::Text(&record.description),
        SqlValue::Text(&record.source),
        SqlValue::Text(record.category.label()),
        SqlValue::Text(&record.published_at),
        opt_int(record.created_by),
        SqlValue::Bool(record.is_active),
        SqlValue::Text(record.source_type.label()),
        opt_int(record.rss_source_id),
        SqlValue::Text(&record.link),
        SqlValue::Text(&record.guid),
        SqlValue::Text(&record.author),
        SqlValue::Text(&record.image_url),
        SqlValue::Text(&record.tags),
        SqlValue::Text(&record.language),
        SqlValue::Int(record.view_count),
        SqlValue::Int(record.like_count),
        SqlValue::Int(record.comment_count),
        SqlValue::Int(record.share_count),
        SqlValue::Float(record.hotness_score),
        SqlValue::Text(record.status.label()),
        SqlValue::Bool(record.is_processed),
        SqlValue::Now,
        SqlValue::Now,
    ]
}

/// Writes `INSERT INTO news` statements wrapped in a single transaction
pub struct SqlWriter<W: Write> {
    writer: W,
    statements: usize,
}

impl<W: Write> SqlWriter<W> {
    pub fn new(writer: W) -> Self {
        SqlWriter { writer, statements: 0 }
    }

    /// Header comments and `BEGIN;`
    pub fn begin(&mut self, generated_at: &str) -> Result<(), ConvertError> {
        writeln!(self.writer, "-- news inserts generated by newsprint")?;
        writeln!(self.writer, "-- generated at: {}", generated_at)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "BEGIN;")?;
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn write_record(&mut self, record: &NormalizedRecord) -> Result<(), ConvertError> {
        writeln!(self.writer, "INSERT INTO news (")?;
        writeln!(self.writer, "    {}", NEWS_COLUMNS.join(", "))?;
        writeln!(self.writer, ") VALUES (")?;

        let values = sql_values(record);
        let last = values.len() - 1;
        for (idx, value) in values.iter().enumerate() {
            let sep = if idx == last { "" } else { "," };
            writeln!(self.writer, "    {}{}", value, sep)?;
        }
        writeln!(self.writer, ");")?;
        writeln!(self.writer)?;

        self.statements += 1;
        Ok(())
    }

    pub fn write_records(&mut self, records: &[NormalizedRecord]) -> Result<(), ConvertError> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// `COMMIT;` and flush. Returns the number of statements written.
    pub fn commit(mut self) -> Result<usize, ConvertError> {
        writeln!(self.writer, "COMMIT;")?;
        self.writer.flush()?;
        Ok(self.statements)
    }
}

/// Render a complete script for `records`.
pub fn write_sql<W: Write>(writer: W, records: &[NormalizedRecord], generated_at: &str) -> Result<usize, ConvertError> {
    let mut sql = SqlWriter::new(writer);
    sql.begin(generated_at)?;
    sql.write_records(records)?;
    sql.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, SourceType, Status};

    fn record(title: &str) -> NormalizedRecord {
        NormalizedRecord {
            title: title.to_string(),
            content: "正文内容。".to_string(),
            summary: "正文内容。".to_string(),
            description: "正文内容。".to_string(),
            source: "新华网".to_string(),
            category: Category::Society,
            published_at: "2025-07-01 19:01:00".to_string(),
            created_by: None,
            is_active: true,
            source_type: SourceType::Manual,
            rss_source_id: None,
            link: "https://www.xinhuanet.com/1.html".to_string(),
            guid: "0123456789abcdef0123456789abcdef".to_string(),
            author: "编辑".to_string(),
            image_url: String::new(),
            tags: "[\"社会\",\"热点\"]".to_string(),
            language: "zh".to_string(),
            view_count: 100,
            like_count: 10,
            comment_count: 5,
            share_count: 0,
            hotness_score: 45.0,
            status: Status::Published,
            is_processed: true,
        }
    }

    fn meta() -> OutputMeta {
        OutputMeta {
            conversion_time: "2025-07-10T08:30:00".to_string(),
            source_file: "localization.json".to_string(),
        }
    }

    #[test]
    fn test_sql_literals() {
        assert_eq!(SqlValue::Text("It's").to_string(), "'It''s'");
        assert_eq!(SqlValue::Null.to_string(), "NULL");
        assert_eq!(SqlValue::Bool(false).to_string(), "false");
        assert_eq!(SqlValue::Float(45.0).to_string(), "45.0");
        assert_eq!(SqlValue::Float(12.35).to_string(), "12.35");
        assert_eq!(SqlValue::Float(f64::NAN).to_string(), "NULL");
        assert_eq!(SqlValue::Int(7).to_string(), "7");
    }

    #[test]
    fn test_values_align_with_columns() {
        assert_eq!(sql_values(&record("a")).len(), NEWS_COLUMNS.len());
    }

    #[test]
    fn test_insert_with_quote_is_well_formed() {
        let mut buffer = Vec::new();
        let count = write_sql(&mut buffer, &[record("Bob's (draft) 新闻")], "2025-07-10T08:30:00").unwrap();
        assert_eq!(count, 1);

        let script = String::from_utf8(buffer).unwrap();
        assert!(script.contains("'Bob''s (draft) 新闻'"));
        assert!(script.contains("BEGIN;"));
        assert!(script.trim_end().ends_with("COMMIT;"));

        let statement = &script[script.find("INSERT INTO news").unwrap()..script.find(");").unwrap() + 2];
        assert_eq!(statement.matches('(').count(), statement.matches(')').count());
        assert!(statement.ends_with(");"));
        assert!(statement.contains("    NULL,"));
        assert!(statement.contains("    45.0,"));
        assert!(statement.contains("    true,"));
        assert!(statement.contains("    NOW()\n"));
    }

    #[test]
    fn test_empty_script() {
        let mut buffer = Vec::new();
        assert_eq!(write_sql(&mut buffer, &[], "now").unwrap(), 0);
        let script = String::from_utf8(buffer).unwrap();
        assert!(!script.contains("INSERT"));
        assert!(script.contains("BEGIN;\n\nCOMMIT;"));
    }

    #[test]
    fn test_array_json_round_trip() {
        let records = vec![record("一"), record("二")];
        let mut buffer = Vec::new();
        write_json(&mut buffer, &records, OutputLayout::Array, &meta()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"category\": \"社会\""));
        let parsed: Vec<NormalizedRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, records);

        // a second serialize/parse cycle is stable
        let again = serde_json::to_string_pretty(&parsed).unwrap();
        let reparsed: Vec<NormalizedRecord> = serde_json::from_str(&again).unwrap();
        assert_eq!(reparsed, parsed);
    }

    #[test]
    fn test_envelope_layout() {
        let records = vec![record("一")];
        let mut buffer = Vec::new();
        write_json(&mut buffer, &records, OutputLayout::Envelope, &meta()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["total_count"], 1);
        assert_eq!(value["source_file"], "localization.json");
        assert_eq!(value["conversion_time"], "2025-07-10T08:30:00");
        assert_eq!(value["news_items"][0]["title"], "一");
    }

    #[test]
    fn test_atomic_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![record("甲"), record("乙")];

        for layout in [OutputLayout::Array, OutputLayout::Envelope] {
            let path = dir.path().join("nested").join(format!("{}.json", layout));
            write_atomically(&path, |w| write_json(w, &records, layout, &meta())).unwrap();

            assert!(!temp_path(&path).exists());
            assert_eq!(read_converted(&path).unwrap(), records);
        }
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let result = write_atomically(&path, |_| {
            Err(ConvertError::Write(std::io::Error::new(std::io::ErrorKind::Other, "boom")))
        });
        assert!(result.is_err());
        assert!(!path.exists());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_read_converted_rejects_other_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.json");
        std::fs::write(&path, "[{\"标题\": \"未转换\"}]").unwrap();
        assert!(matches!(read_converted(&path), Err(ConvertError::Converted { .. })));
    }
}
