//! Index export in JSON, CSV and XML

use crate::index::PageRecord;
use crate::output::{OutputError, OutputResult};
use chrono::SecondsFormat;
use csv::{QuoteStyle, WriterBuilder};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Header row of the CSV export
pub const CSV_HEADERS: [&str; 6] = ["URL", "Title", "Description", "Images", "Links", "Crawled At"];

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Xml,
}

impl ExportFormat {
    /// File extension used for default output names
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Xml => "xml",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "xml" => Ok(ExportFormat::Xml),
            other => Err(OutputError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Renders `records` in the given format
pub fn export_records<'a, I>(records: I, format: ExportFormat) -> OutputResult<String>
where
    I: IntoIterator<Item = &'a PageRecord>,
{
    let mut buf = Vec::new();
    write_export(records, format, &mut buf)?;
    String::from_utf8(buf).map_err(|e| OutputError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Streams `records` in the given format to `writer`
pub fn write_export<'a, I, W>(records: I, format: ExportFormat, writer: &mut W) -> OutputResult<()>
where
    I: IntoIterator<Item = &'a PageRecord>,
    W: Write,
{
    let records: Vec<&PageRecord> = records.into_iter().collect();

    match format {
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &records)?;
        }
        ExportFormat::Csv => write_csv(&records, &mut *writer)?,
        ExportFormat::Xml => write_xml(&records, &mut *writer)?,
    }

    writer.flush()?;
    Ok(())
}

fn write_csv<W: Write>(records: &[&PageRecord], writer: W) -> OutputResult<()> {
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    csv.write_record(CSV_HEADERS)?;
    for page in records {
        let images = page.images.len().to_string();
        let links = page.links.len().to_string();
        let crawled_at = timestamp(page);
        csv.write_record([
            page.url.as_str(),
            page.title.as_str(),
            page.description.as_str(),
            images.as_str(),
            links.as_str(),
            crawled_at.as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

fn write_xml<W: Write>(records: &[&PageRecord], mut writer: W) -> OutputResult<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(writer, "<pages>")?;

    for page in records {
        writeln!(writer, "  <page>")?;
        writeln!(writer, "    <url>{}</url>", escape_xml(&page.url))?;
        writeln!(writer, "    <title>{}</title>", escape_xml(&page.title))?;
        writeln!(
            writer,
            "    <description>{}</description>",
            escape_xml(&page.description)
        )?;
        writeln!(writer, "    <crawledAt>{}</crawledAt>", timestamp(page))?;
        writeln!(writer, "  </page>")?;
    }

    write!(writer, "</pages>")?;
    Ok(())
}

fn timestamp(page: &PageRecord) -> String {
    page.crawled_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Escapes the five XML special characters
pub fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}
