//! Stock File Loader
//!
//! Reads a WMS export (delimited text or spreadsheet) fully into memory as
//! a `RawTable`. Every cell is kept as text; headers are trimmed and
//! uppercased.

use calamine::{open_workbook_from_rs, DataType, Reader, Xls, Xlsx};
use encoding_rs::WINDOWS_1252;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use tracing::info;

use crate::error::{ShelfwatchError, ShelfwatchResult};

/// One data row: normalized header -> raw cell text.
pub type RawRow = HashMap<String, String>;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Xlsx,
    Xls,
}

impl SheetFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            _ => None,
        }
    }

    /// Detect format from content type header. Parameters such as
    /// `charset` are ignored.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type.split(';').next().unwrap_or_default().trim();
        match mime {
            "text/csv" | "application/csv" | "text/plain" => Some(Self::Csv),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Some(Self::Xlsx),
            "application/vnd.ms-excel" => Some(Self::Xls),
            _ => None,
        }
    }
}

/// Whole input file as text cells.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub format: SheetFormat,
    /// Only set for delimited text.
    pub delimiter: Option<u8>,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// `|` wins over `;`, which wins over the default `,`.
pub fn detect_delimiter(first_line: &str) -> u8 {
    if first_line.contains('|') {
        b'|'
    } else if first_line.contains(';') {
        b';'
    } else {
        b','
    }
}

/// Trim and uppercase headers, naming blank ones `UNNAMED: <index>` and
/// suffixing repeats with `.1`, `.2`, ...
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::new();

    for (index, header) in raw.into_iter().enumerate() {
        let mut name = header.as_ref().trim().to_uppercase();
        if name.is_empty() {
            name = format!("UNNAMED: {}", index);
        }

        let count = seen.entry(name.clone()).or_insert(0);
        if *count > 0 {
            name = format!("{}.{}", name, count);
        }
        *count += 1;
        headers.push(name);
    }

    headers
}

fn decode_text(data: &[u8]) -> String {
    let data = data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data);
    match std::str::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, _) = WINDOWS_1252.decode(data);
            text.into_owned()
        }
    }
}

fn zip_row<I>(headers: &[String], cells: I) -> RawRow
where
    I: IntoIterator<Item = String>,
{
    headers.iter().cloned().zip(cells).collect()
}

/// Loader for WMS stock exports
#[derive(Debug, Clone, Default)]
pub struct SheetLoader;

impl SheetLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load_path(&self, path: &Path) -> ShelfwatchResult<RawTable> {
        let filename = path.display().to_string();
        let format = SheetFormat::from_extension(path)
            .ok_or_else(|| ShelfwatchError::unsupported_format(&filename))?;
        let data = std::fs::read(path)?;
        self.load_bytes(&filename, &data, Some(format))
    }

    /// Load from memory. Without an explicit format it is inferred from the
    /// file name.
    pub fn load_bytes(
        &self,
        filename: &str,
        data: &[u8],
        format: Option<SheetFormat>,
    ) -> ShelfwatchResult<RawTable> {
        let format = format
            .or_else(|| SheetFormat::from_extension(Path::new(filename)))
            .ok_or_else(|| ShelfwatchError::unsupported_format(filename))?;

        let table = match format {
            SheetFormat::Csv => self.parse_delimited(data)?,
            SheetFormat::Xlsx => {
                let workbook: Xlsx<_> =
                    open_workbook_from_rs(Cursor::new(data)).map_err(calamine::Error::from)?;
                self.parse_workbook(workbook, SheetFormat::Xlsx)?
            }
            SheetFormat::Xls => {
                let workbook: Xls<_> =
                    open_workbook_from_rs(Cursor::new(data)).map_err(calamine::Error::from)?;
                self.parse_workbook(workbook, SheetFormat::Xls)?
            }
        };

        info!(
            filename,
            columns = ?table.headers,
            rows = table.rows.len(),
            "Input loaded"
        );
        Ok(table)
    }

    fn parse_delimited(&self, data: &[u8]) -> ShelfwatchResult<RawTable> {
        let text = decode_text(data);
        let first_line = text.lines().next().unwrap_or_default();
        let delimiter = detect_delimiter(first_line);
        info!(delimiter = %(delimiter as char), "Delimiter detected");

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = normalize_headers(reader.headers()?.iter());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(zip_row(&headers, record.iter().map(str::to_string)));
        }

        Ok(RawTable {
            format: SheetFormat::Csv,
            delimiter: Some(delimiter),
            headers,
            rows,
        })
    }

    /// Read the first worksheet, first row as headers.
    fn parse_workbook<RS, R>(&self, mut workbook: R, format: SheetFormat) -> ShelfwatchResult<RawTable>
    where
        RS: std::io::Read + std::io::Seek,
        R: Reader<RS>,
        R::Error: std::fmt::Display,
    {
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ShelfwatchError::load("No sheets found in workbook"))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .ok_or_else(|| ShelfwatchError::load(format!("Worksheet '{}' not found", sheet_name)))?
            .map_err(|e| ShelfwatchError::load(format!("Failed to read worksheet: {}", e)))?;

        let mut rows_iter = range.rows();
        let headers = match rows_iter.next() {
            Some(header_row) => normalize_headers(header_row.iter().map(cell_text)),
            None => Vec::new(),
        };

        let rows = rows_iter
            .filter(|row| row.iter().any(|cell| !matches!(cell, DataType::Empty)))
            .map(|row| zip_row(&headers, row.iter().map(cell_text)))
            .collect();

        Ok(RawTable {
            format,
            delimiter: None,
            headers,
            rows,
        })
    }
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
