//! Delimited table rendering under a field/decimal separator convention

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};

use crate::io::configuration::{ABSENT_MARKER, NUMBER_PRECISION};
use crate::io::error::{Result, WithPath};

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Free text, quoted when needed
    Text(String),
    /// Non-negative integer
    Count(u64),
    /// Real number; non-finite values render as the absent marker
    Number(f64),
    /// Missing value
    Absent,
}

impl Field {
    /// Text cell, or the absent marker for `None`
    pub fn text_or_absent(text: Option<&str>) -> Self {
        text.map_or(Self::Absent, |text| Self::Text(text.to_string()))
    }
}

/// Header plus rows of fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Field>>,
}

impl Table {
    /// Empty table with the given column headers
    pub const fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<Field>) {
        self.rows.push(row);
    }

    /// Column headers
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows
    pub fn rows(&self) -> &[Vec<Field>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column position of a header
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|candidate| candidate == header)
    }

    /// Field at a row and named column
    pub fn field(&self, row: usize, header: &str) -> Option<&Field> {
        let column = self.column(header)?;
        self.rows.get(row)?.get(column)
    }
}

/// Field and decimal separator convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    /// Separator between fields
    pub field_separator: char,
    /// Decimal point of rendered numbers
    pub decimal_separator: char,
}

impl TableFormat {
    /// Comma-separated fields, dot decimals
    pub const COMMA: Self = Self {
        field_separator: ',',
        decimal_separator: '.',
    };

    /// Semicolon-separated fields, comma decimals
    pub const SEMICOLON: Self = Self {
        field_separator: ';',
        decimal_separator: ',',
    };

    /// Render a number with fixed precision and trailing zeros stripped
    ///
    /// Non-finite values render as the absent marker.
    pub fn format_number(&self, value: f64) -> String {
        if !value.is_finite() {
            return ABSENT_MARKER.to_string();
        }

        let fixed = format!("{value:.precision$}", precision = NUMBER_PRECISION);
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        let text = if trimmed == "-0" { "0" } else { trimmed };

        if self.decimal_separator == '.' {
            text.to_string()
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }

    /// Render one field as unquoted text
    ///
    /// Quoting is left to the table writer.
    pub fn format_field(&self, field: &Field) -> String {
        match field {
            Field::Text(text) => text.clone(),
            Field::Count(count) => count.to_string(),
            Field::Number(value) => self.format_number(*value),
            Field::Absent => ABSENT_MARKER.to_string(),
        }
    }

    fn writer_builder(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(self.field_separator as u8)
            .quote_style(QuoteStyle::Necessary);
        builder
    }
}

/// Write a table to any writer, one line per row
///
/// Fields containing the field separator, a quote or a line break are
/// quoted with internal quotes doubled.
///
/// # Errors
///
/// Returns an error if the writer fails or a row's width differs from the header
pub fn write_table<W: Write>(writer: W, table: &Table, format: TableFormat) -> csv::Result<()> {
    let mut csv_writer = format.writer_builder().from_writer(writer);
    csv_writer.write_record(table.headers())?;

    for row in table.rows() {
        csv_writer.write_record(row.iter().map(|field| format.format_field(field)))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Table rendered to a string
///
/// # Errors
///
/// Returns an error if a row's width differs from the header
pub fn render(table: &Table, format: TableFormat) -> csv::Result<String> {
    let mut buffer = Vec::new();
    write_table(&mut buffer, table, format)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write a table to a file, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written
pub fn write_table_file(path: &Path, table: &Table, format: TableFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_path(parent, "create output directory")?;
    }

    let file = File::create(path).with_path(path, "create table file")?;
    write_table(file, table, format).with_path(path, "write table")
}
