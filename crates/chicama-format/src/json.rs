//! JSON output sink.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chicama_types::{Bar, BarSink, SinkError};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON sink.
///
/// Array style buffers rows and serializes the whole array on
/// [`BarSink::finish`]; NDJSON style streams one object per line as
/// rows arrive.
#[derive(Debug)]
pub struct JsonSink<W: Write + Send> {
    writer: W,
    style: JsonStyle,
    /// Whether to pretty-print (array style only).
    pretty: bool,
    rows: Vec<Bar>,
}

impl<W: Write + Send> JsonSink<W> {
    /// Creates a JSON array sink.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            style: JsonStyle::Array,
            pretty: false,
            rows: Vec::new(),
        }
    }

    /// Creates an NDJSON sink.
    #[must_use]
    pub const fn ndjson(writer: W) -> Self {
        Self {
            writer,
            style: JsonStyle::Ndjson,
            pretty: false,
            rows: Vec::new(),
        }
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Consumes the sink and returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonSink<BufWriter<File>> {
    /// Creates a JSON array sink writing to a new file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }

    /// Creates an NDJSON sink writing to a new file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create_ndjson(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self::ndjson(BufWriter::new(file)))
    }
}

impl<W: Write + Send> BarSink for JsonSink<W> {
    fn append(&mut self, bar: &Bar) -> Result<(), SinkError> {
        match self.style {
            JsonStyle::Array => self.rows.push(*bar),
            JsonStyle::Ndjson => {
                serde_json::to_writer(&mut self.writer, bar)?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        if self.style == JsonStyle::Array {
            if self.pretty {
                serde_json::to_writer_pretty(&mut self.writer, &self.rows)?;
            } else {
                serde_json::to_writer(&mut self.writer, &self.rows)?;
            }
            writeln!(self.writer)?;
            self.rows.clear();
        }
        self.writer.flush()?;
        Ok(())
    }
}
