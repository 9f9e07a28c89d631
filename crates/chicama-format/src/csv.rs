//! CSV output sink.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chicama_types::{Bar, BarSink, SinkError};

/// Streaming CSV sink.
///
/// The header row is written lazily before the first bar, so an empty
/// session still produces a header-only file on [`BarSink::finish`].
#[derive(Debug)]
pub struct CsvSink<W: Write + Send> {
    writer: W,
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include a header row.
    include_header: bool,
    /// Whether to append a `synthesized` column.
    mark_synthesized: bool,
    header_written: bool,
}

impl<W: Write + Send> CsvSink<W> {
    /// Creates a CSV sink with default settings.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            delimiter: ',',
            include_header: true,
            mark_synthesized: false,
            header_written: false,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Sets whether to append a `synthesized` column.
    #[must_use]
    pub const fn with_mark_synthesized(mut self, mark: bool) -> Self {
        self.mark_synthesized = mark;
        self
    }

    /// Consumes the sink and returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self) -> std::io::Result<()> {
        let d = self.delimiter;
        if self.mark_synthesized {
            writeln!(
                self.writer,
                "timestamp{d}open{d}high{d}low{d}close{d}volume{d}synthesized"
            )?;
        } else {
            writeln!(self.writer, "timestamp{d}open{d}high{d}low{d}close{d}volume")?;
        }
        self.header_written = true;
        Ok(())
    }
}

impl CsvSink<BufWriter<File>> {
    /// Creates a CSV sink writing to a new file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> BarSink for CsvSink<W> {
    fn append(&mut self, bar: &Bar) -> Result<(), SinkError> {
        if self.include_header && !self.header_written {
            self.write_header()?;
        }
        let d = self.delimiter;
        write!(
            self.writer,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            bar.timestamp.format("%Y-%m-%dT%H:%M:%SZ"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        )?;
        if self.mark_synthesized {
            writeln!(self.writer, "{d}{}", bar.synthesized)?;
        } else {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        if self.include_header && !self.header_written {
            self.write_header()?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
