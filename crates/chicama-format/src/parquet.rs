//! Apache Parquet output sink.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{BooleanArray, Float64Array, Int64Array, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use chicama_types::{Bar, BarSink, SinkError};

/// Parquet sink.
///
/// Rows are buffered and encoded into row groups on
/// [`BarSink::finish`]; the Parquet footer requires the full file to
/// be written in one pass.
#[derive(Debug)]
pub struct ParquetSink<W: Write + Send> {
    writer: Option<W>,
    rows: Vec<Bar>,
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl<W: Write + Send> ParquetSink<W> {
    /// Creates a Parquet sink with default settings.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            rows: Vec::new(),
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for bar data.
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new(
                "timestamp",
                DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
                false,
            ),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("volume", DataType::Int64, false),
            Field::new("synthesized", DataType::Boolean, false),
        ])
    }

    /// Converts bars to an Arrow RecordBatch.
    fn to_batch(bars: &[Bar]) -> Result<RecordBatch, SinkError> {
        let timestamps: Vec<_> = bars
            .iter()
            .map(|b| b.timestamp.timestamp_micros())
            .collect();
        let opens: Vec<_> = bars.iter().map(|b| b.open).collect();
        let highs: Vec<_> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<_> = bars.iter().map(|b| b.low).collect();
        let closes: Vec<_> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<_> = bars.iter().map(|b| b.volume).collect();
        let synthesized: Vec<_> = bars.iter().map(|b| b.synthesized).collect();

        RecordBatch::try_new(
            Arc::new(Self::schema()),
            vec![
                Arc::new(TimestampMicrosecondArray::from(timestamps).with_timezone("UTC")),
                Arc::new(Float64Array::from(opens)),
                Arc::new(Float64Array::from(highs)),
                Arc::new(Float64Array::from(lows)),
                Arc::new(Float64Array::from(closes)),
                Arc::new(Int64Array::from(volumes)),
                Arc::new(BooleanArray::from(synthesized)),
            ],
        )
        .map_err(|e| SinkError::Encode(e.to_string()))
    }
}

impl ParquetSink<BufWriter<File>> {
    /// Creates a Parquet sink writing to a new file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> BarSink for ParquetSink<W> {
    fn append(&mut self, bar: &Bar) -> Result<(), SinkError> {
        if self.writer.is_none() {
            return Err(SinkError::Encode("parquet sink already finished".into()));
        }
        self.rows.push(*bar);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        let Some(writer) = self.writer.take() else {
            return Ok(());
        };

        let schema = Arc::new(Self::schema());
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, schema, Some(props))
            .map_err(|e| SinkError::Encode(e.to_string()))?;

        for chunk in self.rows.chunks(self.row_group_size) {
            let batch = Self::to_batch(chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| SinkError::Encode(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| SinkError::Encode(e.to_string()))?;
        self.rows.clear();
        Ok(())
    }
}
