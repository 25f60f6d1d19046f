//! Durable, append-only result output.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BenchResult;
use crate::record::{BenchmarkRecord, RecordSchema};

/// Destination for trial records.
pub trait ResultSink {
    /// Persist one record before returning.
    fn append(&mut self, record: &BenchmarkRecord) -> BenchResult<()>;
}

/// Appends rows to a CSV file, writing the header only into a new or
/// empty file. Every row is flushed before `append` returns.
pub struct CsvResultSink {
    path: PathBuf,
    schema: RecordSchema,
    writer: csv::Writer<File>,
    rows_written: usize,
}

impl CsvResultSink {
    pub fn open(path: impl AsRef<Path>, schema: RecordSchema) -> BenchResult<Self> {
        let path = path.as_ref().to_path_buf();
        let needs_header = match fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(schema.header())?;
            writer.flush()?;
        }
        debug!(path = %path.display(), needs_header, "opened result sink");

        Ok(Self {
            path,
            schema,
            writer,
            rows_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> RecordSchema {
        self.schema
    }

    /// Rows appended through this handle.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

impl ResultSink for CsvResultSink {
    fn append(&mut self, record: &BenchmarkRecord) -> BenchResult<()> {
        self.writer.write_record(self.schema.to_row(record))?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }
}

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<BenchmarkRecord>,
}

impl ResultSink for MemorySink {
    fn append(&mut self, record: &BenchmarkRecord) -> BenchResult<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    fn append(&mut self, record: &BenchmarkRecord) -> BenchResult<()> {
        (**self).append(record)
    }
}
