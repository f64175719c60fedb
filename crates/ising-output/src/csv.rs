//! CSV trace backend.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::writer::FrameWriter;
use crate::{FrameRow, OutputResult};

/// Writes one CSV record per frame.  The header row comes from
/// [`FrameRow`]'s field names and is written with the first record.
pub struct CsvFrameWriter<W: Write> {
    inner:    Writer<W>,
    rows:     u64,
    finished: bool,
}

impl CsvFrameWriter<File> {
    /// Create (or truncate) the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> OutputResult<Self> {
        Ok(Self::from_csv(Writer::from_path(path)?))
    }
}

impl<W: Write> CsvFrameWriter<W> {
    pub fn new(sink: W) -> Self {
        Self::from_csv(Writer::from_writer(sink))
    }

    fn from_csv(inner: Writer<W>) -> Self {
        Self { inner, rows: 0, finished: false }
    }

    /// Records written so far, not counting the header.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> OutputResult<W> {
        self.inner.into_inner().map_err(|e| e.into_error().into())
    }
}

impl<W: Write> FrameWriter for CsvFrameWriter<W> {
    fn write_row(&mut self, row: &FrameRow) -> OutputResult<()> {
        self.inner.serialize(row)?;
        self.rows += 1;
        self.finished = false;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.inner.flush()?;
        Ok(())
    }
}
