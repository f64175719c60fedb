//! The `FrameWriter` trait implemented by trace backends.

use crate::{FrameRow, OutputResult};

pub trait FrameWriter {
    fn write_row(&mut self, row: &FrameRow) -> OutputResult<()>;

    /// Flush buffered rows.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
