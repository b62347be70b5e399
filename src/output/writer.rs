//! Output writer trait definition.

use crate::error::Result;
use crate::output::CallEvent;

/// Trait for writing call events.
pub trait OutputWriter {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single call event.
    fn write_event(&mut self, event: &CallEvent) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
