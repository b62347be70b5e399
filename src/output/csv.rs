//! CSV candidate table writer.

use crate::constants::DENSITY_DECIMAL_PLACES;
use crate::error::{Error, Result};
use crate::output::{CallEvent, OutputWriter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV format output writer.
pub struct CsvWriter {
    writer: BufWriter<File>,
}

impl CsvWriter {
    /// Create a new CSV writer.
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| Error::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_header(&mut self) -> Result<()> {
        writeln!(self.writer, "Start (s),End (s),Sex,Density,File")?;
        Ok(())
    }

    fn write_event(&mut self, event: &CallEvent) -> Result<()> {
        writeln!(
            self.writer,
            "{:.2},{:.2},{},{:.decimal$},{}",
            event.start_time,
            event.end_time,
            event.sex,
            event.density,
            escape_csv(&event.file_path.display().to_string()),
            decimal = DENSITY_DECIMAL_PLACES,
        )?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Escape a value for CSV output.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
