use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::{CellData, Sheet};
use crate::error::Result;
use crate::storage::{read_csv, write_csv};

impl Sheet {
    /// Merge CSV fields into the sheet starting at `A1`.
    ///
    /// Imported cells replace whatever was stored at their address and are
    /// never evaluated. Returns the number of cells imported.
    pub fn import_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let cells = read_csv(reader)?;
        let count = cells.len();
        for (addr, value) in cells {
            self.cells.insert(addr, CellData::plain(value));
        }
        tracing::debug!(cells = count, "imported CSV");
        Ok(count)
    }

    /// Write the sheet's display values as CSV.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<()> {
        write_csv(self, writer)?;
        tracing::debug!(cells = self.cells.len(), "exported CSV");
        Ok(())
    }

    pub fn import_csv_file(&mut self, path: &Path) -> Result<usize> {
        let file = File::open(path)?;
        self.import_csv(BufReader::new(file))
    }

    pub fn export_csv_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.export_csv(BufWriter::new(file))
    }
}
