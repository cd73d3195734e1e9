//! CSV import/export functionality

use std::io::{Read, Write};

use sheetcalc_engine::Address;

use crate::document::Sheet;
use crate::error::Result;

/// Parse CSV into `(address, value)` pairs placed from `A1`.
///
/// A record's row is the line it starts on, so blank lines keep their row.
/// Records may have different lengths. Values are trimmed and fields that
/// are empty after trimming are skipped. Nothing is evaluated, so a field
/// such as `=SUM(A1:A2)` is kept as plain text.
pub fn read_csv<R: Read>(mut reader: R) -> Result<Vec<(Address, String)>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut csv_reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_slice());

    let mut cells = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let Ok(row) = u32::try_from(record_line(&data, record.position())) else {
            continue;
        };
        for (col_idx, field) in record.iter().enumerate() {
            let value = field.trim();
            if value.is_empty() {
                continue;
            }
            let Ok(col) = u32::try_from(col_idx + 1) else {
                continue;
            };
            if let Some(addr) = Address::new(col, row) {
                cells.push((addr, value.to_string()));
            }
        }
    }

    Ok(cells)
}

/// Line a record's first field is on.
///
/// The reader stamps a record with where it started looking, which is before
/// any blank lines it skipped, so step over those line breaks here.
fn record_line(data: &[u8], position: Option<&::csv::Position>) -> u64 {
    let Some(pos) = position else {
        return 1;
    };
    let start = usize::try_from(pos.byte()).unwrap_or(data.len());
    let skipped = data
        .get(start..)
        .unwrap_or_default()
        .iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .filter(|&&b| b == b'\n')
        .count();
    pos.line() + skipped as u64
}

/// Write display values of rows `1..=max row` and columns `1..=max column`.
///
/// Missing cells are written as empty fields; quoting follows the `csv`
/// crate's defaults (only when needed). An empty sheet writes nothing.
pub fn write_csv<W: Write>(sheet: &Sheet, writer: W) -> Result<()> {
    let mut csv_writer = ::csv::WriterBuilder::new().from_writer(writer);

    if let Some((max_col, max_row)) = sheet.extent() {
        for row in 1..=max_row {
            let record: Vec<&str> = (1..=max_col)
                .map(|col| Address::new(col, row).map_or("", |addr| sheet.display(addr)))
                .collect();
            csv_writer.write_record(&record)?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}
