use std::collections::HashMap;

use sheetcalc_engine::{Address, CellSource, EvalOptions};

use super::{CellData, Clipboard};

/// UI-agnostic cell store for one sheet.
///
/// Every mutation takes `&mut self`; the formula engine only ever sees the
/// store through its [`CellSource`] impl.
#[derive(Debug, Default)]
pub struct Sheet {
    pub(crate) cells: HashMap<Address, CellData>,
    pub(crate) clipboard: Option<Clipboard>,
    /// Options used for every evaluation against this sheet
    pub options: EvalOptions,
}

impl Sheet {
    /// Create an empty sheet with default evaluation options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EvalOptions) -> Self {
        Sheet {
            options,
            ..Sheet::default()
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Stored cells in row-major order.
    pub fn cells(&self) -> Vec<(Address, &CellData)> {
        let mut cells: Vec<_> = self.cells.iter().map(|(a, c)| (*a, c)).collect();
        cells.sort_by_key(|(addr, _)| *addr);
        cells
    }

    /// Largest used column and row, or `None` for an empty sheet.
    pub fn extent(&self) -> Option<(u32, u32)> {
        self.cells.keys().fold(None, |acc, addr| {
            let (col, row) = acc.unwrap_or((0, 0));
            Some((col.max(addr.column()), row.max(addr.row())))
        })
    }

    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }
}

impl CellSource for Sheet {
    fn cell_text(&self, addr: &Address) -> Option<&str> {
        self.cells.get(addr).map(|cell| cell.value.as_str())
    }
}
