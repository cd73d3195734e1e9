//! Copy, cut and paste of cell data.

use sheetcalc_engine::Address;
use sheetcalc_engine::engine::offset_formula_references;

use super::{CellData, Sheet};
use crate::error::{Result, SheetError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipboardKind {
    Copy,
    Cut,
}

/// Cells captured by [`Sheet::copy`] or [`Sheet::cut`], in the order they
/// were requested. The first entry anchors the paste offset.
#[derive(Clone, Debug, PartialEq)]
pub struct Clipboard {
    pub kind: ClipboardKind,
    pub cells: Vec<(Address, CellData)>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasteOptions {
    /// Shift formula references by the paste offset and re-evaluate the
    /// pasted formulas. When off, cell data is pasted verbatim.
    pub adjust_references: bool,
}

impl Sheet {
    /// Put copies of the existing cells among `addrs` on the clipboard.
    /// Returns the number of cells captured.
    pub fn copy(&mut self, addrs: &[Address]) -> usize {
        self.capture(addrs, ClipboardKind::Copy)
    }

    /// Like [`Sheet::copy`], then remove the captured cells from the sheet.
    pub fn cut(&mut self, addrs: &[Address]) -> usize {
        let count = self.capture(addrs, ClipboardKind::Cut);
        for addr in addrs {
            self.cells.remove(addr);
        }
        count
    }

    fn capture(&mut self, addrs: &[Address], kind: ClipboardKind) -> usize {
        let mut cells: Vec<(Address, CellData)> = Vec::new();
        for addr in addrs {
            if cells.iter().any(|(a, _)| a == addr) {
                continue;
            }
            if let Some(cell) = self.cells.get(addr) {
                cells.push((*addr, cell.clone()));
            }
        }
        tracing::debug!(?kind, cells = cells.len(), "clipboard captured");
        let count = cells.len();
        self.clipboard = Some(Clipboard { kind, cells });
        count
    }

    /// Paste the clipboard so that its first cell lands on `target`.
    ///
    /// Every other cell keeps its position relative to the first. Cells that
    /// would land left of column A or above row 1 are dropped. A cut
    /// clipboard is consumed. Returns the number of cells written.
    pub fn paste(&mut self, target: Address, options: PasteOptions) -> Result<usize> {
        let clipboard = self.clipboard.as_ref().ok_or(SheetError::EmptyClipboard)?;
        let Some((anchor, _)) = clipboard.cells.first() else {
            return Err(SheetError::EmptyClipboard);
        };

        let delta_col = i64::from(target.column()) - i64::from(anchor.column());
        let delta_row = i64::from(target.row()) - i64::from(anchor.row());

        let mut placed = Vec::new();
        for (addr, cell) in &clipboard.cells {
            let Some(dest) = addr.offset(delta_col, delta_row) else {
                continue;
            };
            let mut cell = cell.clone();
            if options.adjust_references
                && let Some(formula) = &cell.formula
            {
                cell.formula = Some(offset_formula_references(formula, delta_col, delta_row));
            }
            placed.push((dest, cell));
        }

        let kind = clipboard.kind;
        let count = placed.len();
        let mut shifted_formulas = Vec::new();
        for (dest, cell) in placed {
            if options.adjust_references && cell.is_formula() {
                shifted_formulas.push(dest);
            }
            self.cells.insert(dest, cell);
        }
        for dest in shifted_formulas {
            self.resubmit(dest);
        }

        if kind == ClipboardKind::Cut {
            self.clipboard = None;
        }
        tracing::debug!(%target, delta_col, delta_row, cells = count, "pasted clipboard");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetcalc_engine::parse_address;

    fn addr(s: &str) -> Address {
        parse_address(s).unwrap()
    }

    fn addrs(list: &[&str]) -> Vec<Address> {
        list.iter().map(|s| addr(s)).collect()
    }

    #[test]
    fn test_copy_paste_offsets_from_first_cell() {
        let mut sheet = Sheet::new();
        sheet.set_cell(addr("A1"), "1");
        sheet.set_cell(addr("B2"), "2");

        assert_eq!(sheet.copy(&addrs(&["A1", "B2", "C3"])), 2);
        assert_eq!(sheet.paste(addr("D5"), PasteOptions::default()).unwrap(), 2);

        assert_eq!(sheet.display(addr("D5")), "1");
        assert_eq!(sheet.display(addr("E6")), "2");
        // Source untouched, clipboard still available.
        assert_eq!(sheet.display(addr("A1")), "1");
        assert!(sheet.paste(addr("A10"), PasteOptions::default()).is_ok());
    }

    #[test]
    fn test_paste_drops_cells_off_grid() {
        let mut sheet = Sheet::new();
        sheet.set_cell(addr("B2"), "anchor");
        sheet.set_cell(addr("A1"), "corner");

        sheet.copy(&addrs(&["B2", "A1"]));
        let pasted = sheet.paste(addr("A1"), PasteOptions::default()).unwrap();

        assert_eq!(pasted, 1);
        assert_eq!(sheet.display(addr("A1")), "anchor");
    }

    #[test]
    fn test_cut_removes_and_is_consumed() {
        let mut sheet = Sheet::new();
        sheet.set_cell(addr("A1"), "moved");

        assert_eq!(sheet.cut(&addrs(&["A1"])), 1);
        assert_eq!(sheet.cell(addr("A1")), None);
        assert_eq!(sheet.clipboard().map(|c| c.kind), Some(ClipboardKind::Cut));

        sheet.paste(addr("C1"), PasteOptions::default()).unwrap();
        assert_eq!(sheet.display(addr("C1")), "moved");
        assert!(sheet.clipboard().is_none());
        assert!(matches!(
            sheet.paste(addr("C2"), PasteOptions::default()),
            Err(SheetError::EmptyClipboard)
        ));
    }

    #[test]
    fn test_paste_without_clipboard() {
        let mut sheet = Sheet::new();
        assert!(matches!(
            sheet.paste(addr("A1"), PasteOptions::default()),
            Err(SheetError::EmptyClipboard)
        ));
        sheet.copy(&addrs(&["A1"]));
        assert!(matches!(
            sheet.paste(addr("A1"), PasteOptions::default()),
            Err(SheetError::EmptyClipboard)
        ));
    }

    #[test]
    fn test_paste_verbatim_keeps_formula_text_and_value() {
        let mut sheet = Sheet::new();
        sheet.set_cell(addr("A1"), "3");
        sheet.set_cell(addr("B1"), "=A1*2");

        sheet.copy(&addrs(&["B1"]));
        sheet.paste(addr("B2"), PasteOptions::default()).unwrap();

        assert_eq!(
            sheet.cell(addr("B2")),
            Some(&CellData {
                value: "6".into(),
                formula: Some("=A1*2".into()),
                style: None,
            })
        );
    }

    #[test]
    fn test_paste_adjusting_references_reevaluates() {
        let mut sheet = Sheet::new();
        sheet.set_cell(addr("A1"), "3");
        sheet.set_cell(addr("A2"), "10");
        sheet.set_cell(addr("B1"), "=A1*2");

        sheet.copy(&addrs(&["B1"]));
        let options = PasteOptions {
            adjust_references: true,
        };
        sheet.paste(addr("B2"), options).unwrap();

        assert_eq!(sheet.formula(addr("B2")), Some("=A2*2"));
        assert_eq!(sheet.display(addr("B2")), "20");
    }

    #[test]
    fn test_paste_adjusting_references_off_grid() {
        let mut sheet = Sheet::new();
        sheet.set_cell(addr("B2"), "=A1+1");

        sheet.copy(&addrs(&["B2"]));
        let options = PasteOptions {
            adjust_references: true,
        };
        sheet.paste(addr("A2"), options).unwrap();

        assert_eq!(sheet.formula(addr("A2")), Some("=#REF!+1"));
        assert_eq!(sheet.display(addr("A2")), "#ERROR!");
    }
}
