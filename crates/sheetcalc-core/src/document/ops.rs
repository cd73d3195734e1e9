use sheetcalc_engine::{Address, EvalResult, evaluate_with};

use super::{CellData, CellStylePatch, Sheet};

impl Sheet {
    /// Commit user input to a cell.
    ///
    /// Input starting with `=` is stored as the formula and evaluated once
    /// against the store as it was before this commit. Anything else is
    /// stored as the value and clears a previous formula. The cell's style is
    /// kept. Returns the evaluation result for formula input.
    pub fn set_cell(&mut self, addr: Address, input: &str) -> Option<EvalResult> {
        let (value, formula, result) = if input.starts_with('=') {
            let result = self.evaluate(input);
            tracing::trace!(cell = %addr, formula = input, value = %result, "committed formula");
            (result.to_display_string(), Some(input.to_string()), Some(result))
        } else {
            (input.to_string(), None, None)
        };

        let cell = self.cells.entry(addr).or_default();
        cell.value = value;
        cell.formula = formula;
        result
    }

    /// Re-evaluate the stored formula of `addr` against the current store.
    ///
    /// Returns `None` when the cell holds no formula.
    pub fn resubmit(&mut self, addr: Address) -> Option<EvalResult> {
        let formula = self.cells.get(&addr)?.formula.clone()?;
        let result = self.evaluate(&formula);
        if let Some(cell) = self.cells.get_mut(&addr) {
            cell.value = result.to_display_string();
        }
        Some(result)
    }

    /// Evaluate a formula against the current store without storing it.
    pub fn evaluate(&self, formula: &str) -> EvalResult {
        evaluate_with(formula, self, &self.options)
    }

    pub fn cell(&self, addr: Address) -> Option<&CellData> {
        self.cells.get(&addr)
    }

    /// Display value of a cell; empty for a missing cell.
    pub fn display(&self, addr: Address) -> &str {
        self.cells.get(&addr).map_or("", |cell| cell.value.as_str())
    }

    pub fn formula(&self, addr: Address) -> Option<&str> {
        self.cells.get(&addr)?.formula.as_deref()
    }

    /// Remove a cell entirely, style included. Returns the removed data.
    pub fn clear_cell(&mut self, addr: Address) -> Option<CellData> {
        self.cells.remove(&addr)
    }

    /// Merge a style patch into a cell, creating an empty cell if needed.
    pub fn set_style(&mut self, addr: Address, patch: CellStylePatch) {
        let cell = self.cells.entry(addr).or_default();
        cell.style.get_or_insert_with(Default::default).apply(patch);
    }
}
