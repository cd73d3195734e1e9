//! sheetcalc-core - UI-agnostic cell store, clipboard, CSV storage and chart series.

pub mod chart;
pub mod document;
pub mod error;
pub mod storage;

pub use chart::SeriesPoint;
pub use document::{CellData, CellStyle, CellStylePatch, Clipboard, ClipboardKind, PasteOptions, Sheet};
pub use error::{Result, SheetError};

pub use sheetcalc_engine::{Address, EvalOptions, EvalResult, Range};
