//! Sheet state and logic (UI-agnostic).

mod cell;
mod clipboard;
mod io;
mod ops;
mod state;

pub use cell::{CellData, CellStyle, CellStylePatch};
pub use clipboard::{Clipboard, ClipboardKind, PasteOptions};
pub use state::Sheet;
