//! File formats the sheet can be loaded from and saved to.

mod csv;

pub use self::csv::{read_csv, write_csv};
