//! Spreadsheet access
//!
//! Loads a worksheet into a uniform [`Grid`], resolving merged ranges so
//! every covered cell carries the top-left value.

mod grid;
mod loader;

pub use grid::{CellValue, Grid, MergedRange};
pub use loader::GridLoader;
