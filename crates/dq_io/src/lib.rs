//! # Dataset I/O
//!
//! Reads datasets from CSV through Arrow and persists pipeline outputs.
//!
//! ## Example
//!
//! ```rust
//! use dq_engine::CellValue;
//! use dq_io::read_csv_str;
//!
//! let dataset = read_csv_str("id,city\n1,Rome\n2,\n").unwrap();
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.get(0, "id"), Some(&CellValue::Int(1)));
//! assert_eq!(dataset.get(1, "city"), Some(&CellValue::Null));
//! ```

mod converter;
mod error;
mod reader;
mod writer;

pub use converter::*;
pub use error::*;
pub use reader::*;
pub use writer::*;
