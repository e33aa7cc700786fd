//! Instance files in, route listings and JSON reports out.

mod reader;
mod writer;

pub use reader::{parse_instance, read_instance};
pub use writer::{format_solution, write_report_json, write_solution};
