//! File access for rollcall: delimited tables, JSON documents and paths

mod io;
mod paths;
mod table;

pub use io::{atomic_write, read_json};
pub use paths::Paths;
pub use table::{read_table, RawTable, TableError};
