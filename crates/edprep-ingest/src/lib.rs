pub mod csv_table;
pub mod discovery;
pub mod writer;

pub use csv_table::{read_table, read_table_from_reader};
pub use discovery::{TableSource, resolve_table_sources};
pub use writer::write_table;
