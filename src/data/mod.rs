//! Data module - CSV loading, filtering and export

mod exporter;
mod loader;
mod processor;

pub use exporter::write_csv;
pub use loader::RecordLoader;
pub use processor::{Filters, RecordProcessor};

#[cfg(test)]
pub use processor::km_marker;

pub const ID_COLUMN: &str = "ID";
pub const OLD_ID_COLUMN: &str = "oldID";
pub const KM_COLUMN: &str = "KM";
