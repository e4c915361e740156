//! Talk source implementations

mod csv_source;

pub use csv_source::CsvTalkSource;
