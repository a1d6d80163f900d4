pub mod csv;
pub mod json;
pub mod memory;
pub mod text;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "mongo")]
pub mod mongo;

pub use self::csv::CsvSink;
pub use json::JsonLinesSink;
pub use memory::MemorySink;
pub use text::TextSink;

#[cfg(feature = "sqlite")]
pub use sqlite::{load_records, SqliteSink, StoredSummary};

#[cfg(feature = "mongo")]
pub use mongo::MongoSink;
