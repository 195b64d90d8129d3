//! Domain services for Client Book.
//!
//! Services contain logic that operates on domain models without touching
//! the database.

pub mod events;
pub mod export;
pub mod search;

pub use events::{MemoryEventSink, RecordEvent, RecordEventSink, TracingEventSink};
pub use export::{render_csv, render_json, CSV_DELIMITER, CSV_HEADER, UTF8_BOM};
pub use search::merge_search_results;
