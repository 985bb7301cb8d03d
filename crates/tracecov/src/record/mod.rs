//! Persisted execution records written by the external line tracer.

mod parser;
mod reload;

pub use parser::{
    normalize_path, parse_line_list, parse_record, RawExecutionRecord, RecordEntry, RecordFile,
};
pub use reload::RecordReloader;
