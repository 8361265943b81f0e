//! runs the route metrics extraction over a collection of schedule inputs,
//! isolating failures per input and per document, and writes the results.
mod archive_outcome;
mod area_summary;
mod batch_ops;
mod batch_summary;
mod document_outcome;
mod failure_row;
mod writer_ops;

pub use archive_outcome::ArchiveOutcome;
pub use area_summary::{AreaSummary, AreaType};
pub use batch_ops::{process_archive, process_archives, process_document, BatchResult};
pub use batch_summary::BatchSummary;
pub use document_outcome::DocumentOutcome;
pub use failure_row::FailureRow;
pub use writer_ops::{
    check_overwrite, create_dirs, write_area_summaries, write_failures, write_records,
    write_summary_json,
};
