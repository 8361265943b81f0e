mod input_ops;
mod raw_document;
mod schedule_source;

pub use input_ops::discover_inputs;
pub use raw_document::RawDocument;
pub use schedule_source::ScheduleSource;
