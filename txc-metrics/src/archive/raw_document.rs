use crate::TxcError;

/// a schedule document read from a [`super::ScheduleSource`], prior to XML parsing.
#[derive(Debug)]
pub struct RawDocument {
    /// archive entry name, or the file name for a plain document
    pub name: String,
    /// document text, or the reason the entry could not be read
    pub contents: Result<String, TxcError>,
}

impl RawDocument {
    pub fn new(name: String, contents: Result<String, TxcError>) -> Self {
        Self { name, contents }
    }
}
