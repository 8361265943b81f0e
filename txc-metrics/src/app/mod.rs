mod inspect_ops;
mod operation;
mod txc_app;

pub use inspect_ops::{inspect_source, DocumentInspection};
pub use operation::TxcOperation;
pub use txc_app::TxcApp;
