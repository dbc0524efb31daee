//! Error types. Subsystem errors convert into [`VitalityError`] via `From`.

mod storage_error;
mod vitality_error;

pub use storage_error::StorageError;
pub use vitality_error::{VitalityError, VitalityResult};
