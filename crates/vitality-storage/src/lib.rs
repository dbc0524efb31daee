//! # vitality-storage
//!
//! SQLite persistence. One connection behind a mutex; every unit of work is
//! an explicit transaction handed out through [`VitalityStorage`].
//!
//! [`VitalityStorage`]: vitality_core::traits::VitalityStorage

pub mod engine;
pub mod migrations;
pub mod pragmas;
pub mod queries;
pub mod transaction;

pub use engine::StorageEngine;
pub use transaction::SqliteTransaction;

use vitality_core::errors::{StorageError, VitalityError};

/// Wrap a SQLite failure message.
pub fn to_storage_err(message: String) -> VitalityError {
    VitalityError::StorageError(StorageError::SqliteError { message })
}
