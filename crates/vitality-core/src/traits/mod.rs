//! Seams between the engine and its collaborators.

mod storage;

pub use storage::{
    BadgeRepo, InteractionRepo, OutcomeRepo, RelationshipRepo, Transaction, VitalityStorage,
};
