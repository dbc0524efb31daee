use vitality_core::errors::*;

#[test]
fn relationship_not_found_carries_id() {
    let err = VitalityError::RelationshipNotFound {
        id: "rel-42".into(),
    };
    assert!(err.to_string().contains("rel-42"));
}

#[test]
fn learning_task_failure_carries_task_and_reason() {
    let err = VitalityError::LearningTaskFailed {
        task: "analyze-pattern".into(),
        reason: "store offline".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("analyze-pattern"));
    assert!(msg.contains("store offline"));
}

// --- From impls ---

#[test]
fn storage_error_converts_to_vitality_error() {
    let storage_err = StorageError::SqliteError {
        message: "disk full".into(),
    };
    let err: VitalityError = storage_err.into();
    assert!(matches!(err, VitalityError::StorageError(_)));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn serde_json_error_converts_to_serialization_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: VitalityError = json_err.into();
    assert!(matches!(err, VitalityError::SerializationError(_)));
}
