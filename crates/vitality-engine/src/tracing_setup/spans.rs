//! Span constructors per operation.

/// Span around one interaction log.
#[macro_export]
macro_rules! weave_span {
    ($participants:expr) => {
        tracing::info_span!("vitality.weave", participants = $participants)
    };
}

/// Span around a learning batch.
#[macro_export]
macro_rules! learning_span {
    ($task_count:expr) => {
        tracing::info_span!("vitality.learning", task_count = $task_count)
    };
}

/// Span around an outcome maturation pass.
#[macro_export]
macro_rules! measurement_span {
    ($outcome_count:expr) => {
        tracing::info_span!("vitality.measurement", outcome_count = $outcome_count)
    };
}

/// Span around a milestone check.
#[macro_export]
macro_rules! milestone_span {
    ($scope:expr) => {
        tracing::info_span!("vitality.milestones", scope = %$scope)
    };
}

/// Span around a dormancy sweep.
#[macro_export]
macro_rules! dormancy_span {
    ($relationship_count:expr) => {
        tracing::info_span!("vitality.dormancy", relationship_count = $relationship_count)
    };
}
