//! Aggregated result of a mutation.

use vfm_core::ErrorKind;

use crate::{OperationError, OperationType};

/// Result of a copy, move or delete.
///
/// Failures never escape the engine as errors; they are recorded here.
/// Aggregation is a logical AND: a single failure anywhere makes the whole
/// outcome fail, and the first failure decides `error_kind` and `message`.
#[derive(Debug, Clone)]
pub struct OperationOutcome {
    /// The type of operation.
    pub kind: OperationType,
    /// True only if every sub-operation succeeded.
    pub succeeded: bool,
    /// Kind of the first failure.
    pub error_kind: Option<ErrorKind>,
    /// Summary on success, first failure on error.
    pub message: String,
    /// Number of items successfully processed.
    pub processed: usize,
    /// Number of items that failed.
    pub failed: usize,
    /// Total bytes processed.
    pub bytes_processed: u64,
    /// Every error, in the order met.
    pub errors: Vec<OperationError>,
}

impl OperationOutcome {
    /// An outcome with nothing done yet.
    pub fn new(kind: OperationType) -> Self {
        Self {
            kind,
            succeeded: true,
            error_kind: None,
            message: String::new(),
            processed: 0,
            failed: 0,
            bytes_processed: 0,
            errors: Vec::new(),
        }
    }

    /// An outcome that failed before doing anything.
    pub fn rejected(kind: OperationType, error: impl Into<OperationError>) -> Self {
        let mut outcome = Self::new(kind);
        outcome.record_failure(error.into());
        outcome.finish()
    }

    /// Count one successful item.
    pub fn record_success(&mut self, bytes: u64) {
        self.processed += 1;
        self.bytes_processed += bytes;
    }

    /// Count one failed item.
    pub fn record_failure(&mut self, error: OperationError) {
        tracing::debug!(%error, "Operation step failed");
        if self.succeeded {
            self.succeeded = false;
            self.error_kind = Some(error.kind);
            self.message = error.to_string();
        }
        self.failed += 1;
        self.errors.push(error);
    }

    /// Fill in the success message once all steps are recorded.
    pub fn finish(mut self) -> Self {
        if self.succeeded {
            self.message = self.summary();
        }
        self
    }

    /// Check if the operation was fully successful.
    pub fn is_success(&self) -> bool {
        self.succeeded
    }

    /// Get a human-readable summary of the operation.
    pub fn summary(&self) -> String {
        let action = self.kind.past_tense();
        if self.failed == 0 {
            format!("{} {} items", action, self.processed)
        } else {
            format!("{} {} items, {} failed", action, self.processed, self.failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(name: &str, kind: ErrorKind) -> OperationError {
        OperationError::new(name, kind, "boom")
    }

    #[test]
    fn test_success_summary() {
        let mut outcome = OperationOutcome::new(OperationType::Copy);
        outcome.record_success(10);
        outcome.record_success(5);
        let outcome = outcome.finish();

        assert!(outcome.succeeded);
        assert_eq!(outcome.error_kind, None);
        assert_eq!(outcome.message, "Copied 2 items");
        assert_eq!(outcome.bytes_processed, 15);
    }

    #[test]
    fn test_first_failure_wins() {
        let mut outcome = OperationOutcome::new(OperationType::Delete);
        outcome.record_failure(error("/a", ErrorKind::IoFailure));
        outcome.record_success(0);
        outcome.record_failure(error("/b", ErrorKind::PathNotFound));
        let outcome = outcome.finish();

        assert!(!outcome.succeeded);
        assert_eq!(outcome.error_kind, Some(ErrorKind::IoFailure));
        assert!(outcome.message.starts_with("/a"));
        assert_eq!(outcome.errors.len(), 2);
        assert_eq!(outcome.summary(), "Deleted 1 items, 2 failed");
    }

    #[test]
    fn test_rejected() {
        let outcome = OperationOutcome::rejected(
            OperationType::Copy,
            error("/x", ErrorKind::DestinationAlreadyExists),
        );
        assert!(!outcome.is_success());
        assert_eq!(outcome.failed, 1);
    }
}
