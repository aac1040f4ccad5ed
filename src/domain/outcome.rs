//! Structured result of a single demo step

use crate::shared::errors::ApiError;

/// Outcome of one step of the demo sequence.
///
/// Steps never propagate remote failures; they report them here so the
/// runner (and tests) can inspect what happened without parsing logs.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome<T> {
    /// The remote call succeeded.
    Success(T),
    /// The remote call failed and the step substituted its documented default.
    Fallback { value: T, error: ApiError },
    /// The remote call failed and the step has nothing to offer.
    Failure(ApiError),
}

impl<T> StepOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failure(_))
    }

    /// The usable value, whether fetched or substituted.
    pub fn value(&self) -> Option<&T> {
        match self {
            StepOutcome::Success(value) | StepOutcome::Fallback { value, .. } => Some(value),
            StepOutcome::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            StepOutcome::Success(value) | StepOutcome::Fallback { value, .. } => Some(value),
            StepOutcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            StepOutcome::Success(_) => None,
            StepOutcome::Fallback { error, .. } | StepOutcome::Failure(error) => Some(error),
        }
    }

    /// Turn a remote result into an outcome, substituting `default` on error.
    pub fn or_fallback(result: Result<T, ApiError>, default: impl FnOnce() -> T) -> Self {
        match result {
            Ok(value) => StepOutcome::Success(value),
            Err(error) => StepOutcome::Fallback { value: default(), error },
        }
    }
}

impl<T> From<Result<T, ApiError>> for StepOutcome<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => StepOutcome::Success(value),
            Err(error) => StepOutcome::Failure(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_still_has_value() {
        let outcome: StepOutcome<Vec<u8>> =
            StepOutcome::or_fallback(Err(ApiError::Transport("down".to_string())), Vec::new);

        assert!(!outcome.is_success());
        assert!(!outcome.is_failure());
        assert_eq!(outcome.value(), Some(&Vec::new()));
        assert!(outcome.error().is_some());
    }

    #[test]
    fn test_failure_from_result() {
        let outcome: StepOutcome<u32> = Err(ApiError::Decode("bad".to_string())).into();
        assert!(outcome.is_failure());
        assert_eq!(outcome.into_value(), None);

        let outcome: StepOutcome<u32> = Ok(7).into();
        assert!(outcome.is_success());
        assert_eq!(outcome.into_value(), Some(7));
    }
}
