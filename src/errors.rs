//! Error types for limn.

use thiserror::Error;

use crate::generator::GenerateError;
use crate::scanner::ScanError;

/// Top-level error type for limn operations.
#[derive(Debug, Error)]
pub enum LimnError {
    #[error("{0}")]
    Config(String),

    #[error("failed to scan directory: {0}")]
    Scan(#[from] ScanError),

    #[error("failed to generate diagram: {0}")]
    Generate(#[from] GenerateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Map an error to its exit code.
pub fn exit_code(error: &LimnError) -> i32 {
    match error {
        LimnError::Config(_) => 2,
        LimnError::Scan(_) => 3,
        LimnError::Generate(GenerateError::InvalidInstructions) => 4,
        LimnError::Generate(_) => 5,
        LimnError::Io(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        let config = LimnError::Config("missing key".into());
        let generate = LimnError::Generate(GenerateError::Phase {
            phase: 1,
            source: ApiError::Api {
                status: 401,
                message: "bad key".into(),
            },
        });
        let invalid = LimnError::Generate(GenerateError::InvalidInstructions);

        assert_eq!(exit_code(&config), 2);
        assert_eq!(exit_code(&generate), 5);
        assert_eq!(exit_code(&invalid), 4);
    }

    #[test]
    fn test_phase_error_message_names_the_phase() {
        let err = LimnError::Generate(GenerateError::Phase {
            phase: 2,
            source: ApiError::Api {
                status: 500,
                message: "upstream".into(),
            },
        });
        assert!(err.to_string().contains("phase 2"));
    }
}
