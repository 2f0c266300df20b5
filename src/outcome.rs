//! Result construction
//!
//! Turns the final state of a validation session into the public outcome:
//! a plain [`ValidationOutcome`] when the engine exited cleanly, or a
//! [`ValidatorError::ValidationFailed`] carrying the same payload otherwise.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidatorError};

/// Status token reported when the engine exits zero without a `result=` line
pub const STATUS_OK: &str = "OK";

/// Status token reported when the engine exits non-zero without a `result=` line
pub const STATUS_WITH_ERRORS: &str = "WITH_ERRORS";

/// Outcome of validating one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// True iff the engine exited with code zero
    pub valid: bool,
    /// Status token reported by the engine (or synthesized from its exit code)
    pub result: String,
    /// Diagnostic lines in the order the engine emitted them
    pub messages: Vec<String>,
}

impl ValidationOutcome {
    /// Human readable summary used as the error message of a failed validation
    pub fn describe(&self) -> String {
        let mut msg = format!("invalid xml (status={})", self.result);
        for message in &self.messages {
            msg.push_str("\n\t");
            msg.push_str(message);
        }
        msg
    }
}

/// Status token to use when the process exited before reporting one
pub fn synthesize_status(exit_code: i32) -> &'static str {
    if exit_code == 0 {
        STATUS_OK
    } else {
        STATUS_WITH_ERRORS
    }
}

/// Build the final result from the status token, exit code and diagnostics
pub fn build(status: String, exit_code: i32, messages: Vec<String>) -> Result<ValidationOutcome> {
    let outcome = ValidationOutcome {
        valid: exit_code == 0,
        result: status,
        messages,
    };

    if outcome.valid {
        Ok(outcome)
    } else {
        Err(ValidatorError::ValidationFailed(outcome))
    }
}
