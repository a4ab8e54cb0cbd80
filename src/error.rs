//! Error types for shorthand batches.
//!
//! Every problem found while validating a batch is a [`SyntaxError`]; the
//! batch engine guarantees none of those leave the agent half-mutated.
//! Failures raised by the agent itself while executing are passed through
//! as [`AgentError`] unchanged.

use thiserror::Error;

use crate::agent::AgentError;

/// Why a command unit failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// The first token is neither an alias nor a canonical code.
    UnknownCommand,
    /// Fewer argument tokens than the command requires.
    MissingArgument,
    /// More argument tokens than the command accepts.
    TooManyArguments,
    /// An argument that should be a real number is not one.
    NotANumber,
    /// An argument that should be a whole number is not one.
    NotAnInteger,
    /// A non-negative argument was negative.
    Negative,
    /// A color argument is neither a known name, a hex code nor an RGB triple.
    InvalidColor,
}

/// A validation failure, carrying the raw unit text and the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error in `{unit}`: {}", self.reason())]
pub struct SyntaxError {
    /// Reason category.
    pub kind: SyntaxErrorKind,
    /// The unit text as the caller wrote it (trimmed).
    pub unit: String,
    /// The token the error is about.
    pub token: String,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, unit: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            kind,
            unit: unit.into(),
            token: token.into(),
        }
    }

    /// Human-readable reason, without the unit prefix.
    pub fn reason(&self) -> String {
        let token = &self.token;
        match self.kind {
            SyntaxErrorKind::UnknownCommand => format!("`{token}` is not a turtle shortcut"),
            SyntaxErrorKind::MissingArgument => {
                format!("`{token}` is missing a required argument")
            }
            SyntaxErrorKind::TooManyArguments => {
                format!("too many arguments, starting at `{token}`")
            }
            SyntaxErrorKind::NotANumber => format!("`{token}` is not a number"),
            SyntaxErrorKind::NotAnInteger => format!("`{token}` is not a whole number"),
            SyntaxErrorKind::Negative => format!("`{token}` must not be negative"),
            SyntaxErrorKind::InvalidColor => format!(
                "`{token}` is not a valid color; use a name like `red`, a hex code like \
                 `ff0000`, or three numbers like `1.0 0.5 0.0` or `255 0 255`"
            ),
        }
    }
}

/// Anything [`crate::run`] can fail with.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// Rejected during validation; nothing in the batch executed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The agent refused a call during execution.
    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl ShortcutError {
    /// The syntax error, if this failure happened before execution.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            ShortcutError::Syntax(err) => Some(err),
            ShortcutError::Agent(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_unit_and_token() {
        let err = SyntaxError::new(SyntaxErrorKind::NotANumber, "f abc", "abc");
        assert_eq!(err.to_string(), "syntax error in `f abc`: `abc` is not a number");
    }

    #[test]
    fn test_unknown_command_message() {
        let err = SyntaxError::new(SyntaxErrorKind::UnknownCommand, "zz 1", "zz");
        assert!(err.to_string().contains("`zz` is not a turtle shortcut"));
    }

    #[test]
    fn test_as_syntax() {
        let err: ShortcutError = SyntaxError::new(SyntaxErrorKind::MissingArgument, "f", "f").into();
        assert_eq!(err.as_syntax().map(|e| e.kind), Some(SyntaxErrorKind::MissingArgument));

        let err: ShortcutError = AgentError::UnknownColor("zzz".into()).into();
        assert!(err.as_syntax().is_none());
    }
}
