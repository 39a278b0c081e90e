//! Severity of compile errors reported by the engine.
//!
//! Severity depends on the build mode only, never on the kind of error:
//! production builds stop at the first error, development builds keep the
//! watch process alive and keep serving the last good output.

use std::fmt;

use serde::Serialize;

use crate::axes::{BuildAxes, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Abort the job on the first compile error
    Bail,
    /// Report compile errors and continue
    Tolerate,
}

impl FailurePolicy {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Production => FailurePolicy::Bail,
            Mode::Development => FailurePolicy::Tolerate,
        }
    }

    pub fn for_axes(axes: &BuildAxes) -> Self {
        Self::for_mode(axes.mode())
    }

    pub fn bails(&self) -> bool {
        *self == FailurePolicy::Bail
    }

    /// Wrap an engine error message with the severity of this policy.
    pub fn classify(&self, message: impl Into<String>) -> BuildIssue {
        let message = message.into();
        match self {
            FailurePolicy::Bail => {
                tracing::error!(%message, "Compile error, aborting build");
                BuildIssue::Fatal(message)
            }
            FailurePolicy::Tolerate => {
                tracing::warn!(%message, "Compile error, build continues");
                BuildIssue::Soft(message)
            }
        }
    }
}

/// A compile error with its severity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildIssue {
    /// The job fails and the process must exit non-zero
    Fatal(String),
    /// Logged; previously built output stays servable
    Soft(String),
}

impl BuildIssue {
    pub fn is_fatal(&self) -> bool {
        matches!(self, BuildIssue::Fatal(_))
    }

    pub fn message(&self) -> &str {
        match self {
            BuildIssue::Fatal(message) | BuildIssue::Soft(message) => message,
        }
    }

    /// Process exit code the issue implies
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() { 1 } else { 0 }
    }
}

impl fmt::Display for BuildIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildIssue::Fatal(message) => write!(f, "fatal: {}", message),
            BuildIssue::Soft(message) => write!(f, "error (continuing): {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_follows_mode() {
        assert_eq!(FailurePolicy::for_mode(Mode::Production), FailurePolicy::Bail);
        assert_eq!(FailurePolicy::for_mode(Mode::Development), FailurePolicy::Tolerate);
    }

    #[test]
    fn classification_depends_on_policy_only() {
        let message = "Module not found: ./missing";
        let fatal = FailurePolicy::Bail.classify(message);
        let soft = FailurePolicy::Tolerate.classify(message);

        assert!(fatal.is_fatal());
        assert_eq!(fatal.exit_code(), 1);
        assert!(!soft.is_fatal());
        assert_eq!(soft.exit_code(), 0);
        assert_eq!(fatal.message(), soft.message());
    }

    #[test]
    fn display_marks_severity() {
        assert!(BuildIssue::Fatal("x".into()).to_string().starts_with("fatal"));
        assert!(BuildIssue::Soft("x".into()).to_string().contains("continuing"));
    }
}
