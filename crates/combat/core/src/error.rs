//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (`AreaError`, `FormulaError`, `ApplyError`, ...) are
//! defined next to the code that produces them. Authorization denials are not
//! errors at all: they are [`crate::auth::Verdict`] values.
//!
//! # Design Principles
//!
//! - **Nothing is fatal to the host**: every error in this crate degrades to
//!   "no effect" for one target or one invocation
//! - **Severity Classification**: errors are categorized so the caller can
//!   decide between logging, user feedback, or a bug report
//! - **Stable codes**: `error_code` strings are safe to use in metrics

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Temporary conditions (target moved away, mutation raced)
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Configuration defects or misbehaving collaborators
/// - **Fatal**: A required collaborator is missing entirely
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the next invocation may succeed.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    Validation,

    /// Internal error - configuration defect or collaborator bug.
    ///
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - the engine cannot run without the missing piece.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
