//! Collaborator errors.
//!
//! Errors raised by, or about, the oracles and the mutation sink. None of
//! these abort an invocation: the pipeline logs them and degrades to "no
//! effect" for the affected target.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::{EntityId, Position};

/// An optional oracle was required but not supplied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("FormulaOracle not available")]
    FormulasNotAvailable,

    #[error("ScriptOracle not available")]
    ScriptsNotAvailable,
}

impl CombatError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::FormulasNotAvailable => "ORACLE_FORMULAS_NOT_AVAILABLE",
            OracleError::ScriptsNotAvailable => "ORACLE_SCRIPTS_NOT_AVAILABLE",
        }
    }
}

/// Failures of the external min/max provider.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("formula provider failed: {0}")]
    Provider(String),

    #[error("formula provider exceeded its call depth")]
    CallDepthExceeded,
}

impl CombatError for FormulaError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            FormulaError::Oracle(err) => err.severity(),
            FormulaError::Provider(_) | FormulaError::CallDepthExceeded => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            FormulaError::Oracle(err) => err.error_code(),
            FormulaError::Provider(_) => "FORMULA_PROVIDER_FAILED",
            FormulaError::CallDepthExceeded => "FORMULA_CALL_DEPTH_EXCEEDED",
        }
    }
}

/// Failures of the tile/target script hooks.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("script hook failed: {0}")]
    Failed(String),

    #[error("script hook exceeded its call depth")]
    CallDepthExceeded,
}

impl CombatError for ScriptError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ScriptError::Oracle(err) => err.severity(),
            ScriptError::Failed(_) | ScriptError::CallDepthExceeded => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ScriptError::Oracle(err) => err.error_code(),
            ScriptError::Failed(_) => "SCRIPT_FAILED",
            ScriptError::CallDepthExceeded => "SCRIPT_CALL_DEPTH_EXCEEDED",
        }
    }
}

/// The world refused a state mutation requested by the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error("entity {0} no longer exists")]
    TargetGone(EntityId),

    #[error("entity {0} rejected the change")]
    Rejected(EntityId),

    #[error("cell {0} refused the item")]
    ItemRejected(Position),
}

impl CombatError for ApplyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ApplyError::TargetGone(_) => ErrorSeverity::Recoverable,
            ApplyError::Rejected(_) | ApplyError::ItemRejected(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApplyError::TargetGone(_) => "APPLY_TARGET_GONE",
            ApplyError::Rejected(_) => "APPLY_REJECTED",
            ApplyError::ItemRejected(_) => "APPLY_ITEM_REJECTED",
        }
    }
}
