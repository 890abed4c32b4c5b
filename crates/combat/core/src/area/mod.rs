//! Area geometry: canonical shapes, their directional variants, and the
//! mapping of a shape onto world cells.
mod directional;
mod enumerate;
mod shape;
mod template;

pub use directional::DirectionalAreaSet;
pub use enumerate::{affected_tiles, enumerate};
pub use shape::{AreaShape, GridCell};
pub use template::{AreaDefinition, AreaTemplate};

use crate::error::{CombatError, ErrorSeverity};
use crate::state::Direction;

/// Area definition defects, caught when a spell is built.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AreaError {
    #[error("{len} cell codes cannot be split into {rows} rows")]
    RaggedGrid { len: usize, rows: u32 },

    #[error("cell {index} has unknown code {code}")]
    InvalidCode { index: usize, code: u32 },

    #[error("area has no anchor cell")]
    MissingAnchor,

    #[error("area has more than one anchor cell")]
    MultipleAnchors,

    #[error("wave length must be positive")]
    ZeroLength,

    #[error("circle radius {0} must be positive")]
    RadiusOutOfRange(u32),

    #[error("no shape configured for direction {0}")]
    UnpopulatedDirection(Direction),
}

impl CombatError for AreaError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AreaError::UnpopulatedDirection(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AreaError::RaggedGrid { .. } => "AREA_RAGGED_GRID",
            AreaError::InvalidCode { .. } => "AREA_INVALID_CODE",
            AreaError::MissingAnchor => "AREA_MISSING_ANCHOR",
            AreaError::MultipleAnchors => "AREA_MULTIPLE_ANCHORS",
            AreaError::ZeroLength => "AREA_ZERO_LENGTH",
            AreaError::RadiusOutOfRange(_) => "AREA_RADIUS_OUT_OF_RANGE",
            AreaError::UnpopulatedDirection(_) => "AREA_UNPOPULATED_DIRECTION",
        }
    }
}
