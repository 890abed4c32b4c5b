use super::{AreaError, AreaShape, DirectionalAreaSet};

/// Declarative description of one canonical shape.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AreaTemplate {
    /// Explicit row-major cell codes (see [`AreaShape::from_codes`]).
    Matrix { rows: u32, cells: Vec<u32> },
    Wave { length: u32, spread: u32 },
    Circle { radius: u32 },
}

impl AreaTemplate {
    pub fn build(&self) -> Result<AreaShape, AreaError> {
        match self {
            AreaTemplate::Matrix { rows, cells } => AreaShape::from_codes(cells, *rows),
            AreaTemplate::Wave { length, spread } => AreaShape::wave(*length, *spread),
            AreaTemplate::Circle { radius } => AreaShape::circle(*radius),
        }
    }
}

/// A spell's area: a north-facing shape plus an optional north-west one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaDefinition {
    pub shape: AreaTemplate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub diagonal: Option<AreaTemplate>,
}

impl AreaDefinition {
    pub fn new(shape: AreaTemplate) -> Self {
        Self {
            shape,
            diagonal: None,
        }
    }

    pub fn with_diagonal(mut self, diagonal: AreaTemplate) -> Self {
        self.diagonal = Some(diagonal);
        self
    }

    pub fn build(&self) -> Result<DirectionalAreaSet, AreaError> {
        let set = DirectionalAreaSet::new(self.shape.build()?);
        match &self.diagonal {
            Some(diagonal) => Ok(set.with_diagonal(diagonal.build()?)),
            None => Ok(set),
        }
    }
}
