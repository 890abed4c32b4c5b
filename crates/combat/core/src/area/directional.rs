use super::{AreaError, AreaShape};
use crate::state::{Direction, Position};

static EMPTY_SHAPE: AreaShape = AreaShape::EMPTY;

/// One shape per compass direction, derived from canonical definitions.
///
/// The cardinal half comes from a north-facing shape, the optional diagonal
/// half from a north-west-facing one. Sets are built once when a spell is
/// defined and shared read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectionalAreaSet {
    shapes: [Option<AreaShape>; 8],
    extended: bool,
}

impl DirectionalAreaSet {
    /// Four-entry set from a north-facing canonical shape.
    pub fn new(canonical: AreaShape) -> Self {
        Self::default().with_cardinal(canonical)
    }

    /// Populates north, east, south and west.
    pub fn with_cardinal(mut self, north: AreaShape) -> Self {
        self.shapes[Direction::East.index()] = Some(north.rotate90());
        self.shapes[Direction::South.index()] = Some(north.rotate180());
        self.shapes[Direction::West.index()] = Some(north.rotate270());
        self.shapes[Direction::North.index()] = Some(north);
        self
    }

    /// Populates the diagonals from a north-west-facing shape and marks the
    /// set as extended.
    pub fn with_diagonal(mut self, north_west: AreaShape) -> Self {
        self.shapes[Direction::NorthEast.index()] = Some(north_west.mirror());
        self.shapes[Direction::SouthWest.index()] = Some(north_west.flip());
        self.shapes[Direction::SouthEast.index()] = Some(north_west.transpose());
        self.shapes[Direction::NorthWest.index()] = Some(north_west);
        self.extended = true;
        self
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }

    pub fn get(&self, direction: Direction) -> Option<&AreaShape> {
        self.shapes[direction.index()].as_ref()
    }

    /// Orientation used for an invocation from `caster` aimed at `target`.
    ///
    /// The x axis wins over y for plain sets; extended sets pick the diagonal
    /// whenever both axes differ.
    pub fn direction_for(&self, caster: Position, target: Position) -> Direction {
        let dx = target.x - caster.x;
        let dy = target.y - caster.y;

        if self.extended && dx != 0 && dy != 0 {
            return match (dx < 0, dy < 0) {
                (true, true) => Direction::NorthWest,
                (true, false) => Direction::SouthWest,
                (false, true) => Direction::NorthEast,
                (false, false) => Direction::SouthEast,
            };
        }

        if dx < 0 {
            Direction::West
        } else if dx > 0 {
            Direction::East
        } else if dy < 0 {
            Direction::North
        } else {
            Direction::South
        }
    }

    /// Like [`select`](Self::select) but reports unpopulated directions.
    pub fn try_select(
        &self,
        caster: Position,
        target: Position,
    ) -> Result<&AreaShape, AreaError> {
        let direction = self.direction_for(caster, target);
        self.get(direction)
            .ok_or(AreaError::UnpopulatedDirection(direction))
    }

    /// Shape for an invocation from `caster` aimed at `target`.
    ///
    /// An unpopulated direction is a configuration defect: debug builds
    /// panic, release builds log and fall back to the empty shape.
    pub fn select(&self, caster: Position, target: Position) -> &AreaShape {
        match self.try_select(caster, target) {
            Ok(shape) => shape,
            Err(err) => {
                tracing::error!(%caster, %target, error = %err, "area selection failed");
                if cfg!(debug_assertions) {
                    panic!("unpopulated area direction: {err}");
                }
                &EMPTY_SHAPE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beam() -> AreaShape {
        AreaShape::wave(3, 0).unwrap()
    }

    fn corner() -> AreaShape {
        AreaShape::from_codes(&[1, 1, 0, 3], 2).unwrap()
    }

    #[test]
    fn plain_set_collapses_diagonals() {
        let set = DirectionalAreaSet::new(beam());
        let origin = Position::new(10, 10, 7);

        let cases = [
            ((-1, -1), Direction::West),
            ((-1, 0), Direction::West),
            ((-1, 1), Direction::West),
            ((1, -1), Direction::East),
            ((1, 0), Direction::East),
            ((1, 1), Direction::East),
            ((0, -1), Direction::North),
            ((0, 1), Direction::South),
            ((0, 0), Direction::South),
        ];
        for ((dx, dy), expected) in cases {
            let target = Position::new(10 + dx, 10 + dy, 7);
            assert_eq!(set.direction_for(origin, target), expected, "dx={dx} dy={dy}");
            assert!(set.try_select(origin, target).is_ok());
        }
    }

    #[test]
    fn extended_set_uses_diagonals() {
        let set = DirectionalAreaSet::new(beam()).with_diagonal(corner());
        assert!(set.is_extended());
        let origin = Position::new(0, 0, 7);

        let cases = [
            ((-2, -1), Direction::NorthWest),
            ((3, -1), Direction::NorthEast),
            ((-1, 4), Direction::SouthWest),
            ((1, 1), Direction::SouthEast),
            ((0, -3), Direction::North),
            ((5, 0), Direction::East),
        ];
        for ((dx, dy), expected) in cases {
            let target = Position::new(dx, dy, 7);
            assert_eq!(set.direction_for(origin, target), expected, "dx={dx} dy={dy}");
            assert!(set.try_select(origin, target).is_ok());
        }
    }

    #[test]
    fn diagonal_shapes_follow_reflections() {
        let set = DirectionalAreaSet::new(beam()).with_diagonal(corner());
        let north_west = corner();
        assert_eq!(set.get(Direction::NorthWest), Some(&north_west));
        assert_eq!(set.get(Direction::NorthEast), Some(&north_west.mirror()));
        assert_eq!(set.get(Direction::SouthWest), Some(&north_west.flip()));
        assert_eq!(set.get(Direction::SouthEast), Some(&north_west.transpose()));
    }

    #[test]
    fn diagonal_only_set_reports_missing_cardinals() {
        let set = DirectionalAreaSet::default().with_diagonal(corner());
        let origin = Position::new(0, 0, 7);
        assert!(matches!(
            set.try_select(origin, Position::new(0, -2, 7)),
            Err(AreaError::UnpopulatedDirection(Direction::North))
        ));
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "unpopulated area direction"))]
    fn unpopulated_select_degrades_to_empty() {
        let set = DirectionalAreaSet::default();
        let origin = Position::new(0, 0, 7);
        assert!(set.select(origin, Position::new(1, 0, 7)).is_empty());
    }
}
