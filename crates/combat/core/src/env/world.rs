use crate::combat::FieldItem;
use crate::state::{Condition, EntityId, Position, Tile};

/// Spatial view of the world: cells, sight lines, occupancy, observers.
pub trait WorldOracle {
    /// Returns the cell at `position`, creating an empty placeholder when the
    /// world has none yet.
    fn tile_or_create(&self, position: Position) -> Tile;

    /// Line-of-sight check between two cells.
    fn is_sight_clear(&self, from: Position, to: Position, same_floor: bool) -> bool;

    /// Entities standing on `position`, in stacking order.
    fn occupants(&self, position: Position) -> Vec<EntityId>;

    /// The entity on top of the stack at `position`, if any.
    fn top_occupant(&self, position: Position) -> Option<EntityId> {
        self.occupants(position).first().copied()
    }

    /// Entities able to see effects inside the rectangle of half-extent
    /// `(range_x, range_y)` around `center`.
    fn observers(&self, center: Position, range_x: u32, range_y: u32) -> Vec<EntityId>;

    /// Condition applied by a damaging field to whoever steps into it.
    fn field_condition(&self, _field: FieldItem) -> Option<Condition> {
        None
    }
}
