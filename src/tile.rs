//! Per-tile state.

use glam::{IVec2, Vec2};

use crate::scene::TileVisual;
use crate::shape::TileShape;

/// Index of a tile in its puzzle's collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileId(pub usize);

/// One jigsaw tile.
///
/// The shape and grid position are fixed at construction; only the
/// continuous position and the snapped cell change during play. The cell is
/// `None` while the tile is scattered or mid-drag and is assigned only by a
/// successful drop.
pub struct Tile<V: TileVisual> {
    /// Edge tabs, shared-edge-consistent with the rest of the grid.
    pub shape: TileShape,
    /// Intended slot in the solved puzzle (identity, immutable).
    pub grid_pos: IVec2,
    /// Current continuous on-canvas position.
    pub position: Vec2,
    /// Current snapped cell, set only while placed.
    pub cell: Option<IVec2>,
    /// On-canvas representation, dropped with the tile.
    pub visual: V,
}

impl<V: TileVisual> Tile<V> {
    pub fn new(shape: TileShape, grid_pos: IVec2, visual: V) -> Self {
        Self {
            shape,
            grid_pos,
            position: Vec2::ZERO,
            cell: None,
            visual,
        }
    }

    /// Moves the tile and its visual to `position`.
    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
        self.visual.set_position(position);
    }
}
