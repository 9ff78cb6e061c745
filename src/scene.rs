//! The consumed rendering capability, as traits.
//!
//! The puzzle core never talks to a concrete canvas. It builds tile visuals
//! through a [`Backend`] and mutates them through [`TileVisual`], and it
//! receives an already-hit-tested [`PointerEvent`] stream from whatever
//! windowing layer hosts the puzzle. The kiss3d viewer in the binary is one
//! implementation; tests use an in-memory stub.

use glam::Vec2;
use image::RgbaImage;

use crate::mask::TileOutline;
use crate::tile::TileId;

/// Handle to one tile's on-canvas representation.
///
/// Owned exclusively by its [`Tile`](crate::tile::Tile) and dropped with it.
pub trait TileVisual {
    /// Moves the visual so its tile-local origin sits at `position`.
    fn set_position(&mut self, position: Vec2);

    /// Sets the visual's opacity in [0, 1].
    fn set_opacity(&mut self, opacity: f32);

    /// Multiplies the visual's scale by `factor` (cosmetic zoom only).
    fn scale(&mut self, factor: f32);
}

/// Constructs tile visuals from a sampled sprite and its clip outline.
pub trait Backend {
    type Visual: TileVisual;

    /// Composes the sprite, clipped to the outline, with a stroked border
    /// clone of the same outline, into one movable visual unit.
    fn create_tile(&mut self, sprite: &RgbaImage, outline: &TileOutline) -> Self::Visual;
}

/// One pointer event, dispatched synchronously and in temporal order.
///
/// `Move` carries the hit-test result so the core never inspects the scene
/// itself; events over empty canvas arrive with `hit: None`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Button press at `point`.
    Down { point: Vec2 },
    /// Cursor motion without a button held.
    Move { point: Vec2, hit: Option<TileId> },
    /// Cursor motion with the button held, as a movement delta.
    Drag { delta: Vec2 },
    /// Button release.
    Up,
}
