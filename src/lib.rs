//! Jigsaw Puzzle Engine Library
//!
//! Decomposes an image into a grid of interlocking tiles with randomized
//! tab/blank edge shapes and runs the drag-and-snap placement logic. The
//! rendering canvas and the OS pointer stream stay behind the traits in
//! [`scene`], so the core is headless and fully testable.

pub mod mask;
pub mod puzzle;
pub mod scene;
pub mod shape;
pub mod sprite;
pub mod tile;

pub use mask::{tile_outline, CubicSegment, TileOutline};
pub use puzzle::Puzzle;
pub use scene::{Backend, PointerEvent, TileVisual};
pub use shape::{format_shapes, generate, Tab, TileShape};
pub use sprite::{margin_width, sample_sprite, TILE_MARGIN_RATIO};
pub use tile::{Tile, TileId};
