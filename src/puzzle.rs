//! Puzzle controller: tile collection, selection, and the placement state
//! machine.
//!
//! Conceptually each tile is in one of three states: scattered (no cell,
//! sitting wherever the shuffle or a failed drop left it), selected (tracked
//! by the pointer, visually emphasized, optionally press-enlarged), or
//! placed (cell assigned, position snapped to the cell's pixel coordinate).
//! Selection is controller-owned because at most one tile may be
//! manipulated at a time; the placed set is an explicit cell-to-tile map so
//! neighbor lookups during drop evaluation are O(1).
//!
//! All mutation happens synchronously inside [`Puzzle::handle_event`]; the
//! controller is the sole mutator of selection and of any tile's cell.

use glam::{IVec2, Vec2};
use image::RgbaImage;
use log::{debug, info};
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::mask::tile_outline;
use crate::scene::{Backend, PointerEvent, TileVisual};
use crate::shape::{self, Tab, TileShape};
use crate::sprite::sample_sprite;
use crate::tile::{Tile, TileId};

/// Opacity applied to the selected tile.
const SELECTED_OPACITY: f32 = 0.5;

/// Cosmetic enlargement applied by a press while selected.
const ZOOM_SCALE_ON_DRAG: f32 = 1.25;

/// The four neighbor directions with the facing tab accessors: the
/// candidate's own tab on the shared edge, and the neighbor's.
const NEIGHBOR_CHECKS: [(IVec2, fn(&TileShape) -> Tab, fn(&TileShape) -> Tab); 4] = [
    (IVec2::new(0, -1), |s| s.top, |s| s.bottom),
    (IVec2::new(1, 0), |s| s.right, |s| s.left),
    (IVec2::new(0, 1), |s| s.bottom, |s| s.top),
    (IVec2::new(-1, 0), |s| s.left, |s| s.right),
];

/// Controller-owned selection: at most one tile at a time.
#[derive(Clone, Copy, Debug)]
struct Selection {
    tile: TileId,
    /// Whether the press-to-zoom enlargement is currently applied.
    enlarged: bool,
}

/// A jigsaw puzzle: the tile collection plus all interaction state.
///
/// Tiles are created once by the constructor and never added or removed,
/// only repositioned.
pub struct Puzzle<V: TileVisual> {
    tile_size: u32,
    cols: usize,
    rows: usize,
    tiles: Vec<Tile<V>>,
    /// Cell -> tile for every currently placed tile.
    placed: FxHashMap<(i32, i32), TileId>,
    selection: Option<Selection>,
}

impl<V: TileVisual> Puzzle<V> {
    /// Builds a puzzle from a source image.
    ///
    /// Grid dimensions are `ceil(image dims / tile_size)`, so the last
    /// row/column of a non-divisible image samples partially outside the
    /// source. Tiles are scattered at randomized positions over the board
    /// area.
    pub fn new<B: Backend<Visual = V>>(
        backend: &mut B,
        image: &RgbaImage,
        tile_size: u32,
        rng: &mut impl Rng,
    ) -> Self {
        assert!(tile_size > 0, "tile_size must be positive");

        let cols = image.width().div_ceil(tile_size) as usize;
        let rows = image.height().div_ceil(tile_size) as usize;
        let shapes = shape::generate(cols, rows, rng);

        let mut puzzle = Self::assemble(backend, shapes, cols, rows, tile_size, Some(image));
        puzzle.scatter(rng);

        info!(
            "created {} tiles ({}x{} grid, {}px tiles)",
            puzzle.tiles.len(),
            cols,
            rows,
            tile_size
        );
        puzzle
    }

    /// Builds a puzzle from explicit shapes and no image, all tiles at the
    /// origin. Headless construction for tests and bots; `new` is the
    /// normal path.
    pub fn with_shapes<B: Backend<Visual = V>>(
        backend: &mut B,
        shapes: Vec<TileShape>,
        cols: usize,
        rows: usize,
        tile_size: u32,
    ) -> Self {
        assert!(tile_size > 0, "tile_size must be positive");
        assert_eq!(shapes.len(), cols * rows, "shape count must match grid");
        Self::assemble(backend, shapes, cols, rows, tile_size, None)
    }

    fn assemble<B: Backend<Visual = V>>(
        backend: &mut B,
        shapes: Vec<TileShape>,
        cols: usize,
        rows: usize,
        tile_size: u32,
        image: Option<&RgbaImage>,
    ) -> Self {
        let blank = RgbaImage::new(1, 1);
        let mut tiles = Vec::with_capacity(cols * rows);

        for y in 0..rows {
            for x in 0..cols {
                let grid_pos = IVec2::new(x as i32, y as i32);
                let tile_shape = shapes[y * cols + x];
                let sprite = match image {
                    Some(image) => sample_sprite(image, grid_pos, tile_size),
                    None => blank.clone(),
                };
                let outline = tile_outline(&tile_shape, tile_size as f32);
                let visual = backend.create_tile(&sprite, &outline);
                tiles.push(Tile::new(tile_shape, grid_pos, visual));
            }
        }

        Self {
            tile_size,
            cols,
            rows,
            tiles,
            placed: FxHashMap::default(),
            selection: None,
        }
    }

    /// Moves every tile to a random position over the board area.
    fn scatter(&mut self, rng: &mut impl Rng) {
        let extent_x = (self.cols as u32 * self.tile_size) as f32;
        let extent_y = (self.rows as u32 * self.tile_size) as f32;
        for tile in &mut self.tiles {
            let x = if extent_x > 0.0 {
                rng.random_range(0.0..extent_x)
            } else {
                0.0
            };
            let y = if extent_y > 0.0 {
                rng.random_range(0.0..extent_y)
            } else {
                0.0
            };
            tile.move_to(Vec2::new(x, y));
        }
    }

    pub fn tiles(&self) -> &[Tile<V>] {
        &self.tiles
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of tiles currently snapped to a cell.
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    /// True when every tile is placed and all cells sit at one common
    /// translation of the solved grid.
    pub fn is_solved(&self) -> bool {
        let mut offset = None;
        for tile in &self.tiles {
            let Some(cell) = tile.cell else { return false };
            let tile_offset = cell - tile.grid_pos;
            match offset {
                None => offset = Some(tile_offset),
                Some(expected) if expected != tile_offset => return false,
                Some(_) => {}
            }
        }
        !self.tiles.is_empty()
    }

    /// Processes one pointer event to completion.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Move { hit, .. } => self.handle_move(hit),
            PointerEvent::Drag { delta } => self.handle_drag(delta),
            PointerEvent::Down { .. } => self.handle_down(),
            PointerEvent::Up => self.evaluate_drop(),
        }
    }

    /// Hover: the hit tile becomes the selection, the previous selection is
    /// restored. Events over empty canvas just clear the selection.
    fn handle_move(&mut self, hit: Option<TileId>) {
        if let (Some(selection), Some(hit)) = (&self.selection, hit) {
            if selection.tile == hit {
                return;
            }
        }

        if let Some(selection) = self.selection.take() {
            let tile = &mut self.tiles[selection.tile.0];
            tile.visual.set_opacity(1.0);
            if selection.enlarged {
                tile.visual.scale(1.0 / ZOOM_SCALE_ON_DRAG);
            }
        }

        if let Some(hit) = hit {
            self.tiles[hit.0].visual.set_opacity(SELECTED_OPACITY);
            self.selection = Some(Selection {
                tile: hit,
                enlarged: false,
            });
        }
    }

    /// Drag: translate the selected tile by the pointer delta. A placed
    /// tile that starts moving vacates its cell.
    fn handle_drag(&mut self, delta: Vec2) {
        let Some(selection) = &self.selection else {
            return;
        };
        let id = selection.tile;
        let tile = &mut self.tiles[id.0];

        if let Some(cell) = tile.cell.take() {
            self.placed.remove(&(cell.x, cell.y));
            debug!("tile {} lifted from cell ({}, {})", id.0, cell.x, cell.y);
        }

        let position = tile.position + delta;
        tile.move_to(position);
    }

    /// Press: first press while selected applies the cosmetic enlargement;
    /// a second press instead evaluates the drop.
    fn handle_down(&mut self) {
        let Some(selection) = &mut self.selection else {
            return;
        };
        if selection.enlarged {
            self.evaluate_drop();
        } else {
            selection.enlarged = true;
            let id = selection.tile;
            self.tiles[id.0].visual.scale(ZOOM_SCALE_ON_DRAG);
        }
    }

    /// Release: snap the selected tile into the nearest cell if nothing
    /// conflicts, otherwise leave it exactly where the drag ended.
    fn evaluate_drop(&mut self) {
        let Some(selection) = &self.selection else {
            return;
        };
        let id = selection.tile;

        let tile_size = self.tile_size as f32;
        let position = self.tiles[id.0].position;
        let cell = IVec2::new(
            (position.x / tile_size).round() as i32,
            (position.y / tile_size).round() as i32,
        );

        if self.drop_conflict(id, cell) {
            debug!("tile {} rejected at cell ({}, {})", id.0, cell.x, cell.y);
            return;
        }

        let selection = self.selection.take().expect("selection checked above");
        let tile = &mut self.tiles[id.0];
        if let Some(old) = tile.cell {
            self.placed.remove(&(old.x, old.y));
        }
        tile.move_to(Vec2::new(cell.x as f32 * tile_size, cell.y as f32 * tile_size));
        tile.cell = Some(cell);
        self.placed.insert((cell.x, cell.y), id);

        if selection.enlarged {
            tile.visual.scale(1.0 / ZOOM_SCALE_ON_DRAG);
        }
        tile.visual.set_opacity(1.0);
        debug!("tile {} placed at cell ({}, {})", id.0, cell.x, cell.y);
    }

    /// Checks a candidate cell for occupancy and shape-mismatch conflicts.
    ///
    /// The candidate tile itself never occupies-conflicts with its own cell,
    /// so re-evaluating an already placed tile is a no-op success. A drop
    /// with no placed neighbors and a free cell always succeeds: the first
    /// tile placed anywhere is a valid anchor.
    fn drop_conflict(&self, id: TileId, cell: IVec2) -> bool {
        if let Some(&occupant) = self.placed.get(&(cell.x, cell.y)) {
            if occupant != id {
                return true;
            }
        }

        let own_shape = self.tiles[id.0].shape;
        for (offset, own_tab, neighbor_tab) in NEIGHBOR_CHECKS {
            let neighbor_cell = cell + offset;
            if let Some(&neighbor) = self.placed.get(&(neighbor_cell.x, neighbor_cell.y)) {
                let neighbor_shape = self.tiles[neighbor.0].shape;
                if own_tab(&own_shape) + neighbor_tab(&neighbor_shape) != 0 {
                    return true;
                }
            }
        }

        false
    }
}
