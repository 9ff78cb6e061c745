//! Interactive 2D puzzle viewer using kiss3d.
//!
//! This is the one concrete rendering backend: it composes each tile's
//! masked sprite into a textured scene node, strokes the curved outlines,
//! hit-tests the cursor against the flattened outlines, and feeds the
//! resulting pointer events to the puzzle controller.

use glam::{Mat3, Vec2, Vec3};
use image::{DynamicImage, RgbaImage};
use kiss3d::prelude::*;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use jigsaw::mask::{point_in_polygon, TileOutline};
use jigsaw::sprite::margin_width;
use jigsaw::{Backend, PointerEvent, Puzzle, TileId, TileVisual};

/// Samples per cubic segment when flattening outlines for masking and
/// hit-testing.
const FLATTEN_STEPS: usize = 8;

/// Border stroke color.
fn border_color() -> Color {
    Color::new(0.8, 0.8, 0.8, 1.0)
}

/// Camera mapping world coordinates one-to-one to window pixels, with the
/// origin at the top-left corner and y pointing down — the space the puzzle
/// controller and the pointer events already share.
struct ScreenCamera {
    proj: Mat3,
}

impl ScreenCamera {
    fn new() -> Self {
        Self {
            proj: Mat3::IDENTITY,
        }
    }
}

impl Camera2d for ScreenCamera {
    fn handle_event(&mut self, _canvas: &Canvas, _event: &kiss3d::event::WindowEvent) {}

    fn update(&mut self, canvas: &Canvas) {
        let (w, h) = canvas.size();
        self.proj = Mat3::from_cols(
            Vec3::new(2.0 / w as f32, 0.0, 0.0),
            Vec3::new(0.0, -2.0 / h as f32, 0.0),
            Vec3::new(-1.0, 1.0, 1.0),
        );
    }

    fn view_transform_pair(&self) -> (Mat3, Mat3) {
        (Mat3::IDENTITY, self.proj)
    }

    fn unproject(&self, window_coord: Vec2, _window_size: Vec2) -> Vec2 {
        window_coord
    }
}

/// A tile's scene node plus the flattened outline used for hit-testing.
struct TileNode {
    node: SceneNode2d,
    /// Sprite dimensions in pixels; the node's rectangle extents at scale 1.
    size: Vec2,
    /// Outline polygon in tile-local coordinates.
    polygon: Vec<Vec2>,
    /// Offset from the tile origin to the node's top-left (the sprite
    /// extends one margin width beyond the nominal square).
    sprite_offset: Vec2,
    position: Vec2,
    scale: f32,
}

impl TileVisual for TileNode {
    fn set_position(&mut self, position: Vec2) {
        self.position = position;
        let corner = position + self.sprite_offset;
        // the rectangle node is anchored at its center
        self.node.set_position(corner + self.size * 0.5);
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.node.set_color(Color::new(1.0, 1.0, 1.0, opacity));
    }

    fn scale(&mut self, factor: f32) {
        self.scale *= factor;
        self.node
            .set_local_scale(self.size.x * self.scale, self.size.y * self.scale);
    }
}

/// Builds tile visuals inside one scene node.
struct SceneBackend<'a> {
    scene: &'a mut SceneNode2d,
    tile_size: u32,
    /// Number of tiles created so far; keys the per-tile texture names.
    tile_count: usize,
}

impl Backend for SceneBackend<'_> {
    type Visual = TileNode;

    fn create_tile(&mut self, sprite: &RgbaImage, outline: &TileOutline) -> TileNode {
        let margin = margin_width(self.tile_size) as f32;
        let polygon = outline.flatten(FLATTEN_STEPS);
        let masked = apply_mask(sprite, &polygon, margin);
        let size = Vec2::new(masked.width() as f32, masked.height() as f32);

        // the rectangle mesh maps texture row 0 to the edge the screen
        // camera renders lowest, so upload the sprite bottom row first
        let flipped = image::imageops::flip_vertical(&masked);
        let name = format!("jigsaw-tile-{}", self.tile_count);
        self.tile_count += 1;
        let mut upload = Some(DynamicImage::ImageRgba8(flipped));
        let texture = TextureManager::get_global_manager(|tm| {
            tm.add_image(upload.take().expect("texture uploaded once"), &name)
        });

        let mut node = self.scene.add_rectangle(size.x, size.y);
        node.set_texture(texture);

        TileNode {
            node,
            size,
            polygon,
            sprite_offset: Vec2::new(-margin, -margin),
            position: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

/// Clips a sprite to its curved outline by zeroing the alpha of every pixel
/// outside the flattened polygon.
fn apply_mask(sprite: &RgbaImage, polygon: &[Vec2], margin: f32) -> RgbaImage {
    let mut masked = sprite.clone();
    for (x, y, pixel) in masked.enumerate_pixels_mut() {
        // sprite pixel (0, 0) sits one margin above and left of the tile origin
        let local = Vec2::new(x as f32 + 0.5 - margin, y as f32 + 0.5 - margin);
        if !point_in_polygon(polygon, local) {
            pixel.0[3] = 0;
        }
    }
    masked
}

/// Topmost tile under `point`, matching scene paint order.
fn hit_test(puzzle: &Puzzle<TileNode>, point: Vec2) -> Option<TileId> {
    for (index, tile) in puzzle.tiles().iter().enumerate().rev() {
        let local = point - tile.visual.position;
        if point_in_polygon(&tile.visual.polygon, local) {
            return Some(TileId(index));
        }
    }
    None
}

/// Runs the interactive puzzle window.
pub fn display(image: RgbaImage, tile_size: u32) {
    pollster::block_on(display_async(image, tile_size));
}

async fn display_async(image: RgbaImage, tile_size: u32) {
    let mut window = Window::new("Jigsaw - hover to pick up, drag, release to snap").await;

    let mut camera = ScreenCamera::new();
    let mut scene = SceneNode2d::empty();
    let mut rng = StdRng::from_os_rng();
    let mut puzzle = {
        let mut backend = SceneBackend {
            scene: &mut scene,
            tile_size,
            tile_count: 0,
        };
        Puzzle::new(&mut backend, &image, tile_size, &mut rng)
    };
    info!("puzzle window opened with {} tiles", puzzle.tiles().len());

    let mut cursor = Vec2::ZERO;
    let mut button_held = false;
    let mut last_placed = usize::MAX;

    loop {
        for event in window.events().iter() {
            match event.value {
                kiss3d::event::WindowEvent::CursorPos(x, y, _) => {
                    let point = Vec2::new(x as f32, y as f32);
                    let delta = point - cursor;
                    cursor = point;
                    if button_held {
                        puzzle.handle_event(PointerEvent::Drag { delta });
                    } else {
                        let hit = hit_test(&puzzle, point);
                        puzzle.handle_event(PointerEvent::Move { point, hit });
                    }
                }
                kiss3d::event::WindowEvent::MouseButton(button, action, _) => {
                    use kiss3d::event::{Action, MouseButton};
                    if button == MouseButton::Button1 {
                        match action {
                            Action::Press => {
                                button_held = true;
                                puzzle.handle_event(PointerEvent::Down { point: cursor });
                            }
                            Action::Release => {
                                button_held = false;
                                puzzle.handle_event(PointerEvent::Up);
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        // stroke every tile's curved border at its current position
        for tile in puzzle.tiles() {
            let polygon = &tile.visual.polygon;
            for (i, &a) in polygon.iter().enumerate() {
                let b = polygon[(i + 1) % polygon.len()];
                let from = a + tile.visual.position;
                let to = b + tile.visual.position;
                window.draw_line_2d(from, to, border_color(), 1.0);
            }
        }

        if puzzle.placed_count() != last_placed {
            last_placed = puzzle.placed_count();
            let title = if puzzle.is_solved() {
                format!("Jigsaw - solved! ({} tiles)", puzzle.tiles().len())
            } else {
                format!(
                    "Jigsaw - {}/{} tiles placed",
                    last_placed,
                    puzzle.tiles().len()
                )
            };
            window.set_title(&title);
        }

        if !window.render_2d(&mut scene, &mut camera).await {
            break;
        }
    }
}
