//! Tile sub-image sampling.
//!
//! Each tile shows a crop of the source picture: its nominal square plus a
//! margin on every side, so the curved tabs that reach outside the square
//! still have image content behind them. Crops that leave the source (the
//! border tiles' margins, and the last row/column of a non-divisible image)
//! are padded with transparent pixels.

use glam::IVec2;
use image::{Rgba, RgbaImage};

/// Margin width as a fraction of the tile edge length.
///
/// 13/64: the tab template reaches 20 reference units outside the square,
/// so the margin comfortably covers a protruding neighbor edge.
pub const TILE_MARGIN_RATIO: f32 = 0.203125;

/// Returns the margin width in pixels for a tile edge length.
pub fn margin_width(tile_size: u32) -> u32 {
    (tile_size as f32 * TILE_MARGIN_RATIO) as u32
}

/// Crops the sub-image for the tile at `grid_pos`.
///
/// The crop covers `tile_size + 2 * margin` pixels per side, centered on the
/// tile's nominal square at `grid_pos * tile_size`. Out-of-bounds regions
/// are transparent.
pub fn sample_sprite(source: &RgbaImage, grid_pos: IVec2, tile_size: u32) -> RgbaImage {
    let margin = margin_width(tile_size) as i64;
    let crop_size = tile_size as i64 + 2 * margin;
    let origin_x = grid_pos.x as i64 * tile_size as i64 - margin;
    let origin_y = grid_pos.y as i64 * tile_size as i64 - margin;

    let mut sprite = RgbaImage::from_pixel(
        crop_size as u32,
        crop_size as u32,
        Rgba([0, 0, 0, 0]),
    );

    for dy in 0..crop_size {
        let src_y = origin_y + dy;
        if src_y < 0 || src_y >= source.height() as i64 {
            continue;
        }
        for dx in 0..crop_size {
            let src_x = origin_x + dx;
            if src_x < 0 || src_x >= source.width() as i64 {
                continue;
            }
            let pixel = *source.get_pixel(src_x as u32, src_y as u32);
            sprite.put_pixel(dx as u32, dy as u32, pixel);
        }
    }

    sprite
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A source image whose pixel at (x, y) encodes its own coordinates.
    fn coordinate_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]))
    }

    #[test]
    fn test_margin_width_matches_ratio() {
        assert_eq!(margin_width(64), 13);
        assert_eq!(margin_width(50), 10);
    }

    #[test]
    fn test_interior_tile_samples_expected_pixels() {
        let source = coordinate_image(200, 200);
        let tile_size = 50;
        let margin = margin_width(tile_size);

        let sprite = sample_sprite(&source, IVec2::new(1, 1), tile_size);
        assert_eq!(sprite.width(), tile_size + 2 * margin);
        assert_eq!(sprite.height(), tile_size + 2 * margin);

        // sprite pixel (margin, margin) is the tile's nominal top-left pixel
        let pixel = sprite.get_pixel(margin, margin);
        assert_eq!(pixel.0[0], 50);
        assert_eq!(pixel.0[1], 50);
        assert_eq!(pixel.0[3], 255);
    }

    #[test]
    fn test_border_tile_margin_is_transparent() {
        let source = coordinate_image(100, 100);
        let sprite = sample_sprite(&source, IVec2::new(0, 0), 50);

        // the crop starts above and left of the source
        assert_eq!(sprite.get_pixel(0, 0).0[3], 0);
        // but the nominal square itself is opaque
        let margin = margin_width(50);
        assert_eq!(sprite.get_pixel(margin, margin).0[3], 255);
    }

    #[test]
    fn test_partial_last_column_is_padded() {
        // 120 wide with 50px tiles: the third column samples 20 real pixels
        let source = coordinate_image(120, 100);
        let tile_size = 50;
        let margin = margin_width(tile_size);
        let sprite = sample_sprite(&source, IVec2::new(2, 0), tile_size);

        // first nominal pixel (x = 100) exists
        assert_eq!(sprite.get_pixel(margin, margin).0[3], 255);
        // nominal pixel past the source width (x = 120) is transparent
        assert_eq!(sprite.get_pixel(margin + 20, margin).0[3], 0);
    }
}
