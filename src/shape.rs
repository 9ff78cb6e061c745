//! Edge-tab assignment for an interlocking tile grid.
//!
//! Every tile edge carries a tab value: +1 protrudes, -1 indents, 0 is flat.
//! Flat edges only appear on the outer border. Two grid-adjacent tiles fit
//! together exactly when their shared edge's tabs are additive inverses, so
//! the whole grid is generated in one row-major sweep where each cell draws
//! its right and bottom tabs at random and mirrors the negated values into
//! its neighbors. Each interior edge is therefore assigned exactly once from
//! one side and never contested.

use rand::Rng;

/// A single edge's tab value: -1 (indented), 0 (flat), or +1 (protruding).
pub type Tab = i8;

/// The four edge tabs of one tile, in top/right/bottom/left order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileShape {
    pub top: Tab,
    pub right: Tab,
    pub bottom: Tab,
    pub left: Tab,
}

impl TileShape {
    /// A shape with all four edges flat (border placeholder).
    pub const FLAT: Self = Self {
        top: 0,
        right: 0,
        bottom: 0,
        left: 0,
    };
}

/// Draws a uniform random tab value from {+1, -1}.
fn random_tab(rng: &mut impl Rng) -> Tab {
    if rng.random::<bool>() {
        1
    } else {
        -1
    }
}

/// Generates the edge-tab assignment for a `cols` x `rows` grid, row-major.
///
/// Border edges stay flat; every interior edge gets a random +1/-1 on one
/// side and the exact negation on the other, so any two adjacent shapes in
/// the result are guaranteed to interlock.
///
/// Degenerate dimensions terminate normally: a zero-sized grid yields an
/// empty vec, and a 1x1 grid yields a single all-flat shape.
pub fn generate(cols: usize, rows: usize, rng: &mut impl Rng) -> Vec<TileShape> {
    let mut shapes = vec![TileShape::FLAT; cols * rows];

    for y in 0..rows {
        for x in 0..cols {
            if x + 1 < cols {
                let tab = random_tab(rng);
                shapes[y * cols + x].right = tab;
                shapes[y * cols + x + 1].left = -tab;
            }
            if y + 1 < rows {
                let tab = random_tab(rng);
                shapes[y * cols + x].bottom = tab;
                shapes[(y + 1) * cols + x].top = -tab;
            }
        }
    }

    shapes
}

/// Formats a shape grid as text, one four-glyph block per tile.
///
/// Each tile prints its tabs in top/right/bottom/left order: `+` protrudes,
/// `-` indents, `.` is flat. Tiles in a row are space-separated. Used by the
/// CLI's `shapes` subcommand and the snapshot test.
pub fn format_shapes(shapes: &[TileShape], cols: usize) -> String {
    if cols == 0 || shapes.is_empty() {
        return String::new();
    }
    let rows = shapes.len() / cols;

    let glyph = |tab: Tab| match tab {
        1 => '+',
        -1 => '-',
        _ => '.',
    };

    let mut output = String::new();
    for y in 0..rows {
        for x in 0..cols {
            if x > 0 {
                output.push(' ');
            }
            let shape = shapes[y * cols + x];
            output.push(glyph(shape.top));
            output.push(glyph(shape.right));
            output.push(glyph(shape.bottom));
            output.push(glyph(shape.left));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn shapes(cols: usize, rows: usize, seed: u64) -> Vec<TileShape> {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(cols, rows, &mut rng)
    }

    #[test]
    fn test_border_edges_are_flat() {
        let cols = 5;
        let rows = 4;
        let grid = shapes(cols, rows, 7);
        for y in 0..rows {
            for x in 0..cols {
                let shape = grid[y * cols + x];
                if y == 0 {
                    assert_eq!(shape.top, 0, "top border tab at ({x},{y})");
                }
                if y == rows - 1 {
                    assert_eq!(shape.bottom, 0, "bottom border tab at ({x},{y})");
                }
                if x == 0 {
                    assert_eq!(shape.left, 0, "left border tab at ({x},{y})");
                }
                if x == cols - 1 {
                    assert_eq!(shape.right, 0, "right border tab at ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn test_adjacent_tabs_are_additive_inverses() {
        let cols = 6;
        let rows = 5;
        let grid = shapes(cols, rows, 99);
        for y in 0..rows {
            for x in 0..cols {
                let shape = grid[y * cols + x];
                if x + 1 < cols {
                    let right = grid[y * cols + x + 1];
                    assert_eq!(
                        shape.right + right.left,
                        0,
                        "horizontal edge ({x},{y})-({},{y})",
                        x + 1
                    );
                }
                if y + 1 < rows {
                    let below = grid[(y + 1) * cols + x];
                    assert_eq!(
                        shape.bottom + below.top,
                        0,
                        "vertical edge ({x},{y})-({x},{})",
                        y + 1
                    );
                }
            }
        }
    }

    #[test]
    fn test_interior_tabs_are_never_flat() {
        let cols = 4;
        let rows = 4;
        let grid = shapes(cols, rows, 3);
        for y in 0..rows {
            for x in 0..cols {
                let shape = grid[y * cols + x];
                if x + 1 < cols {
                    assert!(shape.right == 1 || shape.right == -1);
                }
                if x > 0 {
                    assert!(shape.left == 1 || shape.left == -1);
                }
                if y + 1 < rows {
                    assert!(shape.bottom == 1 || shape.bottom == -1);
                }
                if y > 0 {
                    assert!(shape.top == 1 || shape.top == -1);
                }
            }
        }
    }

    #[test]
    fn test_two_by_two_grid() {
        let grid = shapes(2, 2, 11);
        assert_eq!(grid.len(), 4);

        let top_left = grid[0];
        let top_right = grid[1];
        assert_eq!(top_left.top, 0);
        assert_eq!(top_left.left, 0);
        assert_eq!(top_left.right, -top_right.left);
    }

    #[test]
    fn test_degenerate_grids() {
        assert!(shapes(0, 0, 1).is_empty());
        assert!(shapes(0, 5, 1).is_empty());
        assert!(shapes(5, 0, 1).is_empty());

        let single = shapes(1, 1, 1);
        assert_eq!(single, vec![TileShape::FLAT]);
    }

    #[test]
    fn test_format_shapes_snapshot() {
        // fixed 2x2 grid so the snapshot stays stable across rand versions
        let grid = vec![
            TileShape {
                top: 0,
                right: 1,
                bottom: -1,
                left: 0,
            },
            TileShape {
                top: 0,
                right: 0,
                bottom: 1,
                left: -1,
            },
            TileShape {
                top: 1,
                right: -1,
                bottom: 0,
                left: 0,
            },
            TileShape {
                top: -1,
                right: 0,
                bottom: 0,
                left: 1,
            },
        ];
        insta::assert_snapshot!("shape_grid_format", format_shapes(&grid, 2));
    }
}
