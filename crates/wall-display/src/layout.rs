//! Cell geometry for the tile grid.

use wall_common::Rect;

use crate::mode::LayoutMode;

/// Computes cell rectangles for a layout mode inside a viewport.
#[derive(Debug, Clone)]
pub struct GridLayout {
    /// Gap between cells in pixels.
    pub gap: u32,
    /// Padding between the viewport edge and the grid.
    pub outer_padding: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            gap: 8,
            outer_padding: 10,
        }
    }
}

impl GridLayout {
    /// One rect per cell (`capacity(mode)` of them), row-major.
    ///
    /// Tiles take the first cells in selection order; placeholders fill
    /// the rest.
    pub fn cells(&self, mode: LayoutMode, viewport: Rect) -> Vec<Rect> {
        let area = viewport.inset(self.outer_padding as f64);
        let cols = mode.grid_cols();
        let rows = mode.grid_rows();
        let gap = self.gap as f64;

        let cell_w = ((area.width - gap * (cols - 1) as f64) / cols as f64).max(0.0);
        let cell_h = ((area.height - gap * (rows - 1) as f64) / rows as f64).max(0.0);

        (0..mode.capacity())
            .map(|i| {
                let (row, col) = (i / cols, i % cols);
                Rect {
                    x: area.x + col as f64 * (cell_w + gap),
                    y: area.y + row as f64 * (cell_h + gap),
                    width: cell_w,
                    height: cell_h,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1920.0, 1080.0)
    }

    fn flush() -> GridLayout {
        GridLayout {
            gap: 0,
            outer_padding: 0,
        }
    }

    #[test]
    fn single_fills_viewport() {
        let cells = flush().cells(LayoutMode::Single, viewport());
        assert_eq!(cells, vec![viewport()]);
    }

    #[test]
    fn grid_is_three_by_three() {
        let cells = flush().cells(LayoutMode::Grid, viewport());
        assert_eq!(cells.len(), 9);
        assert!((cells[0].width - 640.0).abs() < 0.01);
        assert!((cells[0].height - 360.0).abs() < 0.01);
        assert!((cells[4].x - 640.0).abs() < 0.01);
        assert!((cells[8].y - 720.0).abs() < 0.01);
    }

    #[test]
    fn triple_leaves_a_corner_empty() {
        let cells = flush().cells(LayoutMode::Triple, viewport());
        assert_eq!(cells.len(), 3);
        // Third cell starts the second row
        assert!((cells[2].x).abs() < 0.01);
        assert!((cells[2].y - 540.0).abs() < 0.01);
    }

    #[test]
    fn gap_and_padding_are_respected() {
        let layout = GridLayout {
            gap: 10,
            outer_padding: 20,
        };
        let cells = layout.cells(LayoutMode::Quad, viewport());
        assert!((cells[0].x - 20.0).abs() < 0.01);
        assert!((cells[0].width - 935.0).abs() < 0.01);
        assert!((cells[1].x - (20.0 + 935.0 + 10.0)).abs() < 0.01);
    }
}
