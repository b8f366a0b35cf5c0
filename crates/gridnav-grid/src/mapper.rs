//! Pixel-to-cell discretization of the rectified image.

use gridnav_core::GrayImageView;
use log::debug;

use crate::GridError;

/// Pixel-space bounds of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellBounds {
    pub x0: usize,
    pub y0: usize,
    pub width: usize,
    pub height: usize,
}

/// Read-only view of one cell's pixels, borrowed from the rectified image.
#[derive(Clone, Copy, Debug)]
pub struct CellView<'a> {
    image: GrayImageView<'a>,
    bounds: CellBounds,
}

impl<'a> CellView<'a> {
    #[inline]
    pub fn width(&self) -> usize {
        self.bounds.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.bounds.height
    }

    /// Pixel value at cell-local coordinates.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.image
            .get((self.bounds.x0 + x) as i64, (self.bounds.y0 + y) as i64)
    }

    /// All cell pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = u8> + '_ {
        let b = self.bounds;
        (0..b.height).flat_map(move |y| (0..b.width).map(move |x| self.pixel(x, y)))
    }
}

/// Partitions a rectified W x H image into `n_rows x n_cols` cells of
/// `floor(W / n_cols) x floor(H / n_rows)` pixels.
///
/// Remainder pixels on the right and bottom edges are absorbed into the last
/// column and row; this boundary-rounding policy is deliberate, not an error.
#[derive(Clone, Copy, Debug)]
pub struct GridMapper<'a> {
    image: GrayImageView<'a>,
    n_rows: usize,
    n_cols: usize,
    cell_width: usize,
    cell_height: usize,
}

impl<'a> GridMapper<'a> {
    pub fn new(
        image: GrayImageView<'a>,
        n_rows: usize,
        n_cols: usize,
    ) -> Result<Self, GridError> {
        if n_rows == 0 || n_cols == 0 {
            return Err(GridError::EmptyGrid {
                rows: n_rows,
                cols: n_cols,
            });
        }

        let cell_width = image.width / n_cols;
        let cell_height = image.height / n_rows;
        if cell_width == 0 || cell_height == 0 {
            return Err(GridError::ImageTooSmall {
                width: image.width,
                height: image.height,
                rows: n_rows,
                cols: n_cols,
            });
        }

        debug!(
            "grid {n_rows}x{n_cols} over {}x{} image, cell {cell_width}x{cell_height} px",
            image.width, image.height
        );

        Ok(Self {
            image,
            n_rows,
            n_cols,
            cell_width,
            cell_height,
        })
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    #[inline]
    pub fn image(&self) -> &GrayImageView<'a> {
        &self.image
    }

    fn in_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.n_rows || col >= self.n_cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.n_rows,
                cols: self.n_cols,
            });
        }
        Ok(())
    }

    /// Pixel bounds of a cell. The last row/column extends to the image edge.
    pub fn cell_bounds(&self, row: usize, col: usize) -> Result<CellBounds, GridError> {
        self.in_bounds(row, col)?;

        let x0 = col * self.cell_width;
        let y0 = row * self.cell_height;
        let width = if col + 1 == self.n_cols {
            self.image.width - x0
        } else {
            self.cell_width
        };
        let height = if row + 1 == self.n_rows {
            self.image.height - y0
        } else {
            self.cell_height
        };

        Ok(CellBounds {
            x0,
            y0,
            width,
            height,
        })
    }

    /// Borrowed pixel view of one cell.
    pub fn cell_view(&self, row: usize, col: usize) -> Result<CellView<'a>, GridError> {
        Ok(CellView {
            image: self.image,
            bounds: self.cell_bounds(row, col)?,
        })
    }

    /// Pixel coordinates `(x, y)` of a cell's center.
    pub fn cell_center_pixel(&self, row: usize, col: usize) -> Result<(usize, usize), GridError> {
        let b = self.cell_bounds(row, col)?;
        Ok((b.x0 + b.width / 2, b.y0 + b.height / 2))
    }

    /// `cell_center_pixel` under the name the planner-facing code uses: it
    /// inverts `pixel_to_cell` at cell-center granularity only, not for
    /// arbitrary pixel positions.
    pub fn cell_to_pixel(&self, row: usize, col: usize) -> Result<(usize, usize), GridError> {
        self.cell_center_pixel(row, col)
    }

    /// Map a pixel position to its cell, clamped to the grid extents.
    ///
    /// Clamping rather than erroring on out-of-range input is a deliberate
    /// leniency for noisy detections near the image border.
    pub fn pixel_to_cell(&self, x: f32, y: f32) -> (usize, usize) {
        let col = (x.max(0.0) as usize / self.cell_width).min(self.n_cols - 1);
        let row = (y.max(0.0) as usize / self.cell_height).min(self.n_rows - 1);
        (row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridnav_core::GrayImage;

    #[test]
    fn last_cell_absorbs_remainder_pixels() {
        let img = GrayImage::new(103, 52);
        let mapper = GridMapper::new(img.view(), 5, 10).expect("mapper");

        let inner = mapper.cell_bounds(0, 0).expect("bounds");
        assert_eq!((inner.width, inner.height), (10, 10));

        let last = mapper.cell_bounds(4, 9).expect("bounds");
        assert_eq!((last.x0, last.y0), (90, 40));
        assert_eq!((last.width, last.height), (13, 12));
    }

    #[test]
    fn last_pixel_maps_to_last_cell() {
        let img = GrayImage::new(103, 52);
        let mapper = GridMapper::new(img.view(), 5, 10).expect("mapper");
        assert_eq!(mapper.pixel_to_cell(102.0, 51.0), (4, 9));
    }

    #[test]
    fn out_of_range_pixels_clamp() {
        let img = GrayImage::new(100, 100);
        let mapper = GridMapper::new(img.view(), 4, 4).expect("mapper");
        assert_eq!(mapper.pixel_to_cell(-5.0, -5.0), (0, 0));
        assert_eq!(mapper.pixel_to_cell(500.0, 500.0), (3, 3));
    }

    #[test]
    fn center_round_trips_through_pixel_to_cell() {
        let img = GrayImage::new(90, 90);
        let mapper = GridMapper::new(img.view(), 3, 3).expect("mapper");
        for row in 0..3 {
            for col in 0..3 {
                let (x, y) = mapper.cell_to_pixel(row, col).expect("center");
                assert_eq!(mapper.pixel_to_cell(x as f32, y as f32), (row, col));
            }
        }
    }

    #[test]
    fn cell_view_reads_the_right_pixels() {
        let img = GrayImage::from_fn(8, 8, |x, y| (y * 8 + x) as u8);
        let mapper = GridMapper::new(img.view(), 2, 2).expect("mapper");
        let view = mapper.cell_view(1, 1).expect("view");
        assert_eq!(view.pixel(0, 0), 4 * 8 + 4);
        assert_eq!(view.pixels().count(), 16);
    }

    #[test]
    fn invalid_constructions_fail() {
        let img = GrayImage::new(10, 10);
        assert!(matches!(
            GridMapper::new(img.view(), 0, 5),
            Err(GridError::EmptyGrid { .. })
        ));
        assert!(matches!(
            GridMapper::new(img.view(), 20, 5),
            Err(GridError::ImageTooSmall { .. })
        ));
    }

    #[test]
    fn cell_access_out_of_bounds_fails() {
        let img = GrayImage::new(40, 40);
        let mapper = GridMapper::new(img.view(), 4, 4).expect("mapper");
        assert!(matches!(
            mapper.cell_bounds(4, 0),
            Err(GridError::OutOfBounds { .. })
        ));
    }
}
