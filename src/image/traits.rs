//! Row-major grid access shared by camera frames, float grids and bit maps.

/// Read-only view over a row-major grid.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Pixels of row `y`, exactly `width()` long.
    fn row(&self, y: usize) -> &[Self::Pixel];

    fn dims(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Pixel at a signed position; `None` outside the grid.
    #[inline]
    fn sample(&self, x: isize, y: isize) -> Option<Self::Pixel> {
        if x < 0 || y < 0 || x as usize >= self.width() || y as usize >= self.height() {
            return None;
        }
        Some(self.row(y as usize)[x as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageU8;

    #[test]
    fn sample_is_none_outside() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let img = ImageU8::packed(3, 2, &data);
        assert_eq!(img.sample(2, 1), Some(6));
        assert_eq!(img.sample(-1, 0), None);
        assert_eq!(img.sample(3, 0), None);
        assert_eq!(img.sample(0, 2), None);
    }
}
