use super::traits::ImageView;

/// Borrowed 8-bit grayscale frame: one captured fringe or speckle image.
///
/// `stride` may exceed `w` for frames cut out of a padded capture buffer.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Frame over a tightly packed buffer (`stride == w`).
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Self {
        debug_assert!(data.len() >= w * h);
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }
}

impl ImageView for ImageU8<'_> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
