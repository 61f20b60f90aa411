//! Local-contrast binarization of speckle images.
//!
//! Each pixel becomes 1 when it is brighter than the mean of its
//! `win × win` neighbourhood, i.e. `win² · I(x, y) > Σ window`. The window
//! is zero-padded at the border (out-of-image samples add nothing to the sum
//! but the divisor stays `win²`). Sums come from an integral image.
use crate::image::{ImageU8, ImageView};

/// Owned grid of 0/1 descriptors, one byte per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMap {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl BitMap {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    /// Wrap existing 0/1 bytes; any non-zero byte counts as 1.
    pub fn from_bits(w: usize, h: usize, bits: Vec<u8>) -> Self {
        debug_assert_eq!(bits.len(), w * h);
        Self {
            w,
            h,
            data: bits.into_iter().map(|b| (b != 0) as u8).collect(),
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, bit: bool) {
        self.data[y * self.w + x] = bit as u8;
    }

    pub fn ones(&self) -> usize {
        self.data.iter().filter(|&&b| b != 0).count()
    }
}

impl ImageView for BitMap {
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
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

/// Summed-area table with one row/column of zero padding on the top/left.
struct IntegralImage {
    w: usize,
    h: usize,
    sums: Vec<u64>,
}

impl IntegralImage {
    fn build(src: &ImageU8<'_>) -> Self {
        let (w, h) = (src.w, src.h);
        let stride = w + 1;
        let mut sums = vec![0u64; stride * (h + 1)];
        for y in 0..h {
            let mut running = 0u64;
            for (x, &px) in src.row(y).iter().enumerate() {
                running += px as u64;
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + running;
            }
        }
        Self { w, h, sums }
    }

    /// Sum over the window of radius `r` around `(x, y)`, clipped to the image.
    #[inline]
    fn window_sum(&self, x: usize, y: usize, r: usize) -> u64 {
        let stride = self.w + 1;
        let x0 = x.saturating_sub(r);
        let y0 = y.saturating_sub(r);
        let x1 = (x + r + 1).min(self.w);
        let y1 = (y + r + 1).min(self.h);
        self.sums[y1 * stride + x1] + self.sums[y0 * stride + x0]
            - self.sums[y0 * stride + x1]
            - self.sums[y1 * stride + x0]
    }
}

/// Binarize `src` against its local mean over an odd `win × win` window.
pub(crate) fn binarize(src: &ImageU8<'_>, win: usize) -> BitMap {
    let integral = IntegralImage::build(src);
    let r = win / 2;
    let area = (win * win) as u64;
    let rows = crate::parallel::map_rows(src.h, |y| {
        src.row(y)
            .iter()
            .enumerate()
            .map(|(x, &px)| (area * px as u64 > integral.window_sum(x, y, r)) as u8)
            .collect::<Vec<u8>>()
    });
    BitMap {
        w: src.w,
        h: src.h,
        data: rows.concat(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(src: &ImageU8<'_>, win: usize) -> BitMap {
        let r = (win / 2) as isize;
        let mut out = BitMap::new(src.w, src.h);
        for y in 0..src.h as isize {
            for x in 0..src.w as isize {
                let mut sum = 0u64;
                for dy in -r..=r {
                    for dx in -r..=r {
                        sum += src.sample(x + dx, y + dy).unwrap_or(0) as u64;
                    }
                }
                let px = src.row(y as usize)[x as usize] as u64;
                out.set(x as usize, y as usize, (win * win) as u64 * px > sum);
            }
        }
        out
    }

    #[test]
    fn integral_matches_brute_force() {
        let (w, h) = (13, 9);
        let data: Vec<u8> = (0..w * h).map(|i| ((i * 37 + 11) % 251) as u8).collect();
        let src = ImageU8::packed(w, h, &data);
        for win in [3, 5, 7] {
            assert_eq!(binarize(&src, win), brute_force(&src, win), "win={win}");
        }
    }

    #[test]
    fn flat_interior_is_zero_and_border_is_one() {
        let data = vec![100u8; 8 * 8];
        let src = ImageU8::packed(8, 8, &data);
        let bits = binarize(&src, 3);
        // Interior: 9·100 == sum, not strictly greater.
        assert_eq!(bits.get(4, 4), 0);
        // Border windows are zero-padded, so the pixel beats the mean.
        assert_eq!(bits.get(0, 0), 1);
        assert_eq!(bits.get(7, 3), 1);
    }

    #[test]
    fn bright_spot_is_set() {
        let mut data = vec![10u8; 7 * 7];
        data[3 * 7 + 3] = 200;
        let src = ImageU8::packed(7, 7, &data);
        let bits = binarize(&src, 3);
        assert_eq!(bits.get(3, 3), 1);
        assert_eq!(bits.get(2, 3), 0);
    }
}
