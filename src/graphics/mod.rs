pub mod blend;
pub mod draw;

pub use blend::{Argb, Mixer};

pub(crate) trait Pixel: Copy + Clone + Sized + std::fmt::Debug {
    #[cfg(test)]
    fn black() -> Self;
    #[cfg(test)]
    fn white() -> Self;
    fn trans() -> Self;

    fn over(self, other: Self) -> Self;
    fn mix(self, other: Self) -> Self;

    fn set_alpha(self, alpha: u8) -> Self;
    #[cfg(test)]
    fn alpha(self) -> u8;

    fn decompose(self) -> [u8; 4];
    fn compose(array: [u8; 4]) -> Self;

    /// Byte order expected by image encoders and window icons.
    fn to_rgba(self) -> [u8; 4];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct P2(pub i32, pub i32);

/// A plain ARGB drawing surface.
///
/// Every visible layer (the artwork, the bubble overlay and the
/// composed frame) is one of these. Dropping it is the only way to
/// discard a surface; nothing else holds on to its pixels.
#[derive(Clone)]
pub struct Canvas {
    buffer: Vec<Argb>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buffer: vec![Argb::trans(); w * h],
            width: w,
            height: h,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn sizeu(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.fill(Argb::trans());
    }

    pub fn fill(&mut self, c: Argb) {
        self.buffer.fill(c);
    }

    /// Resizes without keeping the old contents in place.
    pub fn resize(&mut self, w: usize, h: usize) {
        self.buffer.clear();
        self.buffer.resize(w * h, Argb::trans());
        self.width = w;
        self.height = h;
    }

    #[cfg(test)]
    pub fn pixel_xy(&self, p: P2) -> Option<Argb> {
        self.index_of(p).map(|i| self.buffer[i])
    }

    #[cfg(test)]
    pub fn is_in_bound(&self, p: P2) -> bool {
        p.0 >= 0 && p.1 >= 0 && (p.0 as usize) < self.width && (p.1 as usize) < self.height
    }

    #[cfg(test)]
    pub fn index_of(&self, p: P2) -> Option<usize> {
        self.is_in_bound(p)
            .then(|| p.1 as usize * self.width + p.0 as usize)
    }

    pub fn as_slice(&self) -> &[Argb] {
        &self.buffer
    }

    pub fn as_mut_slice(&mut self) -> &mut [Argb] {
        &mut self.buffer
    }

    /// Pixels as RGBA bytes, row by row.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.buffer.iter().flat_map(|p| p.to_rgba()).collect()
    }

    /// Nearest-neighbour resample, picking the pixel under each target
    /// pixel's center.
    pub fn scaled_nearest(&self, w: usize, h: usize) -> Canvas {
        let mut out = Canvas::new(w, h);

        if self.is_empty() {
            return out;
        }

        for y in 0..h {
            let sy = (y * 2 + 1) * self.height / (h * 2);

            for x in 0..w {
                let sx = (x * 2 + 1) * self.width / (w * 2);
                out.buffer[y * w + x] = self.buffer[sy * self.width + sx];
            }
        }

        out
    }

    /// Copies into a destination with the same width, as handed out by
    /// the window surface. Extra destination pixels are left untouched.
    pub fn copy_to(&self, dest: &mut [Argb]) {
        let len = self.buffer.len().min(dest.len());
        dest[..len].copy_from_slice(&self.buffer[..len]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_transparent() {
        let c = Canvas::new(4, 3);
        assert_eq!(c.sizeu(), (4, 3));
        assert!(c.as_slice().iter().all(|&p| p == Argb::trans()));
    }

    #[test]
    fn bounds() {
        let c = Canvas::new(4, 3);
        assert!(c.is_in_bound(P2(3, 2)));
        assert!(!c.is_in_bound(P2(4, 0)));
        assert!(!c.is_in_bound(P2(-1, 0)));
        assert_eq!(c.index_of(P2(1, 2)), Some(9));
    }

    #[test]
    fn resize_discards_pixels() {
        let mut c = Canvas::new(2, 2);
        c.fill(Argb::black());
        c.resize(3, 3);
        assert_eq!(c.as_slice().len(), 9);
        assert!(c.as_slice().iter().all(|&p| p == Argb::trans()));
    }

    #[test]
    fn nearest_downscale_samples_centers() {
        let mut c = Canvas::new(4, 4);
        // left half black, right half white
        for (i, p) in c.as_mut_slice().iter_mut().enumerate() {
            *p = if i % 4 < 2 { Argb::black() } else { Argb::white() };
        }

        let s = c.scaled_nearest(2, 1);
        assert_eq!(s.as_slice(), &[Argb::black(), Argb::white()]);
    }

    #[test]
    fn rgba_bytes_follow_rows() {
        let mut c = Canvas::new(2, 1);
        c.as_mut_slice()[1] = 0xFF_01_02_03;
        assert_eq!(c.to_rgba_bytes(), vec![0, 0, 0, 0, 1, 2, 3, 0xFF]);
    }
}
