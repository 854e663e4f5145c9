use crate::Color;

const BYTES_PER_PIXEL: usize = 4;

/// Row-major RGBA8 pixel storage that the display draws into before presenting.
pub struct FrameBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0, "width must be greater than 0");
        assert!(height > 0, "height must be greater than 0");

        Self {
            pixels: vec![0u8; Self::buffer_size(width, height)],
            width,
            height,
        }
    }

    /// Calculates the total buffer size needed for the given dimensions.
    #[inline]
    pub const fn buffer_size(width: u32, height: u32) -> usize {
        width as usize * BYTES_PER_PIXEL * height as usize
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        for pixel in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Sets a single pixel. Returns `false` when the point lies outside the buffer.
    pub fn plot(&mut self, x: i32, y: i32, color: Color) -> bool {
        self.put(i64::from(x), i64::from(y), color.to_rgba8())
    }

    /// Draws a line with both endpoints included.
    ///
    /// Only the steps that land inside the buffer are visited, so a line with
    /// endpoints far off-screen costs no more than one that spans the buffer.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let rgba = color.to_rgba8();
        let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));

        // Walk the major axis in increasing order so (a, b) and (b, a) cover the same pixels.
        if (x1 - x0).abs() >= (y1 - y0).abs() {
            let ((x0, y0), (x1, y1)) = ordered((x0, y0), (x1, y1));
            let (first, last) = visible_steps(x0, x1 - x0, self.width);
            for k in first..=last {
                let y = y0 + minor_offset(k, x1 - x0, y1 - y0);
                self.put(x0 + k, y, rgba);
            }
        } else {
            let ((y0, x0), (y1, x1)) = ordered((y0, x0), (y1, x1));
            let (first, last) = visible_steps(y0, y1 - y0, self.height);
            for k in first..=last {
                let x = x0 + minor_offset(k, y1 - y0, x1 - x0);
                self.put(x, y0 + k, rgba);
            }
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let idx = self.index(i64::from(x), i64::from(y))?;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[idx..idx + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    #[inline]
    fn put(&mut self, x: i64, y: i64, rgba: [u8; 4]) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&rgba);
                true
            }
            None => false,
        }
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y as usize * self.stride() + x as usize * BYTES_PER_PIXEL)
    }
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

/// Range of steps `k` in `0..=major` for which `start + k` lies in `0..extent`.
/// Empty when `first > last`.
#[inline]
fn visible_steps(start: i64, major: i64, extent: u32) -> (i64, i64) {
    ((-start).max(0), major.min(i64::from(extent) - 1 - start))
}

/// Bresenham minor-axis offset at major step `k`: `k * minor / major`, rounded half up.
#[inline]
fn minor_offset(k: i64, major: i64, minor: i64) -> i64 {
    if major == 0 {
        return 0;
    }
    let steps = (2 * i128::from(k) * i128::from(minor.abs()) + i128::from(major))
        / (2 * i128::from(major));
    steps as i64 * minor.signum()
}
