/// An RGB color with floating point components, nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Converts to 8-bit RGBA with an opaque alpha channel.
    ///
    /// Components are clamped to `[0, 1]` before scaling, then truncated, so
    /// `0.999` maps to 254 and only an exact `1.0` reaches 255.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        [channel(self.r), channel(self.g), channel(self.b), 255]
    }
}

#[inline]
fn channel(c: f64) -> u8 {
    // NaN clamps to NaN and casts to 0
    (c.clamp(0.0, 1.0) * 255.0) as u8
}

impl From<[f64; 3]> for Color {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        assert_eq!(Color::BLACK.to_rgba8(), [0, 0, 0, 255]);
        assert_eq!(Color::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::new(1.0, 0.0, 0.0).to_rgba8(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_truncation() {
        assert_eq!(Color::new(0.5, 0.999, 0.1).to_rgba8(), [127, 254, 25, 255]);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(Color::new(-0.5, 1.5, 2.0).to_rgba8(), [0, 255, 255, 255]);
        assert_eq!(Color::new(f64::NAN, 0.0, 0.0).to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_from_array() {
        let c: Color = [0.2, 0.4, 0.6].into();
        assert_eq!(c, Color::new(0.2, 0.4, 0.6));
    }
}
