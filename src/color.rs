use std::fmt::Display;
use std::sync::OnceLock;

use num_traits::clamp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Start value of every channel of the default palette.
pub const DEFAULT_PALETTE_BEGIN: (u8, u8, u8) = (64, 64, 64);

/// Step between two channel values of the default palette.
pub const DEFAULT_PALETTE_DELTA: u8 = 15;

/// An RGB color with 8 bits per channel.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// The sentinel color of a triangle that has not been colored.
pub const UNCOLORED: Color = Color::WHITE;

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({} {} {})", self.red, self.green, self.blue)
    }
}

impl Default for Color {
    fn default() -> Self {
        UNCOLORED
    }
}

impl Color {
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);

    /// Creates a color, saturating every channel into `0..=255`.
    pub fn new(red: i32, green: i32, blue: i32) -> Self {
        Self {
            red: clamp(red, 0, 255) as u8,
            green: clamp(green, 0, 255) as u8,
            blue: clamp(blue, 0, 255) as u8,
        }
    }

    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns `true` unless this is the [UNCOLORED] sentinel.
    pub fn is_colored(&self) -> bool {
        *self != UNCOLORED
    }

    /// Formats the color as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Enumerates all colors whose channels step from `begin` up to 255 by `delta`.
    ///
    /// Blue varies fastest, red slowest. A `delta` of zero is treated as one.
    pub fn palette(begin: (u8, u8, u8), delta: u8) -> Vec<Color> {
        let step = usize::from(delta.max(1));
        let mut colors = Vec::new();
        for red in (begin.0..=255).step_by(step) {
            for green in (begin.1..=255).step_by(step) {
                for blue in (begin.2..=255).step_by(step) {
                    colors.push(Color::from_rgb(red, green, blue));
                }
            }
        }
        colors
    }

    /// Returns the default palette.
    ///
    /// The palette is computed on first access and shared for the rest of the process.
    pub fn default_palette() -> &'static [Color] {
        static PALETTE: OnceLock<Vec<Color>> = OnceLock::new();
        PALETTE.get_or_init(|| Color::palette(DEFAULT_PALETTE_BEGIN, DEFAULT_PALETTE_DELTA))
    }
}

#[cfg(test)]
mod test {
    use super::{Color, UNCOLORED};

    #[test]
    fn test_clamping() {
        assert_eq!(Color::new(-20, 300, 128), Color::from_rgb(0, 255, 128));
        assert_eq!(Color::new(0, 255, 0), Color::from_rgb(0, 255, 0));
        assert_eq!(Color::new(i32::MIN, i32::MAX, 7), Color::from_rgb(0, 255, 7));
    }

    #[test]
    fn test_hex() {
        assert_eq!(Color::from_rgb(255, 8, 0).to_hex(), "#ff0800");
        assert_eq!(UNCOLORED.to_hex(), "#ffffff");
    }

    #[test]
    fn test_palette() {
        let palette = Color::palette((64, 64, 64), 15);
        // 64, 79, ..., 244
        assert_eq!(palette.len(), 13 * 13 * 13);
        assert_eq!(palette[0], Color::from_rgb(64, 64, 64));
        assert_eq!(palette[1], Color::from_rgb(64, 64, 79));
        assert_eq!(*palette.last().unwrap(), Color::from_rgb(244, 244, 244));
        assert!(palette.iter().all(Color::is_colored));

        assert_eq!(Color::palette((250, 250, 255), 0).len(), 6 * 6);
    }

    #[test]
    fn test_default_palette_is_memoized() {
        let first = Color::default_palette();
        let second = Color::default_palette();
        assert_eq!(first, second);
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, Color::palette((64, 64, 64), 15).as_slice());
    }
}
