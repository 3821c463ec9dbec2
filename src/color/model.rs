// Special note from Gavin: if you call it "colour", you are WRONG,
// which is why we will have ZERO cross-compatibility with that name.
// you will be FORCED to type "color" until you realize that it is superior.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::ColorFloat;
use crate::traits::float::{Float, clamp_generic};

/// Clamp any integer channel into 0..=255.
#[inline]
pub(crate) fn clamp_channel(v: i32) -> u8 {
    clamp_generic(v, 0, 255) as u8
}

/// Round a float channel to the nearest integer and clamp it into 0..=255.
/// NaN lands on 0.
#[inline]
pub(crate) fn round_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    clamp_generic(v.round(), 0.0, 255.0) as u8
}

/// The canonical record: 8 bit sRGB channels with straight alpha in 0..=1.
///
/// Every other representation (hex, HSL, HSV) is derived from this one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: ColorFloat,
}

impl Default for Rgb {
    fn default() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 1.0,
        }
    }
}

impl Rgb {
    #[inline]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build a record from raw, possibly out of range values.
    /// Channels clamp to 0..=255 and alpha to 0..=1 (NaN alpha reads as opaque).
    #[inline]
    pub fn clamped(r: i32, g: i32, b: i32, a: ColorFloat) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: a.clamp_alpha(),
        }
    }

    #[must_use]
    #[inline]
    pub fn with_alpha(self, a: ColorFloat) -> Self {
        Self {
            a: a.clamp_alpha(),
            ..self
        }
    }

    #[must_use]
    #[inline]
    pub fn into_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the lossless form; hex would drop alpha
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Hue in degrees (0..360), saturation and lightness in percent (0..=100).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hsl {
    pub h: ColorFloat,
    pub s: ColorFloat,
    pub l: ColorFloat,
    pub a: ColorFloat,
}

impl Hsl {
    #[must_use]
    #[inline]
    pub fn with_alpha(self, a: ColorFloat) -> Self {
        Self {
            a: a.clamp_alpha(),
            ..self
        }
    }
}

/// Hue in degrees (0..360), saturation and value in percent (0..=100).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hsv {
    pub h: ColorFloat,
    pub s: ColorFloat,
    pub v: ColorFloat,
    pub a: ColorFloat,
}

impl Hsv {
    #[must_use]
    #[inline]
    pub fn with_alpha(self, a: ColorFloat) -> Self {
        Self {
            a: a.clamp_alpha(),
            ..self
        }
    }
}
