//! Pure conversions between the canonical RGB record and its derived views.
//!
//! Nothing in here fails: inputs are already numeric, out of range values
//! are clamped or wrapped rather than rejected.

use crate::color::ColorFloat;
use crate::color::model::{Hsl, Hsv, Rgb, round_channel};
use crate::traits::float::{Float, clamp_generic};

/// `#rrggbb`, lowercase, always 7 characters. Alpha is not encoded.
#[must_use]
#[inline]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Channels scaled to 0..=1 plus the max, min and spread between them.
#[inline]
fn normalized(r: u8, g: u8, b: u8) -> ([ColorFloat; 3], ColorFloat, ColorFloat, ColorFloat) {
    let r_prime = (r as ColorFloat) / 255.0;
    let g_prime = (g as ColorFloat) / 255.0;
    let b_prime = (b as ColorFloat) / 255.0;

    let c_max = r_prime.max(g_prime).max(b_prime);
    let c_min = r_prime.min(g_prime).min(b_prime);

    let delta = c_max - c_min;
    // prevent tiny negative zero from noise
    let delta = if delta.abs() < 1e-8 { 0.0 } else { delta };

    ([r_prime, g_prime, b_prime], c_max, c_min, delta)
}

/// Hue in degrees, shared by HSL and HSV. Zero for greys.
#[inline]
fn hue([r, g, b]: [ColorFloat; 3], c_max: ColorFloat, delta: ColorFloat) -> ColorFloat {
    if delta == 0.0 {
        return 0.0;
    }

    let h = match c_max {
        _ if r == c_max => ((g - b) / delta).rem_euclid(6.0),
        _ if g == c_max => (b - r) / delta + 2.0,
        _ => (r - g) / delta + 4.0, // b == c_max
    };
    // rem_euclid can round up to exactly 6.0
    (h * 60.0).rem_euclid(360.0)
}

/// Pre-match (r, g, b) triple for the 60° sextant that `h` falls into.
#[inline]
fn sextant(h: ColorFloat, c: ColorFloat, x: ColorFloat) -> (ColorFloat, ColorFloat, ColorFloat) {
    match h {
        0.0..60.0 => (c, x, 0.0),
        60.0..120.0 => (x, c, 0.0),
        120.0..180.0 => (0.0, c, x),
        180.0..240.0 => (0.0, x, c),
        240.0..300.0 => (x, 0.0, c),
        _ => (c, 0.0, x), // 300.0..360.0
    }
}

#[inline]
fn percent_to_unit(p: ColorFloat) -> ColorFloat {
    clamp_generic(p, 0.0, 100.0) / 100.0
}

#[inline]
fn finish(r_prime: ColorFloat, g_prime: ColorFloat, b_prime: ColorFloat, m: ColorFloat) -> Rgb {
    let scale = |v: ColorFloat| round_channel(((v + m) * 255.0).to_f64());
    Rgb::new(scale(r_prime), scale(g_prime), scale(b_prime))
}

/// RGB -> HSL with hue in degrees and s/l in percent. Alpha is always 1;
/// callers that own an alpha re-attach it with [`Hsl::with_alpha`].
#[must_use]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    // solution from https://www.rapidtables.com/convert/color/rgb-to-hsl.html
    let (primes, c_max, c_min, delta) = normalized(r, g, b);

    let l = (c_max + c_min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };

    Hsl {
        h: hue(primes, c_max, delta),
        s: clamp_generic(s * 100.0, 0.0, 100.0),
        l: l * 100.0,
        a: 1.0,
    }
}

/// HSL -> RGB. Hue wraps into 0..360, s and l clamp to 0..=100.
/// The result is opaque.
#[must_use]
pub fn hsl_to_rgb(h: ColorFloat, s: ColorFloat, l: ColorFloat) -> Rgb {
    // solution from https://www.rapidtables.com/convert/color/hsl-to-rgb.html
    let h = h.rem_euclid(360.0);
    let s = percent_to_unit(s);
    let l = percent_to_unit(l);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r_prime, g_prime, b_prime) = sextant(h, c, x);
    finish(r_prime, g_prime, b_prime, m)
}

/// RGB -> HSV with hue in degrees and s/v in percent. Alpha is always 1.
#[must_use]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let (primes, c_max, _, delta) = normalized(r, g, b);

    let s = if c_max == 0.0 { 0.0 } else { delta / c_max };

    Hsv {
        h: hue(primes, c_max, delta),
        s: s * 100.0,
        v: c_max * 100.0,
        a: 1.0,
    }
}

/// HSV -> RGB. Same wrapping and clamping rules as [`hsl_to_rgb`].
#[must_use]
pub fn hsv_to_rgb(h: ColorFloat, s: ColorFloat, v: ColorFloat) -> Rgb {
    let h = h.rem_euclid(360.0);
    let s = percent_to_unit(s);
    let v = percent_to_unit(v);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r_prime, g_prime, b_prime) = sextant(h, c, x);
    finish(r_prime, g_prime, b_prime, m)
}
