use std::fmt;
use std::str::FromStr;

use crate::color::ColorFloat;
use crate::color::convert::{hsl_to_rgb, hsv_to_rgb, rgb_to_hex, rgb_to_hsl, rgb_to_hsv};
use crate::color::format::ColorFormat;
use crate::color::model::{Hsl, Hsv, Rgb, round_channel};
use crate::color::parse::{ParseError, parse_color};
use crate::traits::float::{Float, clamp_generic};

/// A channel that can be read, replaced or shifted on a [`ColorValue`].
///
/// Red/green/blue are on the 0..=255 scale, alpha on 0..=1, hue in degrees
/// and saturation/lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
    Hue,
    Saturation,
    Lightness,
}

const RGB_CHANNELS: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

/// An immutable color. Every setter and adjustment hands back a new value,
/// so `set_red(..).set_blue(..)` chains without any shared state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorValue {
    rgb: Rgb,
}

impl ColorValue {
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        parse_color(s).map(|rgb| Self { rgb })
    }

    /// Opaque color from raw channels; anything outside 0..=255 is clamped.
    pub fn rgb(r: i32, g: i32, b: i32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Same as [`ColorValue::rgb`], alpha clamped to 0..=1.
    pub fn rgba(r: i32, g: i32, b: i32, a: ColorFloat) -> Self {
        Self {
            rgb: Rgb::clamped(r, g, b, a),
        }
    }

    pub fn from_hsl(h: ColorFloat, s: ColorFloat, l: ColorFloat) -> Self {
        Self {
            rgb: hsl_to_rgb(h, s, l),
        }
    }

    pub fn from_hsv(h: ColorFloat, s: ColorFloat, v: ColorFloat) -> Self {
        Self {
            rgb: hsv_to_rgb(h, s, v),
        }
    }

    pub fn red(self) -> u8 {
        self.rgb.r
    }

    pub fn green(self) -> u8 {
        self.rgb.g
    }

    pub fn blue(self) -> u8 {
        self.rgb.b
    }

    pub fn alpha(self) -> ColorFloat {
        self.rgb.a
    }

    /// Current value of `channel` on its own scale.
    pub fn get(self, channel: Channel) -> ColorFloat {
        match channel {
            Channel::Red => self.rgb.r as ColorFloat,
            Channel::Green => self.rgb.g as ColorFloat,
            Channel::Blue => self.rgb.b as ColorFloat,
            Channel::Alpha => self.rgb.a,
            Channel::Hue => self.to_hsl().h,
            Channel::Saturation => self.to_hsl().s,
            Channel::Lightness => self.to_hsl().l,
        }
    }

    /// Replace one channel. RGB values round and clamp to 0..=255, alpha
    /// clamps to 0..=1. HSL channels go through an HSL round trip, so the
    /// untouched RGB channels may move by the usual ±1.
    #[must_use]
    pub fn with(self, channel: Channel, value: ColorFloat) -> Self {
        let Rgb { r, g, b, a } = self.rgb;
        let rgb = match channel {
            Channel::Red => Rgb { r: round_channel(value.to_f64()), ..self.rgb },
            Channel::Green => Rgb { g: round_channel(value.to_f64()), ..self.rgb },
            Channel::Blue => Rgb { b: round_channel(value.to_f64()), ..self.rgb },
            Channel::Alpha => self.rgb.with_alpha(value),
            Channel::Hue | Channel::Saturation | Channel::Lightness => {
                let Hsl { h, s, l, .. } = rgb_to_hsl(r, g, b);
                let (h, s, l) = match channel {
                    Channel::Hue => (value, s, l),
                    Channel::Saturation => (h, value, l),
                    _ => (h, s, value),
                };
                hsl_to_rgb(h, s, l).with_alpha(a)
            }
        };
        Self { rgb }
    }

    #[must_use]
    pub fn set_red(self, r: i32) -> Self {
        self.with(Channel::Red, r as ColorFloat)
    }

    #[must_use]
    pub fn set_green(self, g: i32) -> Self {
        self.with(Channel::Green, g as ColorFloat)
    }

    #[must_use]
    pub fn set_blue(self, b: i32) -> Self {
        self.with(Channel::Blue, b as ColorFloat)
    }

    #[must_use]
    pub fn set_alpha(self, a: ColorFloat) -> Self {
        self.with(Channel::Alpha, a)
    }

    /// Add `delta` to each of `channels` in order, re-clamping after each.
    /// A positive delta raises the channel, a negative one lowers it.
    /// Hue wraps around the circle instead of clamping.
    #[must_use]
    pub fn shift(self, channels: &[Channel], delta: ColorFloat) -> Self {
        channels
            .iter()
            .fold(self, |color, &channel| color.with(channel, color.get(channel) + delta))
    }

    /// `+amount` on red, green and blue.
    #[must_use]
    pub fn brighten(self, amount: i32) -> Self {
        self.shift(&RGB_CHANNELS, amount as ColorFloat)
    }

    /// `-amount` on red, green and blue.
    #[must_use]
    pub fn darken(self, amount: i32) -> Self {
        self.shift(&RGB_CHANNELS, -(amount as ColorFloat))
    }

    /// `+amount` lightness percentage points.
    #[must_use]
    pub fn lighten(self, amount: ColorFloat) -> Self {
        self.shift(&[Channel::Lightness], amount)
    }

    /// `+amount` saturation percentage points.
    #[must_use]
    pub fn saturate(self, amount: ColorFloat) -> Self {
        self.shift(&[Channel::Saturation], amount)
    }

    /// `-amount` saturation percentage points.
    #[must_use]
    pub fn desaturate(self, amount: ColorFloat) -> Self {
        self.shift(&[Channel::Saturation], -amount)
    }

    /// Turn the hue by `degrees`, wrapping at 360.
    #[must_use]
    pub fn rotate_hue(self, degrees: ColorFloat) -> Self {
        self.shift(&[Channel::Hue], degrees)
    }

    // Linear interpolation in sRGB space, alpha included.
    #[must_use]
    pub fn mix(self, other: ColorValue, t: ColorFloat) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp01() };
        let lerp8 = |a: u8, b: u8| -> u8 {
            let (a, b) = (a as ColorFloat, b as ColorFloat);
            round_channel((a + (b - a) * t).to_f64())
        };

        Self {
            rgb: Rgb {
                r: lerp8(self.rgb.r, other.rgb.r),
                g: lerp8(self.rgb.g, other.rgb.g),
                b: lerp8(self.rgb.b, other.rgb.b),
                a: clamp_generic(self.rgb.a + (other.rgb.a - self.rgb.a) * t, 0.0, 1.0),
            },
        }
    }

    /// Copy of the underlying record.
    pub fn to_rgb(self) -> Rgb {
        self.rgb
    }

    /// HSL view carrying this color's alpha.
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self.rgb.r, self.rgb.g, self.rgb.b).with_alpha(self.rgb.a)
    }

    /// HSV view carrying this color's alpha.
    pub fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self.rgb.r, self.rgb.g, self.rgb.b).with_alpha(self.rgb.a)
    }

    pub fn to_hex(self) -> String {
        rgb_to_hex(self.rgb.r, self.rgb.g, self.rgb.b)
    }

    pub fn to_rgb_string(self) -> String {
        let Rgb { r, g, b, .. } = self.rgb;
        format!("rgb({r}, {g}, {b})")
    }

    pub fn to_rgba_string(self) -> String {
        self.rgb.to_string()
    }

    pub fn to_hsl_string(self) -> String {
        let hsl = self.to_hsl();
        let (h, s, l) = whole_hsx(hsl.h, hsl.s, hsl.l);
        format!("hsl({h}, {s}%, {l}%)")
    }

    pub fn to_hsla_string(self) -> String {
        let hsl = self.to_hsl();
        let (h, s, l) = whole_hsx(hsl.h, hsl.s, hsl.l);
        format!("hsla({h}, {s}%, {l}%, {})", hsl.a)
    }

    pub fn to_hsv_string(self) -> String {
        let hsv = self.to_hsv();
        let (h, s, v) = whole_hsx(hsv.h, hsv.s, hsv.v);
        format!("hsv({h}, {s}%, {v}%)")
    }

    pub fn format(self, format: ColorFormat) -> String {
        match format {
            ColorFormat::Hex => self.to_hex(),
            ColorFormat::Rgb => self.to_rgb_string(),
            ColorFormat::Rgba => self.to_rgba_string(),
            ColorFormat::Hsl => self.to_hsl_string(),
            ColorFormat::Hsla => self.to_hsla_string(),
            ColorFormat::Hsv => self.to_hsv_string(),
        }
    }

    /// Render using a format tag such as `"hex"` or `"rgba"`.
    pub fn format_as(self, tag: &str) -> Result<String, ParseError> {
        Ok(self.format(tag.parse()?))
    }
}

// whole degrees and percentage points; 359.6° rounds onto 0°
fn whole_hsx(h: ColorFloat, a: ColorFloat, b: ColorFloat) -> (i32, i32, i32) {
    (
        (h.round() as i32).rem_euclid(360),
        a.round() as i32,
        b.round() as i32,
    )
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Rgb> for ColorValue {
    fn from(rgb: Rgb) -> Self {
        Self {
            rgb: rgb.with_alpha(rgb.a),
        }
    }
}

impl From<ColorValue> for Rgb {
    fn from(value: ColorValue) -> Self {
        value.rgb
    }
}

impl FromStr for ColorValue {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
impl TryFrom<&str> for ColorValue {
    type Error = ParseError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: ColorFloat, b: ColorFloat) -> bool {
        (a - b).abs() < 1.0
    }

    // ── construction ─────────────────────────────────────────

    #[test]
    fn constructors_clamp() {
        let c = ColorValue::rgba(-10, 300, 40, 2.0);
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (0, 255, 40, 1.0));
        assert_eq!(ColorValue::rgb(1, 2, 3).alpha(), 1.0);
        assert_eq!(ColorValue::from_hsl(240.0, 100.0, 50.0).to_hex(), "#0000ff");
        assert_eq!(ColorValue::from_hsv(120.0, 100.0, 100.0).to_hex(), "#00ff00");
    }

    #[test]
    fn default_is_opaque_black() {
        assert_eq!(ColorValue::default().to_rgba_string(), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn from_rgb_record_clamps_alpha() {
        let c = ColorValue::from(Rgb { r: 1, g: 2, b: 3, a: 9.0 });
        assert_eq!(c.alpha(), 1.0);
    }

    // ── setters ──────────────────────────────────────────────

    #[test]
    fn setters_chain_and_clamp() {
        let base = ColorValue::rgb(10, 20, 30);
        let c = base.set_red(300).set_green(-1).set_blue(77).set_alpha(0.5);
        assert_eq!(c.to_rgba_string(), "rgba(255, 0, 77, 0.5)");
        // base is untouched
        assert_eq!(base.to_rgb_string(), "rgb(10, 20, 30)");
    }

    #[test]
    fn set_alpha_clamps() {
        assert_eq!(ColorValue::rgb(0, 0, 0).set_alpha(-3.0).alpha(), 0.0);
        assert_eq!(ColorValue::rgb(0, 0, 0).set_alpha(3.0).alpha(), 1.0);
    }

    #[test]
    fn to_rgb_returns_a_copy() {
        let c = ColorValue::rgb(1, 2, 3);
        let mut record = c.to_rgb();
        record.r = 200;
        assert_eq!(c.red(), 1);
    }

    // ── adjustments ──────────────────────────────────────────

    #[test]
    fn brighten_and_darken_are_mirror_images() {
        let c = ColorValue::rgb(100, 150, 250);
        assert_eq!(c.brighten(10).to_rgb_string(), "rgb(110, 160, 255)");
        assert_eq!(c.darken(120).to_rgb_string(), "rgb(0, 30, 130)");
        assert_eq!(c.brighten(-10), c.darken(10));
    }

    #[test]
    fn brighten_leaves_alpha_alone() {
        let c = ColorValue::rgba(0, 0, 0, 0.25).brighten(50);
        assert_eq!(c.alpha(), 0.25);
    }

    #[test]
    fn lighten_raises_lightness() {
        let c = ColorValue::parse("hsl(200, 50%, 40%)").unwrap();
        let lighter = c.lighten(20.0);
        assert!(close(lighter.get(Channel::Lightness), 60.0));
        assert!(close(c.lighten(200.0).get(Channel::Lightness), 100.0));
        assert_eq!(c.lighten(200.0).to_hex(), "#ffffff");
    }

    #[test]
    fn desaturate_lowers_saturation() {
        let c = ColorValue::parse("hsl(10, 80%, 50%)").unwrap();
        assert!(close(c.desaturate(30.0).get(Channel::Saturation), 50.0));
        let grey = c.desaturate(100.0);
        assert_eq!(grey.red(), grey.green());
        assert_eq!(grey.green(), grey.blue());
        assert!(close(c.desaturate(30.0).saturate(30.0).get(Channel::Saturation), 80.0));
    }

    #[test]
    fn hsl_adjustments_keep_alpha() {
        let c = ColorValue::parse("hsla(10, 80%, 50%, 0.3)").unwrap();
        assert_eq!(c.lighten(5.0).alpha(), 0.3);
        assert_eq!(c.desaturate(5.0).alpha(), 0.3);
    }

    #[test]
    fn rotate_hue_wraps() {
        let red = ColorValue::rgb(255, 0, 0);
        assert_eq!(red.rotate_hue(120.0).to_hex(), "#00ff00");
        assert_eq!(red.rotate_hue(-120.0).to_hex(), "#0000ff");
        assert_eq!(red.rotate_hue(360.0).to_hex(), "#ff0000");
    }

    #[test]
    fn shift_alpha() {
        let c = ColorValue::rgba(0, 0, 0, 0.5).shift(&[Channel::Alpha], 0.75);
        assert_eq!(c.alpha(), 1.0);
    }

    #[test]
    fn mix_interpolates() {
        let black = ColorValue::rgba(0, 0, 0, 0.0);
        let white = ColorValue::rgb(255, 255, 255);
        assert_eq!(black.mix(white, 0.0), black);
        assert_eq!(black.mix(white, 1.0), white);
        let mid = black.mix(white, 0.5);
        assert_eq!(mid.to_rgba_string(), "rgba(128, 128, 128, 0.5)");
        assert_eq!(black.mix(white, 7.0), white);
    }

    // ── formatting ───────────────────────────────────────────

    #[test]
    fn string_shapes() {
        let c = ColorValue::rgba(255, 128, 0, 0.5);
        assert_eq!(c.to_hex(), "#ff8000");
        assert_eq!(c.to_rgb_string(), "rgb(255, 128, 0)");
        assert_eq!(c.to_rgba_string(), "rgba(255, 128, 0, 0.5)");
        assert_eq!(c.to_string(), "#ff8000");
    }

    #[test]
    fn hsl_and_hsv_strings() {
        let c = ColorValue::rgba(255, 0, 0, 0.5);
        assert_eq!(c.to_hsl_string(), "hsl(0, 100%, 50%)");
        assert_eq!(c.to_hsla_string(), "hsla(0, 100%, 50%, 0.5)");
        assert_eq!(c.to_hsv_string(), "hsv(0, 100%, 100%)");
    }

    #[test]
    fn structured_views_carry_alpha() {
        let c = ColorValue::rgba(0, 0, 255, 0.25);
        let hsl = c.to_hsl();
        assert!(close(hsl.h, 240.0));
        assert_eq!(hsl.a, 0.25);
        assert_eq!(c.to_hsv().a, 0.25);
    }

    #[test]
    fn format_by_tag() {
        let c = ColorValue::rgb(0, 255, 0);
        assert_eq!(c.format(ColorFormat::Hex), "#00ff00");
        assert_eq!(c.format_as("RGB").unwrap(), "rgb(0, 255, 0)");
        assert_eq!(c.format_as("hsl").unwrap(), "hsl(120, 100%, 50%)");
        assert_eq!(
            c.format_as("cmyk"),
            Err(ParseError::InvalidFormatRequest("cmyk".to_string()))
        );
    }

    #[test]
    fn parse_entry_points_agree() {
        let a = ColorValue::parse("#abc").unwrap();
        let b: ColorValue = "#aabbcc".parse().unwrap();
        let c = ColorValue::try_from("rgb(170, 187, 204)").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(matches!(
            ColorValue::parse("notacolor"),
            Err(ParseError::UnrecognizedFormat(_))
        ));
    }

    proptest! {
        #[test]
        fn setters_always_land_in_range(v in any::<i32>(), a in -10.0f32..10.0) {
            let c = ColorValue::default()
                .set_red(v)
                .set_green(v.wrapping_neg())
                .set_alpha(a as ColorFloat);
            prop_assert_eq!(c.red(), v.clamp(0, 255) as u8);
            prop_assert_eq!(c.green(), v.wrapping_neg().clamp(0, 255) as u8);
            prop_assert!((0.0..=1.0).contains(&c.alpha()));
        }

        #[test]
        fn hex_output_shape(r in 0i32..256, g in 0i32..256, b in 0i32..256) {
            let hex = ColorValue::rgb(r, g, b).to_hex();
            prop_assert_eq!(hex.len(), 7);
            prop_assert!(hex[1..].chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }
}
