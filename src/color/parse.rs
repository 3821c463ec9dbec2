use tracing::{debug, trace};

use crate::color::ColorFloat;
use crate::color::convert::hsl_to_rgb;
use crate::color::model::{Rgb, round_channel};
use crate::traits::float::Float;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty color string")]
    Empty,
    #[error("unrecognized color format {0:?}: expected #hex, rgb(), rgba(), hsl() or hsla()")]
    UnrecognizedFormat(String),
    #[error("invalid hex color {0:?}: expected exactly 3 or 6 hex digits")]
    InvalidHex(String),
    #[error("invalid color function {0:?}: arguments must sit inside one pair of parentheses")]
    InvalidSyntax(String),
    #[error("color function takes 3 or 4 arguments, got {0}")]
    WrongArity(usize),
    #[error("color argument {0:?} does not start with a number")]
    InvalidNumber(String),
    #[error("unsupported output format {0:?}")]
    InvalidFormatRequest(String),
}

/// Parse a hex color body (without the leading `#`).
///
/// The allowed formats are:
/// * RGB
/// * RRGGBB
///
/// There is no alpha form; 4 and 8 digit bodies are rejected like any
/// other length.
fn parse_hex(hex: &str) -> Result<Rgb, ParseError> {
    let invalid = || ParseError::InvalidHex(hex.to_string());

    let nibble = |c: u8| -> Option<u8> {
        match c {
            b'0'..=b'9' => Some(c - b'0'),
            b'a'..=b'f' => Some(c - b'a' + 10),
            b'A'..=b'F' => Some(c - b'A' + 10),
            _ => None,
        }
    };
    let nibble2 = |hi: u8, lo: u8| -> Option<u8> { Some((nibble(hi)? << 4) | nibble(lo)?) };

    let bytes = hex.as_bytes();
    let rgb = match bytes.len() {
        // #RGB: each digit doubles, so f09 reads as ff0099
        3 => [
            nibble2(bytes[0], bytes[0]),
            nibble2(bytes[1], bytes[1]),
            nibble2(bytes[2], bytes[2]),
        ],
        // #RRGGBB
        6 => [
            nibble2(bytes[0], bytes[1]),
            nibble2(bytes[2], bytes[3]),
            nibble2(bytes[4], bytes[5]),
        ],
        _ => return Err(invalid()),
    };

    match rgb {
        [Some(r), Some(g), Some(b)] => Ok(Rgb::new(r, g, b)),
        _ => Err(invalid()),
    }
}

/// Read the leading number of a function argument.
///
/// This is deliberately permissive: only the `[+-]digits[.digits]` prefix is
/// looked at and whatever follows is ignored, so `50%` reads as `50` and
/// `12px` as `12`. An argument that does not start with a number is an error.
fn leading_number(field: &str) -> Result<f64, ParseError> {
    let field = field.trim();
    let bytes = field.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }

    if !has_digits {
        return Err(ParseError::InvalidNumber(field.to_string()));
    }
    field[..end]
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(field.to_string()))
}

/// Strip the parentheses off a function body and split its arguments.
/// Yields 3 or 4 numbers; a missing 4th (alpha) defaults to 1.
fn function_args(func: &str, body: &str) -> Result<[f64; 4], ParseError> {
    let inner = body
        .trim()
        .strip_prefix('(')
        .and_then(|x| x.strip_suffix(')'))
        .filter(|x| !x.contains(['(', ')']))
        .ok_or_else(|| ParseError::InvalidSyntax(func.to_string()))?;

    let fields: Vec<&str> = inner.split(',').collect();
    if !matches!(fields.len(), 3 | 4) {
        return Err(ParseError::WrongArity(fields.len()));
    }

    let mut nums = [0.0, 0.0, 0.0, 1.0];
    for (slot, field) in nums.iter_mut().zip(&fields) {
        *slot = leading_number(field)?;
    }
    Ok(nums)
}

/// Parse a CSS-ish rgb function.
///
/// The allowed styles are:
/// rgb(r,g,b)
/// rgb(r,g,b,a)
/// rgba(r,g,b)
/// rgba(r,g,b,a)
///
/// Channels round to the nearest integer and clamp to 0..=255, alpha clamps to 0..=1.
fn parse_css_rgb(func: &str, body: &str) -> Result<Rgb, ParseError> {
    let [r, g, b, a] = function_args(func, body)?;

    Ok(Rgb {
        r: round_channel(r),
        g: round_channel(g),
        b: round_channel(b),
        a: ColorFloat::from_f64(a).clamp_alpha(),
    })
}

/// Parse a CSS-ish hsl function, converting straight to RGB.
///
/// The allowed styles are:
/// hsl(h,s,l)
/// hsl(h,s%,l%)
/// hsla(h,s%,l%,a)
///
/// A `%` sign is optional; s and l are always read on the 0..=100 scale.
fn parse_css_hsl(func: &str, body: &str) -> Result<Rgb, ParseError> {
    let [h, s, l, a] = function_args(func, body)?;

    Ok(hsl_to_rgb(
        ColorFloat::from_f64(h),
        ColorFloat::from_f64(s),
        ColorFloat::from_f64(l),
    )
    .with_alpha(ColorFloat::from_f64(a)))
}

fn dispatch(s: &str) -> Result<Rgb, ParseError> {
    // Hex-like
    if let Some(hex) = s.strip_prefix('#') {
        trace!(format = "hex", "detected color format");
        return parse_hex(hex);
    }

    // longest keyword first so "rgba" is not read as "rgb" + "a(...)"
    for (keyword, is_hsl) in [("rgba", false), ("rgb", false), ("hsla", true), ("hsl", true)] {
        if let Some(body) = s.strip_prefix(keyword) {
            trace!(format = keyword, "detected color format");
            return if is_hsl {
                parse_css_hsl(s, body)
            } else {
                parse_css_rgb(s, body)
            };
        }
    }

    Err(ParseError::UnrecognizedFormat(s.to_string()))
}

/// Parse any supported color string into the canonical RGB record.
///
/// Leading/trailing whitespace is ignored and matching is case-insensitive.
pub fn parse_color(s: &str) -> Result<Rgb, ParseError> {
    let lower = s.trim().to_ascii_lowercase();
    if lower.is_empty() {
        debug!(input = s, "rejected empty color string");
        return Err(ParseError::Empty);
    }

    dispatch(&lower).inspect_err(|err| debug!(input = s, error = %err, "rejected color string"))
}

impl core::str::FromStr for Rgb {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}
impl TryFrom<&str> for Rgb {
    type Error = ParseError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_color(value)
    }
}
