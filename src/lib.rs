//! Parse hex / `rgb()` / `hsl()` color strings into one RGB record, adjust
//! it, and print it back out as hex, rgb, rgba, hsl or hsv.
//!
//! ```
//! use colorkit::ColorValue;
//!
//! let c = ColorValue::parse("#f09").unwrap().set_alpha(0.5).darken(16);
//! assert_eq!(c.to_rgba_string(), "rgba(239, 0, 137, 0.5)");
//! ```

pub mod color;
pub mod traits;

pub use color::ColorFloat;
pub use color::convert::{hsl_to_rgb, hsv_to_rgb, rgb_to_hex, rgb_to_hsl, rgb_to_hsv};
pub use color::format::ColorFormat;
pub use color::model::{Hsl, Hsv, Rgb};
pub use color::parse::{ParseError, parse_color};
pub use color::value::{Channel, ColorValue};
