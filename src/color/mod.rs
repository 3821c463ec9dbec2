pub mod convert;
pub mod format;
pub mod model;
pub mod parse;
pub mod value;

#[cfg(feature = "color_double_precision")]
pub type ColorFloat = f64;
#[cfg(not(feature = "color_double_precision"))]
pub type ColorFloat = f32;
