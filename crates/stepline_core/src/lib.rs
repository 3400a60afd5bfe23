//! Stepline Core
//!
//! Plain value types shared by the animation runtime and the widgets:
//!
//! - **Color**: RGBA color with hex parsing and serde support
//! - **Geometry**: `Point`, `Size` and `Rect` in layout units
//! - **Text style**: label placement and font description

pub mod color;
pub mod geometry;
pub mod text;

pub use color::{Color, ColorParseError};
pub use geometry::{Point, Rect, Size};
pub use text::{FontWeight, LabelFont, LabelPosition};
