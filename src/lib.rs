//! Puts a radial striped background behind a square transparent image.
//!
//! The stripes are pie slices around the image center, filled with a list of
//! colors in turn. The original artwork is then composited on top and saved
//! as PNG.
//!
//! - `color`: parses `#RRGGBB` and `R,G,B` color strings.
//! - `stripes`: stripe configuration and the sector rasterizer.
//! - `composite`: the "over" operator for RGBA images.
//! - `background`: open, render, composite and save in one step.
//! - `driver`: the interactive console prompts.
//! - `config`: command-line flags and config files.

pub mod background;
pub mod color;
pub mod composite;
pub mod config;
pub mod driver;
pub mod error;
pub mod stripes;

pub use crate::background::add_radial_stripes_background;
pub use crate::color::{format_hex, parse_color, Color, ColorParseError};
pub use crate::composite::alpha_composite;
pub use crate::driver::{Driver, Outcome};
pub use crate::error::AppError;
pub use crate::stripes::{render_stripes, BackgroundShape, StripeConfig, StripeMode};
