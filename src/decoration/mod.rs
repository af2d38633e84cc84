//! Decoration chains: a base description wrapped in ingredient layers.
//!
//! Each layer knows only its own label and the layer it wraps; the composed
//! description is derived on demand from the outermost layer.

pub mod chain;
pub mod ingredient;

pub use chain::{Decoration, DescriptionSummary, Layer, Layers};
pub use ingredient::{Ingredient, parse_ingredients};
