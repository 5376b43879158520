//! CSS object model shared between the context and style-injection code.
//!
//! - [`CssInterpolation`] / [`CssObject`]: Nested style values
//! - [`Keyframes`]: Named animations with per-cache namespacing
//! - [`Transformer`] / [`Linter`]: Pre-injection visitors carried by the context

mod interpolation;
mod keyframes;
mod visitor;

pub use interpolation::{CssInterpolation, CssObject, ValueWrapper, MULTI_VALUE, SKIP_CHECK};
pub use keyframes::Keyframes;
pub use visitor::{transformer_fn, FnTransformer, Linter, LinterInfo, Transformer};
