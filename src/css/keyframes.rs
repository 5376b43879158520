//! Named keyframe animations.

use serde::Serialize;

use super::interpolation::CssInterpolation;

/// A named animation paired with its keyframe styles.
///
/// The public name can be prefixed with a hash so that independent cache
/// instances sharing one document do not collide.
///
/// # Example
///
/// ```rust
/// use cssinjs_context::{CssObject, Keyframes};
///
/// let fade = Keyframes::new(
///     "fade",
///     CssObject::new()
///         .with("from", CssObject::new().with("opacity", 0))
///         .with("to", CssObject::new().with("opacity", 1)),
/// );
///
/// assert_eq!(fade.get_name(None), "fade");
/// assert_eq!(fade.get_name(Some("h1")), "h1-fade");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyframes {
    name: String,
    style: Box<CssInterpolation>,
}

impl Keyframes {
    pub fn new(name: impl Into<String>, style: impl Into<CssInterpolation>) -> Self {
        Self {
            name: name.into(),
            style: Box::new(style.into()),
        }
    }

    /// Returns the public name, prefixed by `hash_id` when one is given.
    ///
    /// An empty hash counts as no hash.
    pub fn get_name(&self, hash_id: Option<&str>) -> String {
        match hash_id {
            Some(hash) if !hash.is_empty() => format!("{}-{}", hash, self.name),
            _ => self.name.clone(),
        }
    }

    /// The keyframe styles.
    pub fn style(&self) -> &CssInterpolation {
        &self.style
    }
}
