//! Nested style values.

use indexmap::IndexMap;
use serde::Serialize;

use super::keyframes::Keyframes;

/// Key marking a wrapped value that should bypass linting.
pub const SKIP_CHECK: &str = "_skip_check_";

/// Key marking a wrapped array as several declarations of one property.
pub const MULTI_VALUE: &str = "_multi_value_";

/// Any value that can appear in a style definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CssInterpolation {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Object(CssObject),
    Array(Vec<CssInterpolation>),
    Keyframes(Keyframes),
    Wrapped(ValueWrapper),
}

/// A property value carrying [`SKIP_CHECK`] / [`MULTI_VALUE`] flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueWrapper {
    #[serde(rename = "_skip_check_", skip_serializing_if = "std::ops::Not::not")]
    pub skip_check: bool,
    #[serde(rename = "_multi_value_", skip_serializing_if = "std::ops::Not::not")]
    pub multi_value: bool,
    pub value: Box<CssInterpolation>,
}

impl ValueWrapper {
    /// Wraps a value that linters should not inspect.
    pub fn skip_check(value: impl Into<CssInterpolation>) -> Self {
        Self {
            skip_check: true,
            multi_value: false,
            value: Box::new(value.into()),
        }
    }

    /// Wraps values emitted as repeated declarations of the same property.
    pub fn multi_value<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CssInterpolation>,
    {
        Self {
            skip_check: false,
            multi_value: true,
            value: Box::new(CssInterpolation::Array(
                values.into_iter().map(Into::into).collect(),
            )),
        }
    }
}

/// Insertion-ordered map of properties and nested selectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CssObject(IndexMap<String, CssInterpolation>);

impl CssObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning the object for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CssInterpolation>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces an entry in place. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CssInterpolation>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&CssInterpolation> {
        self.0.get(key)
    }

    /// Removes an entry, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<CssInterpolation> {
        self.0.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CssInterpolation)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl FromIterator<(String, CssInterpolation)> for CssObject {
    fn from_iter<T: IntoIterator<Item = (String, CssInterpolation)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for CssObject {
    type Item = (String, CssInterpolation);
    type IntoIter = indexmap::map::IntoIter<String, CssInterpolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<bool> for CssInterpolation {
    fn from(value: bool) -> Self {
        CssInterpolation::Bool(value)
    }
}

impl From<f64> for CssInterpolation {
    fn from(value: f64) -> Self {
        CssInterpolation::Number(value)
    }
}

impl From<i32> for CssInterpolation {
    fn from(value: i32) -> Self {
        CssInterpolation::Number(f64::from(value))
    }
}

impl From<&str> for CssInterpolation {
    fn from(value: &str) -> Self {
        CssInterpolation::Str(value.to_string())
    }
}

impl From<String> for CssInterpolation {
    fn from(value: String) -> Self {
        CssInterpolation::Str(value)
    }
}

impl From<CssObject> for CssInterpolation {
    fn from(value: CssObject) -> Self {
        CssInterpolation::Object(value)
    }
}

impl From<Keyframes> for CssInterpolation {
    fn from(value: Keyframes) -> Self {
        CssInterpolation::Keyframes(value)
    }
}

impl From<ValueWrapper> for CssInterpolation {
    fn from(value: ValueWrapper) -> Self {
        CssInterpolation::Wrapped(value)
    }
}

impl From<Vec<CssInterpolation>> for CssInterpolation {
    fn from(value: Vec<CssInterpolation>) -> Self {
        CssInterpolation::Array(value)
    }
}

impl<T: Into<CssInterpolation>> From<Option<T>> for CssInterpolation {
    fn from(value: Option<T>) -> Self {
        value.map_or(CssInterpolation::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_preserves_insertion_order() {
        let obj = CssObject::new()
            .with("color", "red")
            .with("margin", 0)
            .with("&:hover", CssObject::new().with("color", "blue"));

        let keys: Vec<&str> = obj.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["color", "margin", "&:hover"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut obj = CssObject::new().with("a", 1).with("b", 2);
        obj.insert("a", 3);

        let keys: Vec<&str> = obj.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(obj.get("a"), Some(&CssInterpolation::Number(3.0)));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut obj = CssObject::new().with("a", 1).with("b", 2).with("c", 3);
        obj.remove("b");
        let keys: Vec<&str> = obj.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_serializes_like_a_style_object() {
        let obj = CssObject::new()
            .with("color", "red")
            .with("zIndex", 10)
            .with("display", None::<&str>)
            .with(
                "animationName",
                Keyframes::new(
                    "fade",
                    CssObject::new().with("to", CssObject::new().with("opacity", 1)),
                ),
            );

        assert_eq!(
            serde_json::to_value(&obj).unwrap(),
            json!({
                "color": "red",
                "zIndex": 10.0,
                "display": null,
                "animationName": { "name": "fade", "style": { "to": { "opacity": 1.0 } } }
            })
        );
    }

    #[test]
    fn test_wrapper_flags_serialize_with_reserved_keys() {
        let wrapped = ValueWrapper::skip_check("1px");
        assert_eq!(
            serde_json::to_value(&wrapped).unwrap(),
            json!({ "_skip_check_": true, "value": "1px" })
        );

        let multi = ValueWrapper::multi_value(["-webkit-box", "flex"]);
        assert_eq!(
            serde_json::to_value(&multi).unwrap(),
            json!({ "_multi_value_": true, "value": ["-webkit-box", "flex"] })
        );
    }
}
